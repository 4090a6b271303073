use serde_json::Value;

use crate::data_models::{Document, ResultEnvelope, SearchRequest};

/// Key the engine identifier is exposed under in every returned document.
pub const ID_FIELD: &str = "id";

/// Total hit count as reported by the engine. Older engines send a bare
/// integer, newer ones an object carrying `value` (plus a `relation`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalHits {
    Count(u64),
    Tracked { value: u64 },
    Missing,
}

impl TotalHits {
    pub fn from_value(total: Option<&Value>) -> Self {
        match total {
            Some(Value::Number(n)) => n.as_u64().map_or(TotalHits::Missing, TotalHits::Count),
            Some(Value::Object(obj)) => obj
                .get("value")
                .and_then(Value::as_u64)
                .map_or(TotalHits::Missing, |value| TotalHits::Tracked { value }),
            _ => TotalHits::Missing,
        }
    }

    pub fn count(self) -> u64 {
        match self {
            TotalHits::Count(n) | TotalHits::Tracked { value: n } => n,
            TotalHits::Missing => 0,
        }
    }
}

/// Turn one engine hit into a document: source fields first, then the
/// identifier, so a stored `id` field never shadows the engine's.
fn hit_to_document(hit: &Value) -> Document {
    let mut document = hit
        .get("_source")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    if let Some(id) = hit.get("_id").filter(|id| !id.is_null()) {
        document.insert(ID_FIELD.to_string(), id.clone());
    }
    document
}

/// Reshape a raw `_search` response into the public envelope.
///
/// Missing or oddly shaped parts of the response are treated as absent, so
/// this never fails.
pub fn normalize(response: &Value, request: &SearchRequest) -> ResultEnvelope {
    let hits = response.get("hits");

    let data: Vec<Document> = hits
        .and_then(|h| h.get("hits"))
        .and_then(Value::as_array)
        .map(|hits| hits.iter().map(hit_to_document).collect())
        .unwrap_or_default();

    let total = TotalHits::from_value(hits.and_then(|h| h.get("total"))).count();

    ResultEnvelope {
        total,
        page: request.page,
        size: request.page_size,
        data,
    }
}
