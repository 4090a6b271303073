use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A news article as returned to the caller: the stored source fields with
/// the engine identifier under `id`.
pub type Document = Map<String, Value>;

/// Validated search parameters. `page` and `page_size` are always >= 1.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query_text: Option<String>,
    pub page: u64,
    pub page_size: u64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        SearchRequest {
            query_text: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            start_date: None,
            end_date: None,
        }
    }
}

impl SearchRequest {
    /// Offset of the first hit of the requested page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultEnvelope {
    pub total: u64,
    pub page: u64,
    pub size: u64,
    pub data: Vec<Document>,
}
