use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::data_models::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, SearchRequest};

/// Fields the free-text query is matched against, in priority order.
pub const SEARCH_FIELDS: [&str; 5] = ["title", "contents", "subtitles", "publisher", "tags"];
pub const PUBLISHED_AT: &str = "published_at";

/// Query-string keys accepted by the news endpoint.
pub mod params {
    pub const QUERY: &str = "q";
    pub const PAGE: &str = "page";
    pub const SIZE: &str = "size";
    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
}

/// Request body for the engine's `_search` endpoint.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EngineQuery {
    pub query: QueryClause,
    pub sort: Vec<SortClause>,
    pub from: u64,
    pub size: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryClause {
    pub bool: BoolQuery,
}

/// An empty `must` list matches every document.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<MustClause>,
    pub filter: Vec<FilterClause>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MustClause {
    MultiMatch { query: String, fields: Vec<String> },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FilterClause {
    Range(BTreeMap<String, RangeBounds>),
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct RangeBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct SortClause(BTreeMap<String, SortOrder>);

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub order: Order,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

impl MustClause {
    pub fn multi_match(query: &str) -> Self {
        MustClause::MultiMatch {
            query: query.to_string(),
            fields: SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl FilterClause {
    pub fn published_since(date: &str) -> Self {
        Self::range(RangeBounds {
            gte: Some(date.to_string()),
            lte: None,
        })
    }

    pub fn published_until(date: &str) -> Self {
        Self::range(RangeBounds {
            gte: None,
            lte: Some(date.to_string()),
        })
    }

    fn range(bounds: RangeBounds) -> Self {
        FilterClause::Range(BTreeMap::from([(PUBLISHED_AT.to_string(), bounds)]))
    }
}

impl SortClause {
    pub fn new(field: &str, order: Order) -> Self {
        SortClause(BTreeMap::from([(field.to_string(), SortOrder { order })]))
    }

    pub fn newest_first() -> Self {
        Self::new(PUBLISHED_AT, Order::Desc)
    }
}

/// Parse a pagination value; anything that is not a positive integer yields `default`.
fn positive_or(raw: Option<&String>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn non_empty(raw: Option<&String>) -> Option<String> {
    raw.map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalize raw query-string parameters. Never fails: bad input degrades to defaults.
pub fn parse_request(raw: &HashMap<String, String>) -> SearchRequest {
    SearchRequest {
        query_text: non_empty(raw.get(params::QUERY)),
        page: positive_or(raw.get(params::PAGE), DEFAULT_PAGE),
        page_size: positive_or(raw.get(params::SIZE), DEFAULT_PAGE_SIZE),
        start_date: non_empty(raw.get(params::START_DATE)),
        end_date: non_empty(raw.get(params::END_DATE)),
    }
}

/// Compose the engine query for an already-normalized request.
///
/// Date strings are forwarded untouched; the engine decides what a malformed
/// or inverted range means.
pub fn build_query(request: &SearchRequest) -> EngineQuery {
    let must: Vec<MustClause> = request
        .query_text
        .as_deref()
        .map(MustClause::multi_match)
        .into_iter()
        .collect();

    let filter: Vec<FilterClause> = request
        .start_date
        .as_deref()
        .map(FilterClause::published_since)
        .into_iter()
        .chain(request.end_date.as_deref().map(FilterClause::published_until))
        .collect();

    EngineQuery {
        query: QueryClause {
            bool: BoolQuery { must, filter },
        },
        sort: vec![SortClause::newest_first()],
        from: request.offset(),
        size: request.page_size,
    }
}

pub fn build(raw: &HashMap<String, String>) -> EngineQuery {
    build_query(&parse_request(raw))
}
