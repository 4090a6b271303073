use serde::{Deserialize, Serialize};

pub const FETCH_FAILED: &str = "Failed to fetch news data";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn fetch_failed(details: impl ToString) -> Self {
        Self {
            error: FETCH_FAILED.to_string(),
            details: details.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
