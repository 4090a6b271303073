use std::collections::HashMap;

use crate::data_models::ResultEnvelope;
use crate::engine::{EngineClient, EngineError};
use crate::normalizer::normalize;
use crate::query_builder::{build_query, parse_request};

/// Read-only news search over the engine. Holds no per-request state.
pub struct NewsSearch {
    engine: EngineClient,
}

impl NewsSearch {
    pub fn new(engine: EngineClient) -> Self {
        Self { engine }
    }

    pub async fn search(&self, raw: &HashMap<String, String>) -> Result<ResultEnvelope, EngineError> {
        let request = parse_request(raw);
        let query = build_query(&request);
        tracing::debug!(?request, index = self.engine.index(), "searching news");

        let response = self.engine.search(&query).await?;
        Ok(normalize(&response, &request))
    }
}
