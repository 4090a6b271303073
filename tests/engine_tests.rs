use anyhow::Result;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use news_search::engine::{EngineClient, EngineError};
use news_search::query_builder::build;
use news_search::search::NewsSearch;

mod test_helpers {
    use super::*;

    pub const TEST_INDEX: &str = "korea-policy-news-*";

    pub fn engine_for(server: &MockServer, timeout: Duration) -> EngineClient {
        EngineClient::new(&server.uri(), TEST_INDEX, timeout).unwrap()
    }

    pub fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_search_posts_composed_query_to_index() -> Result<()> {
    let server = MockServer::start().await;
    let query = build(&raw(&[("q", "tax"), ("page", "2"), ("size", "5")]));

    Mock::given(method("POST"))
        .and(path("/korea-policy-news-*/_search"))
        .and(body_json(json!({
            "query": {
                "bool": {
                    "must": [{
                        "multi_match": {
                            "query": "tax",
                            "fields": ["title", "contents", "subtitles", "publisher", "tags"]
                        }
                    }],
                    "filter": []
                }
            },
            "sort": [{ "published_at": { "order": "desc" } }],
            "from": 5,
            "size": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "total": { "value": 0, "relation": "eq" }, "hits": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server, Duration::from_secs(5));
    let response = engine.search(&query).await?;
    assert_eq!(response["hits"]["total"]["value"], 0);
    Ok(())
}

#[tokio::test]
async fn test_rejected_query_surfaces_status_and_body() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"error":{"type":"index_not_found_exception"}}"#),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server, Duration::from_secs(5));
    let err = engine.search(&build(&HashMap::new())).await.unwrap_err();
    match &err {
        EngineError::Rejected { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("index_not_found_exception"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("404"));
    Ok(())
}

#[tokio::test]
async fn test_slow_engine_times_out() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "hits": { "total": 0, "hits": [] } }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server, Duration::from_millis(100));
    let err = engine.search(&build(&HashMap::new())).await.unwrap_err();
    assert!(matches!(err, EngineError::Timeout), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_non_json_reply_is_a_decode_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let engine = engine_for(&server, Duration::from_secs(5));
    let err = engine.search(&build(&HashMap::new())).await.unwrap_err();
    assert!(matches!(err, EngineError::Decode(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_ping() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tagline": "You Know, for Search" })))
        .mount(&server)
        .await;

    engine_for(&server, Duration::from_secs(5)).ping().await?;

    let unreachable = EngineClient::new("http://127.0.0.1:1", TEST_INDEX, Duration::from_secs(1))?;
    assert!(unreachable.ping().await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_news_search_end_to_end() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/korea-policy-news-*/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "took": 3,
            "hits": {
                "total": { "value": 42, "relation": "eq" },
                "hits": [
                    { "_id": "2", "_source": { "title": "Newer", "published_at": "2024-05-02" } },
                    { "_id": "1", "_source": { "title": "Older", "published_at": "2024-05-01" } }
                ]
            }
        })))
        .mount(&server)
        .await;

    let news = NewsSearch::new(engine_for(&server, Duration::from_secs(5)));
    let envelope = news.search(&raw(&[("page", "0"), ("size", "2")])).await?;

    assert_eq!(envelope.total, 42);
    assert_eq!(envelope.page, 1);
    assert_eq!(envelope.size, 2);
    let titles: Vec<&str> = envelope
        .data
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
    Ok(())
}
