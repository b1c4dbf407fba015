use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use scout::models::request::{AnalyzeRequest, SearchRequest};
use serde_json::Value;

async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let results = state
        .orchestrator
        .search()
        .raw(request.query(), request.num_results)
        .await?;
    Ok(Json(results))
}

async fn search_and_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let analysis = state.orchestrator.analyze_search(request).await?;
    Ok(Json(analysis))
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/search", post(search))
        .route("/search-and-analyze", post(search_and_analyze))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::routes::test_utils::{
        app, post_json, read_json, search_payload, text_response, MockProvider, MockSearch,
    };
    use axum::http::StatusCode;
    use scout::errors::ProviderError;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_search_returns_raw_payload() {
        let provider = MockProvider::default();
        let search = MockSearch::new(search_payload(3));

        let response = app(&provider, &search)
            .oneshot(post_json(
                "/search",
                &json!({"query": "inteligência artificial", "num_results": 3}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body, search_payload(3));
        let titles: Vec<&str> = body["web"]["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Result 1", "Result 2", "Result 3"]);
        assert_eq!(
            search.queries(),
            vec![("inteligência artificial".to_string(), 3)]
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_default_count() {
        let provider = MockProvider::default();
        let search = MockSearch::new(search_payload(3));

        app(&provider, &search)
            .oneshot(post_json("/search", &json!({"query": "rust"})))
            .await
            .unwrap();

        assert_eq!(search.queries(), vec![("rust".to_string(), 5)]);
    }

    #[tokio::test]
    async fn test_search_rejects_invalid_query() {
        let provider = MockProvider::default();
        let search = MockSearch::new(search_payload(3));
        let app = app(&provider, &search);

        for body in [json!({}), json!({"query": ""}), json!({"query": 42})] {
            let response = app.clone().oneshot(post_json("/search", &body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(read_json(response).await, json!({"error": "Invalid query"}));
        }
        assert!(search.queries().is_empty());
    }

    #[tokio::test]
    async fn test_search_provider_failure() {
        let provider = MockProvider::default();
        let search = MockSearch::failing(ProviderError::Timeout("deadline".to_string()));

        let response = app(&provider, &search)
            .oneshot(post_json("/search", &json!({"query": "rust"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(read_json(response).await["error"], json!("TimeoutError"));
    }

    #[tokio::test]
    async fn test_search_and_analyze() {
        let provider = MockProvider::new(vec![text_response("Result 2 is the best match")]);
        let search = MockSearch::new(search_payload(3));

        let response = app(&provider, &search)
            .oneshot(post_json(
                "/search-and-analyze",
                &json!({"query": "rust web frameworks", "num_results": 3, "max_tokens": 200}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["search_results"], search_payload(3));
        assert_eq!(
            body["claude_analysis"],
            text_response("Result 2 is the best match")
        );

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, 200);
        assert!(requests[0].tools.is_empty());
        assert_eq!(search.queries(), vec![("rust web frameworks".to_string(), 3)]);
    }
}
