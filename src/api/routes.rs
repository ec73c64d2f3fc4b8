//! HTTP routes and handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::types::{DistanceQuery, DistanceResponse, ErrorResponse, HealthResponse};
use crate::agent::Agent;

/// Shared application state. Immutable after startup.
pub struct AppState {
    pub agent: Arc<Agent>,
}

impl AppState {
    pub fn new(agent: Arc<Agent>) -> Self {
        Self { agent }
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/calculate-distance", post(calculate_distance))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn internal_error(detail: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { detail }),
    )
        .into_response()
}

/// POST /calculate-distance
async fn calculate_distance(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DistanceQuery>, JsonRejection>,
) -> Result<Json<DistanceResponse>, Response> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Rejected request body: {}", e);
        internal_error(e.body_text())
    })?;

    tracing::info!("Distance query: {}", request.query);

    match state.agent.run(&request.query).await {
        Ok(result) => Ok(Json(DistanceResponse {
            response: result.final_output,
        })),
        Err(e) => {
            tracing::error!("Agent run failed: {}", e);
            Err(internal_error(e.to_string()))
        }
    }
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatMessage, ChatResponse, FunctionCall, LlmClient, Role, ToolCall, ToolSchema};
    use crate::maps::{DistanceLookup, MapsError, TravelEstimate};
    use crate::tools::{CalculateDistance, ToolRegistry};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    /// Asks for the NY -> LA distance once, then repeats the tool output.
    struct RelayLlm;

    #[async_trait]
    impl LlmClient for RelayLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            messages: &[ChatMessage],
            _tools: Option<&[ToolSchema]>,
        ) -> anyhow::Result<ChatResponse> {
            let query = messages
                .iter()
                .find(|m| m.role == Role::User)
                .and_then(|m| m.content.clone())
                .unwrap_or_default();
            if query.contains("backend down") {
                return Err(anyhow::anyhow!("LLM API error (503): upstream unavailable"));
            }
            match messages.iter().rev().find(|m| m.role == Role::Tool) {
                None => Ok(ChatResponse {
                    content: None,
                    tool_calls: Some(vec![ToolCall {
                        id: "call_1".to_string(),
                        call_type: "function".to_string(),
                        function: FunctionCall {
                            name: "calculate_distance".to_string(),
                            arguments: json!({
                                "origin": "New York",
                                "destination": "Los Angeles"
                            })
                            .to_string(),
                        },
                    }]),
                }),
                Some(tool_msg) => Ok(ChatResponse {
                    content: Some(format!(
                        "Here is what I found: {}",
                        tool_msg.content.clone().unwrap_or_default()
                    )),
                    tool_calls: None,
                }),
            }
        }
    }

    struct MockMaps {
        fail: bool,
    }

    #[async_trait]
    impl DistanceLookup for MockMaps {
        async fn distance(&self, _: &str, _: &str) -> Result<TravelEstimate, MapsError> {
            if self.fail {
                return Err(MapsError::NoRoute {
                    status: "ZERO_RESULTS".to_string(),
                });
            }
            Ok(TravelEstimate {
                distance: "3,936 km".to_string(),
                duration: "1 day 15 hours".to_string(),
            })
        }
    }

    async fn spawn_app(fail_lookup: bool) -> (String, tokio::sync::oneshot::Sender<()>) {
        let tools = ToolRegistry::new()
            .with_tool(Arc::new(CalculateDistance::new(Arc::new(MockMaps { fail: fail_lookup }))));
        let agent = Agent::new(Arc::new(RelayLlm), tools, "test-model", 5);
        let app = router(Arc::new(AppState::new(Arc::new(agent))));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local_addr");
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        tokio::spawn(async move { server.await });
        (format!("http://{addr}"), shutdown_tx)
    }

    fn assert_one_of_response_or_detail(body: &Value) {
        let obj = body.as_object().expect("object body");
        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key("response") ^ obj.contains_key("detail"));
    }

    #[tokio::test]
    async fn answers_with_distance_and_duration() {
        let (base, shutdown) = spawn_app(false).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/calculate-distance"))
            .json(&json!({ "query": "distance between New York and Los Angeles" }))
            .send()
            .await
            .expect("request");

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let body: Value = resp.json().await.expect("json");
        assert_one_of_response_or_detail(&body);
        let text = body["response"].as_str().expect("response text");
        assert!(text.contains("3,936 km"));
        assert!(text.contains("1 day 15 hours"));
        let _ = shutdown.send(());
    }

    #[tokio::test]
    async fn lookup_failure_still_returns_ok() {
        let (base, shutdown) = spawn_app(true).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/calculate-distance"))
            .json(&json!({ "query": "distance between Hawaii and Tokyo" }))
            .send()
            .await
            .expect("request");

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let body: Value = resp.json().await.expect("json");
        assert_one_of_response_or_detail(&body);
        assert!(body["response"]
            .as_str()
            .expect("response text")
            .contains("Error calculating distance: No route found (ZERO_RESULTS)"));
        let _ = shutdown.send(());
    }

    #[tokio::test]
    async fn runtime_failure_is_500_with_detail() {
        let (base, shutdown) = spawn_app(false).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/calculate-distance"))
            .json(&json!({ "query": "backend down?" }))
            .send()
            .await
            .expect("request");

        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = resp.json().await.expect("json");
        assert_one_of_response_or_detail(&body);
        assert_eq!(body["detail"], "LLM API error (503): upstream unavailable");
        let _ = shutdown.send(());
    }

    #[tokio::test]
    async fn malformed_body_is_500_with_detail() {
        let (base, shutdown) = spawn_app(false).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/calculate-distance"))
            .json(&json!({ "question": "no query field" }))
            .send()
            .await
            .expect("request");

        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = resp.json().await.expect("json");
        assert_one_of_response_or_detail(&body);
        assert!(body["detail"].as_str().expect("detail").contains("query"));
        let _ = shutdown.send(());
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (base, shutdown) = spawn_app(false).await;
        let body: HealthResponse = reqwest::get(format!("{base}/health"))
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        let _ = shutdown.send(());
    }
}
