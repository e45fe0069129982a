//! HTTP endpoint for tracking lookups.
//!
//! `POST /api/tracking` with `{ "trackingNumber": "..." }` answers with a
//! [`TrackingSnapshot`]. Failures use the same shape with only `error` set.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::models::TrackingSnapshot;
use crate::services::TrackingService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TrackingService>,
}

/// Request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(default)]
    pub tracking_number: Option<String>,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/tracking",
            post(track).fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn track(
    State(state): State<AppState>,
    body: Result<Json<TrackRequest>, JsonRejection>,
) -> impl IntoResponse {
    let raw = match body {
        Ok(Json(request)) => request.tracking_number.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable tracking request body");
            String::new()
        }
    };

    match state.service.track(&raw).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "tracking lookup failed");
            } else {
                tracing::info!(error = %e, "tracking request rejected");
            }
            let message = state.service.user_message(&e);
            (status, Json(TrackingSnapshot::failed(message)))
        }
    }
}

async fn method_not_allowed(State(state): State<AppState>) -> impl IntoResponse {
    let message = state.service.locale().messages.method_not_allowed.clone();
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(axum::http::header::ALLOW, "POST")],
        Json(TrackingSnapshot::failed(message)),
    )
}

/// HTTP status for a failed lookup.
pub fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::Fetch(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    use super::*;
    use crate::error::FetchError;
    use crate::models::LocaleConfig;
    use crate::services::tracking::tests::StubFetcher;

    fn app(fetcher: Arc<StubFetcher>) -> Router {
        let service = TrackingService::new(fetcher, LocaleConfig::default(), 1);
        build_app(AppState {
            service: Arc::new(service),
        })
    }

    async fn send(app: Router, method: Method, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/api/tracking")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_post_returns_snapshot() {
        let fetcher = Arc::new(StubFetcher::html(
            r#"<h1>Livré à domicile</h1><span class="city">Nantes</span>"#,
        ));
        let (status, json) = send(
            app(fetcher),
            Method::POST,
            r#"{"trackingNumber":"lp123fr"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["trackingNumber"], "LP123FR");
        assert_eq!(json["status"], "Livré à domicile");
        assert_eq!(json["location"], "Nantes");
        assert_eq!(json["carrier"], "Transporteur inconnu");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_blank_number_is_bad_request_without_fetch() {
        let fetcher = Arc::new(StubFetcher::html("<h1>Livré</h1>"));
        let (status, json) = send(
            app(Arc::clone(&fetcher)),
            Method::POST,
            r#"{"trackingNumber":"   "}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Veuillez entrer un numéro de suivi");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_or_malformed_body_is_bad_request() {
        let fetcher = Arc::new(StubFetcher::html("<h1>Livré</h1>"));

        let (status, _) = send(app(Arc::clone(&fetcher)), Method::POST, "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(app(Arc::clone(&fetcher)), Method::POST, "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Veuillez entrer un numéro de suivi");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_gateway_timeout() {
        let fetcher = Arc::new(StubFetcher::failing(FetchError::Timeout(
            Duration::from_secs(15),
        )));
        let (status, json) = send(
            app(fetcher),
            Method::POST,
            r#"{"trackingNumber":"lp123fr"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(json["error"], "Erreur lors de la récupération du suivi");
        assert_eq!(json["trackingNumber"], "");
        assert_eq!(json["status"], "");
        assert_eq!(json["location"], "");
        assert_eq!(json["carrier"], "");
        assert_eq!(json["estimatedDelivery"], "");
        assert_eq!(json["events"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_upstream_status_hides_details() {
        let fetcher = Arc::new(StubFetcher::failing(FetchError::Status {
            status: 503,
            url: "https://aggregator.example/t/LP1".to_string(),
        }));
        let (status, json) = send(
            app(fetcher),
            Method::POST,
            r#"{"trackingNumber":"lp1"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let error = json["error"].as_str().unwrap();
        assert!(!error.contains("503"));
        assert!(!error.contains("aggregator.example"));
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let fetcher = Arc::new(StubFetcher::html("<h1>Livré</h1>"));
        let (status, json) = send(app(Arc::clone(&fetcher)), Method::GET, "").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json["error"], "Méthode non autorisée");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_status_for_fetch_timeout() {
        assert_eq!(
            status_for(&AppError::Fetch(FetchError::Timeout(Duration::from_secs(2)))),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_status_for_other_errors() {
        assert_eq!(
            status_for(&AppError::config("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&AppError::Fetch(FetchError::Network("reset".to_string()))),
            StatusCode::BAD_GATEWAY
        );
    }
}
