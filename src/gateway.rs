//! # Request gateway
//!
//! [`ApiService::request`] is the single choke point for every outbound call.
//! It merges caller headers over JSON defaults, serializes the body, enforces
//! the configured deadline, honours cancellation and classifies the response:
//!
//! - `204 No Content` becomes an [`Ack`] without touching the body
//! - any other 2xx is parsed as JSON and handed back untouched
//! - anything else becomes [`ApiError::Http`] carrying the status and parsed body
//!
//! Requests and responses are logged through `tracing`.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::app_system::ApiConfig;
use crate::error::ApiError;

const PAYLOAD_SUMMARY_LIMIT: usize = 200;

/// Synthetic acknowledgment returned for bodiless successes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn no_content() -> Self {
        Self {
            success: true,
            message: "Operation completed successfully".to_string(),
        }
    }
}

/// A successful gateway result.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Ack(Ack),
    Json(Value),
}

impl ApiResponse {
    /// The JSON body, or an error if the server sent none.
    pub fn into_json(self) -> Result<Value, ApiError> {
        match self {
            ApiResponse::Json(value) => Ok(value),
            ApiResponse::Ack(_) => Err(ApiError::Decode("expected a JSON body, got none".into())),
        }
    }
}

/// Per-call options. Defaults to a bodiless GET.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiService {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ApiService {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Issues one request against `base_url + path`.
    #[instrument(skip(self, options, cancel), fields(method = %options.method))]
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let RequestOptions {
            method,
            headers,
            body,
        } = options;

        info!(%method, %url, payload = %summarize_payload(body.as_ref()), "API request");

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .headers(merge_headers(headers));
        if let Some(body) = &body {
            let text = serde_json::to_string(body)
                .map_err(|e| ApiError::Decode(format!("unserializable request body: {e}")))?;
            builder = builder.body(text);
        }

        let exchange = async {
            let response = builder.send().await.map_err(|e| self.transport_error(e))?;
            self.read_response(&url, response).await
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            result = exchange => result,
        };

        if let Err(e) = &result {
            error!(%method, %url, status = ?e.status(), error = %e, "API request failed");
        }
        result
    }

    async fn read_response(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<ApiResponse, ApiError> {
        let status = response.status();
        info!(
            status = status.as_u16(),
            reason = status.canonical_reason().unwrap_or(""),
            %url,
            "API response"
        );

        if !status.is_success() {
            let body = response.text().await.map_err(|e| self.transport_error(e))?;
            return Err(ApiError::from_response(status.as_u16(), &body));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(ApiResponse::Ack(Ack::no_content()));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&body)
            .map(ApiResponse::Json)
            .map_err(|e| ApiError::Decode(format!("invalid JSON body: {e}")))
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// JSON defaults first, caller headers win.
fn merge_headers(overrides: HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    for (name, value) in overrides.iter() {
        headers.insert(name.clone(), value.clone());
    }
    headers
}

fn summarize_payload(body: Option<&Value>) -> String {
    let Some(body) = body else {
        return "No body".to_string();
    };
    let text = body.to_string();
    if text.chars().count() <= PAYLOAD_SUMMARY_LIMIT {
        text
    } else {
        let head: String = text.chars().take(PAYLOAD_SUMMARY_LIMIT).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::INTERNAL_SERVER_ERROR_MESSAGE;
    use crate::http_stub::{spawn_stub, StubReply};
    use serde_json::json;

    fn service(base_url: &str, timeout: Duration) -> ApiService {
        let config = ApiConfig::default()
            .with_base_url(base_url)
            .unwrap()
            .with_timeout(timeout)
            .unwrap();
        ApiService::new(&config).unwrap()
    }

    #[tokio::test]
    async fn sends_json_defaults_and_serialized_body() {
        let stub = spawn_stub(|_| StubReply::json(201, json!({ "id": 9 }))).await;
        let api = service(&stub.base_url, Duration::from_secs(5));

        let reply = api
            .request(
                "/products",
                RequestOptions::post(json!({ "productName": "Whisky" })),
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(reply, ApiResponse::Json(json!({ "id": 9 })));

        let captured = stub.requests();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].method, "POST");
        assert_eq!(captured[0].path, "/products");
        assert_eq!(captured[0].header("content-type"), Some("application/json"));
        assert_eq!(captured[0].header("accept"), Some("application/json"));
        assert_eq!(captured[0].json(), json!({ "productName": "Whisky" }));
    }

    #[tokio::test]
    async fn caller_headers_override_defaults() {
        let stub = spawn_stub(|_| StubReply::json(200, json!([]))).await;
        let api = service(&stub.base_url, Duration::from_secs(5));

        let options = RequestOptions::get()
            .with_header(ACCEPT, HeaderValue::from_static("text/plain"))
            .with_header(
                HeaderName::from_static("x-request-source"),
                HeaderValue::from_static("tests"),
            );
        api.request("/orders", options, &CancellationToken::new())
            .await
            .unwrap();

        let captured = stub.requests();
        assert_eq!(captured[0].method, "GET");
        assert_eq!(captured[0].header("accept"), Some("text/plain"));
        assert_eq!(captured[0].header("content-type"), Some("application/json"));
        assert_eq!(captured[0].header("x-request-source"), Some("tests"));
        assert!(captured[0].body.is_empty());
    }

    #[tokio::test]
    async fn no_content_yields_ack_without_parsing() {
        let stub = spawn_stub(|_| StubReply::empty(204)).await;
        let api = service(&stub.base_url, Duration::from_secs(5));

        let reply = api
            .request("/customers/2", RequestOptions::delete(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(reply, ApiResponse::Ack(Ack::no_content()));
        assert_eq!(stub.requests()[0].method, "DELETE");
    }

    #[tokio::test]
    async fn error_status_is_carried_unchanged() {
        for status in [400u16, 404, 409, 422, 503] {
            let stub = spawn_stub(move |_| {
                StubReply::json(status, json!({ "message": "rechazado" }))
            })
            .await;
            let api = service(&stub.base_url, Duration::from_secs(5));

            let err = api
                .request("/suppliers", RequestOptions::get(), &CancellationToken::new())
                .await
                .unwrap_err();
            assert_eq!(err.status(), Some(status));
            assert_eq!(err.to_string(), "rechazado");
        }
    }

    #[tokio::test]
    async fn server_error_is_rewritten() {
        let stub = spawn_stub(|_| StubReply::text(500, "stack trace here")).await;
        let api = service(&stub.base_url, Duration::from_secs(5));

        let err = api
            .request("/products", RequestOptions::get(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), INTERNAL_SERVER_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn invalid_success_body_is_a_decode_error() {
        let stub = spawn_stub(|_| StubReply::text(200, "not-json")).await;
        let api = service(&stub.base_url, Duration::from_secs(5));

        let err = api
            .request("/products", RequestOptions::get(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn configured_timeout_is_enforced() {
        let stub = spawn_stub(|_| {
            StubReply::json(200, json!([])).delayed(Duration::from_secs(5))
        })
        .await;
        let api = service(&stub.base_url, Duration::from_millis(100));

        let err = api
            .request("/products", RequestOptions::get(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Timeout(Duration::from_millis(100)));
    }

    #[tokio::test]
    async fn cancellation_aborts_in_flight_request() {
        let stub = spawn_stub(|_| {
            StubReply::json(200, json!([])).delayed(Duration::from_secs(5))
        })
        .await;
        let api = service(&stub.base_url, Duration::from_secs(30));

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = api
            .request("/products", RequestOptions::get(), &cancel)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Cancelled);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let api = service("http://127.0.0.1:9", Duration::from_secs(5));
        let err = api
            .request("/products", RequestOptions::get(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn payload_summary_is_bounded() {
        assert_eq!(summarize_payload(None), "No body");
        let long = json!({ "productName": "x".repeat(500) });
        let summary = summarize_payload(Some(&long));
        assert_eq!(summary.chars().count(), PAYLOAD_SUMMARY_LIMIT + 1);
        assert!(summary.ends_with('…'));
    }
}
