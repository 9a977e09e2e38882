//! Test utilities for CLI testing
//!
//! Provides an in-process mock of the hwpropsd REST API.

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use hwprops_core::api::{
    ApiResponse, CpuUsagesResponse, DeviceTemperaturesResponse, FanSpeedsResponse, InfoResponse,
};
use hwprops_core::{CpuUsageInfo, Temperature, TemperatureSource, TemperatureType};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Mock server state
#[derive(Debug, Clone)]
pub struct MockServerState {
    /// Server info
    pub info: Arc<Mutex<InfoResponse>>,
    /// Fan speeds served by `/api/v0/fans`
    pub speeds: Arc<Mutex<Vec<f32>>>,
    /// Sensor records the temperature endpoint filters
    pub temperatures: Arc<Mutex<Vec<Temperature>>>,
    /// CPU usages served by `/api/v0/cpu/usages`
    pub usages: Arc<Mutex<Vec<Option<CpuUsageInfo>>>>,
    /// Answer temperature queries with 400
    pub fail_temperatures: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
}

impl MockServerState {
    /// Number of API requests served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for MockServerState {
    fn default() -> Self {
        let temperature = |kind, name: &str, current, throttling| Temperature {
            kind,
            name: name.to_string(),
            current_value: current,
            throttling_threshold: throttling,
            shutdown_threshold: f32::NAN,
            vr_throttling_threshold: f32::NAN,
        };

        let info = InfoResponse {
            version: "0.1.0-test".to_string(),
            service_name: "thermal".to_string(),
            hal_connected: true,
            mock_mode: true,
            uptime: 3600,
            software: "hwpropsd v0.1.0-test".to_string(),
        };

        Self {
            info: Arc::new(Mutex::new(info)),
            speeds: Arc::new(Mutex::new(vec![1200.0, 850.0])),
            temperatures: Arc::new(Mutex::new(vec![
                temperature(TemperatureType::Cpu, "cpu0", 45.5, 85.0),
                temperature(TemperatureType::Cpu, "cpu1", 47.0, f32::NAN),
                temperature(TemperatureType::Gpu, "gpu0", 52.0, 90.0),
            ])),
            usages: Arc::new(Mutex::new(vec![
                Some(CpuUsageInfo {
                    active: 1500,
                    total: 4000,
                }),
                None,
                Some(CpuUsageInfo {
                    active: 900,
                    total: 4000,
                }),
            ])),
            fail_temperatures: Arc::new(AtomicBool::new(false)),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// Query parameters for the temperature endpoint
#[derive(Debug, Deserialize)]
pub struct TemperatureQuery {
    #[serde(rename = "type")]
    kind: String,
    source: String,
}

/// Mock server implementation
#[derive(Debug)]
pub struct MockServer {
    state: MockServerState,
    port: u16,
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockServer {
    /// Create a new mock server
    pub fn new() -> Self {
        Self {
            state: MockServerState::default(),
            port: 0, // Will be assigned when server starts
        }
    }

    /// Start the mock server and return the address
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = self.create_router();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        self.port = addr.port();

        let server_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        // Give the server a moment to start and verify it's running
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
        }

        Ok((self, server_url))
    }

    /// Get the server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the server state
    pub fn state(&self) -> &MockServerState {
        &self.state
    }

    /// Create the mock server router
    fn create_router(&self) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/api/v0/info", get(info_handler))
            .route("/api/v0/fans", get(fans_handler))
            .route("/api/v0/temperatures", get(temperatures_handler))
            .route("/api/v0/cpu/usages", get(cpu_usages_handler))
            .with_state(self.state.clone())
    }
}

// Handler functions

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    let data = serde_json::json!({
        "service": "hwprops Hardware Properties API Server",
        "status": "ok",
        "version": "0.1.0-test"
    });
    Json(ApiResponse::success(data))
}

async fn info_handler(State(state): State<MockServerState>) -> Json<ApiResponse<InfoResponse>> {
    state.record_request();
    let info = state.info.lock().unwrap().clone();
    Json(ApiResponse::success(info))
}

async fn fans_handler(State(state): State<MockServerState>) -> Json<ApiResponse<FanSpeedsResponse>> {
    state.record_request();
    let speeds = state.speeds.lock().unwrap().clone();
    Json(ApiResponse::success(FanSpeedsResponse::new(speeds)))
}

async fn temperatures_handler(
    State(state): State<MockServerState>,
    Query(params): Query<TemperatureQuery>,
) -> Response {
    state.record_request();

    let bad_request = |message: String| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(message)),
        )
            .into_response()
    };

    if state.fail_temperatures.load(Ordering::SeqCst) {
        return bad_request("Injected failure".to_string());
    }

    let kind = match params.kind.parse::<TemperatureType>() {
        Ok(kind) => kind,
        Err(e) => return bad_request(e),
    };
    let source = match params.source.parse::<TemperatureSource>() {
        Ok(source) => source,
        Err(e) => return bad_request(e),
    };

    let values = state
        .temperatures
        .lock()
        .unwrap()
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| source.select(t))
        .collect();

    Json(ApiResponse::success(DeviceTemperaturesResponse::new(
        kind, source, values,
    )))
    .into_response()
}

async fn cpu_usages_handler(
    State(state): State<MockServerState>,
) -> Json<ApiResponse<CpuUsagesResponse>> {
    state.record_request();
    let usages = state.usages.lock().unwrap().clone();
    Json(ApiResponse::success(CpuUsagesResponse { usages }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_startup() {
        let (server, url) = MockServer::new().start().await.unwrap();

        assert!(server.port() > 0);
        assert!(url.starts_with("http://127.0.0.1:"));

        let response = reqwest::get(&url).await.unwrap();
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn test_temperatures_endpoint_rejects_bad_type() {
        let (_server, url) = MockServer::new().start().await.unwrap();

        let response = reqwest::get(format!("{}/api/v0/temperatures?type=modem&source=0", url))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }
}
