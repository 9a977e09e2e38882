//! API module for the hwprops daemon
//!
//! Contains the REST API implementation with Axum router and handlers.

pub(crate) mod handlers;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use hwprops_hal::HardwareProperties;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use error::ApiError;

/// Application state shared across all handlers
#[derive(Clone)]
pub(crate) struct AppState {
    /// Bridge to the thermal HAL
    pub properties: Arc<HardwareProperties>,
    /// Whether the built-in demo data set is served
    pub mock_mode: bool,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(properties: HardwareProperties, mock_mode: bool) -> Self {
        Self {
            properties: Arc::new(properties),
            mock_mode,
            start_time: Instant::now(),
        }
    }

    /// Run a bridge query on the blocking pool.
    ///
    /// HAL calls are synchronous remote round-trips and must not stall the
    /// async workers.
    pub async fn query<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&HardwareProperties) -> T + Send + 'static,
        T: Send + 'static,
    {
        let properties = Arc::clone(&self.properties);
        tokio::task::spawn_blocking(move || f(properties.as_ref()))
            .await
            .map_err(|e| ApiError::internal_error(format!("Thermal query task failed: {}", e)))
    }
}

/// Create the main API router with all endpoints
pub(crate) fn create_router(state: AppState) -> Router {
    info!("Setting up API router...");

    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET])
        .allow_headers(tower_http::cors::Any);

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Router::new()
        // Thermal queries
        .route("/api/v0/fans", get(handlers::thermal::get_fan_speeds))
        .route(
            "/api/v0/temperatures",
            get(handlers::thermal::get_device_temperatures),
        )
        .route("/api/v0/cpu/usages", get(handlers::thermal::get_cpu_usages))
        // System info endpoint
        .route("/api/v0/info", get(handlers::info::get_info))
        // Root endpoint
        .route("/", get(handlers::info::root))
        .layer(middleware_stack)
        .with_state(state)
}

/// Error handling utilities
pub(crate) mod error {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use hwprops_core::{api::ApiResponse, HwPropsError};

    use tracing::error;

    /// Custom error type for API responses
    #[derive(Debug)]
    pub struct ApiError {
        pub status_code: StatusCode,
        pub message: String,
    }

    impl ApiError {
        /// Create a new API error
        pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
            Self {
                status_code,
                message: message.into(),
            }
        }

        /// Create a bad request error
        pub fn bad_request(message: impl Into<String>) -> Self {
            Self::new(StatusCode::BAD_REQUEST, message)
        }

        /// Create an internal server error
        pub fn internal_error(message: impl Into<String>) -> Self {
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            error!("API Error {}: {}", self.status_code, self.message);

            let response: ApiResponse<()> = ApiResponse::error(self.message);

            (self.status_code, Json(response)).into_response()
        }
    }

    /// Convert HwPropsError to ApiError
    impl From<HwPropsError> for ApiError {
        fn from(err: HwPropsError) -> Self {
            match err {
                HwPropsError::InvalidInput(msg) => Self::bad_request(msg),
                _ => Self::internal_error(err.to_string()),
            }
        }
    }

}

/// Helper macros for common responses
#[macro_export]
macro_rules! api_ok {
    ($data:expr) => {
        Ok(axum::Json(hwprops_core::api::ApiResponse::success($data)))
    };
}

#[macro_export]
macro_rules! api_fail {
    ($message:expr) => {
        Err($crate::api::error::ApiError::bad_request($message))
    };
}
