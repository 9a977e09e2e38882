//! Info handlers for system information and root endpoint

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::api_ok;

use axum::{extract::State, Json};
use hwprops_core::api::{ApiResponse, InfoResponse};
use serde_json::{json, Value};
use tracing::debug;

/// Handle the root endpoint.
///
/// Provide basic service identification and status. Useful for health checks
/// and verifying the API is accessible.
///
/// # Endpoint
///
/// `GET /`
pub(crate) async fn root() -> Result<Json<ApiResponse<Value>>, ApiError> {
    debug!("Request: GET /");

    let data = json!({
        "service": "hwprops Hardware Properties API Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok"
    });

    api_ok!(data)
}

/// Retrieve system information.
///
/// # Endpoint
///
/// `GET /api/v0/info`
///
/// # Returns
///
/// - `version` - Server version
/// - `service_name` - Name the thermal service is looked up under
/// - `hal_connected` - Whether the bridge holds a thermal service handle
/// - `mock_mode` - Whether the built-in demo data set is served
/// - `uptime` - Server uptime in seconds
/// - `software` - Software version information
pub(crate) async fn get_info(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<InfoResponse>>, ApiError> {
    debug!("Request: GET /api/v0/info");

    let info_response = InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        service_name: state.properties.service_name().to_string(),
        hal_connected: state.properties.is_connected(),
        mock_mode: state.mock_mode,
        uptime: state.start_time.elapsed().as_secs(),
        software: format!("hwpropsd v{}", env!("CARGO_PKG_VERSION")),
    };

    api_ok!(info_response)
}
