//! Thermal handlers for fan speed, temperature and CPU usage queries
//!
//! Each handler runs exactly one bridge query on the blocking pool. When the
//! thermal service is unavailable or a HAL call fails, the bridge answers
//! with an empty list and the handler still replies with success.

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::{api_fail, api_ok};
use axum::{
    extract::{Query, State},
    Json,
};
use hwprops_core::api::{
    ApiResponse, CpuUsagesResponse, DeviceTemperaturesResponse, FanSpeedsResponse,
};
use hwprops_core::{HwPropsError, TemperatureSource, TemperatureType};
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;

/// Query parameters for the temperature endpoint.
#[derive(Deserialize)]
pub(crate) struct TemperatureQuery {
    /// Device type, by name or HAL integer
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Value to report, by name or integer (0-3)
    pub source: Option<String>,
}

/// Parse a required query parameter.
fn required<T>(name: &str, value: Option<&str>) -> Result<T, ApiError>
where
    T: FromStr<Err = String>,
{
    let Some(value) = value else {
        return api_fail!(format!("Missing '{}' parameter", name));
    };
    value
        .parse::<T>()
        .map_err(|e| HwPropsError::InvalidInput(e).into())
}

/// Retrieve the current speed of every cooling device.
///
/// # Endpoint
///
/// `GET /api/v0/fans`
///
/// # Returns
///
/// - `speeds` - One value per cooling device, in HAL order. Empty when the
///   thermal service is unavailable or the HAL call failed.
pub(crate) async fn get_fan_speeds(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FanSpeedsResponse>>, ApiError> {
    debug!("Request: GET /api/v0/fans");

    let speeds = state.query(|properties| properties.fan_speeds()).await?;
    debug!("Fan speeds: {:?}", speeds);

    api_ok!(FanSpeedsResponse::new(speeds))
}

/// Retrieve temperatures of one device type.
///
/// # Endpoint
///
/// `GET /api/v0/temperatures?type=cpu&source=current`
///
/// # Query Parameters
///
/// - `type` - `unknown`, `cpu`, `gpu`, `battery`, `skin` or `-1`..`3`
/// - `source` - `current`, `throttling`, `shutdown`,
///   `throttling-below-vr-min` or `0`..`3`
///
/// # Returns
///
/// - `values` - One value per matching sensor, in HAL order. Thresholds the
///   HAL does not know are `null`.
pub(crate) async fn get_device_temperatures(
    State(state): State<AppState>,
    Query(params): Query<TemperatureQuery>,
) -> Result<Json<ApiResponse<DeviceTemperaturesResponse>>, ApiError> {
    debug!("Request: GET /api/v0/temperatures");

    let kind: TemperatureType = required("type", params.kind.as_deref())?;
    let source: TemperatureSource = required("source", params.source.as_deref())?;

    let values = state
        .query(move |properties| properties.device_temperatures(kind, source))
        .await?;
    debug!("Temperatures for type={} source={}: {:?}", kind, source, values);

    api_ok!(DeviceTemperaturesResponse::new(kind, source, values))
}

/// Retrieve usage of every CPU.
///
/// # Endpoint
///
/// `GET /api/v0/cpu/usages`
///
/// # Returns
///
/// - `usages` - One entry per CPU in HAL order; offline CPUs are `null`.
pub(crate) async fn get_cpu_usages(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CpuUsagesResponse>>, ApiError> {
    debug!("Request: GET /api/v0/cpu/usages");

    let usages = state.query(|properties| properties.cpu_usages()).await?;

    api_ok!(CpuUsagesResponse { usages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{demo_router, disconnected_router, get_json, router_with};
    use axum::http::StatusCode;
    use hwprops_hal::{ExceptionCode, Fault, FixtureThermal, ThermalFixture};
    use serde_json::json;

    #[test]
    fn test_required_param() {
        let kind: TemperatureType = required("type", Some("gpu")).unwrap();
        assert_eq!(kind, TemperatureType::Gpu);

        let source: TemperatureSource = required("source", Some("2")).unwrap();
        assert_eq!(source, TemperatureSource::Shutdown);

        let err = required::<TemperatureType>("type", None).unwrap_err();
        assert_eq!(err.status_code, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("'type'"));

        let err = required::<TemperatureSource>("source", Some("7")).unwrap_err();
        assert_eq!(err.status_code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fan_speeds() {
        let (status, json) = get_json(demo_router(), "/api/v0/fans").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["speeds"], json!([1200.0, 850.0]));
    }

    #[tokio::test]
    async fn test_fan_speeds_unreadable_is_null() {
        let fixture = ThermalFixture::from_toml(
            r#"
[[cooling_devices]]
type = "fan_rpm"
name = "cpu_fan"
current_value = 1200.0

[[cooling_devices]]
type = "fan_rpm"
name = "stalled_sensor"
current_value = nan
"#,
        )
        .unwrap();
        let (status, json) = get_json(router_with(fixture), "/api/v0/fans").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["speeds"], json!([1200.0, null]));
    }

    #[tokio::test]
    async fn test_fan_speeds_disconnected_is_empty() {
        let (status, json) = get_json(disconnected_router(), "/api/v0/fans").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["speeds"], json!([]));
    }

    #[tokio::test]
    async fn test_temperatures_by_name() {
        let (status, json) = get_json(demo_router(), "/api/v0/temperatures?type=cpu&source=current").await;

        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["type"], "cpu");
        assert_eq!(data["source"], "current");
        assert_eq!(data["values"], json!([45.5, 47.0]));
    }

    #[tokio::test]
    async fn test_temperatures_by_integer() {
        // 3 = skin, 1 = throttling threshold
        let (status, json) = get_json(demo_router(), "/api/v0/temperatures?type=3&source=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["type"], "skin");
        assert_eq!(json["data"]["values"], json!([40.0]));
    }

    #[tokio::test]
    async fn test_temperatures_unknown_threshold_is_null() {
        let (_, json) = get_json(
            demo_router(),
            "/api/v0/temperatures?type=battery&source=throttling",
        )
        .await;

        assert_eq!(json["data"]["values"], json!([null]));
    }

    #[tokio::test]
    async fn test_temperatures_no_matching_sensor() {
        let (status, json) = get_json(demo_router(), "/api/v0/temperatures?type=unknown&source=0").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["values"], json!([]));
    }

    #[tokio::test]
    async fn test_temperatures_invalid_type() {
        let (status, json) = get_json(demo_router(), "/api/v0/temperatures?type=modem&source=current").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert!(json["error"].as_str().unwrap().contains("modem"));
    }

    #[tokio::test]
    async fn test_temperatures_missing_source() {
        let (status, json) = get_json(demo_router(), "/api/v0/temperatures?type=cpu").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("source"));
    }

    #[tokio::test]
    async fn test_temperatures_hal_failure_is_empty() {
        let mut fixture = FixtureThermal::demo().fixture().clone();
        fixture.faults.temperatures = Some(Fault::Status {
            debug_message: "sensor bus offline".to_string(),
        });

        let (status, json) = get_json(
            router_with(fixture),
            "/api/v0/temperatures?type=cpu&source=current",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["values"], json!([]));
    }

    #[tokio::test]
    async fn test_cpu_usages_offline_is_null() {
        let (status, json) = get_json(demo_router(), "/api/v0/cpu/usages").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["data"]["usages"],
            json!([
                {"active": 15000, "total": 40000},
                {"active": 12500, "total": 40000},
                null,
                {"active": 9800, "total": 40000}
            ])
        );
    }

    #[tokio::test]
    async fn test_cpu_usages_transport_failure_is_empty() {
        let fixture = ThermalFixture {
            faults: hwprops_hal::Faults {
                cpu_usages: Some(Fault::Transport {
                    code: ExceptionCode::TransactionFailed,
                    message: "dead object".to_string(),
                    after_reply: false,
                }),
                ..Default::default()
            },
            ..FixtureThermal::demo().fixture().clone()
        };

        let (status, json) = get_json(router_with(fixture), "/api/v0/cpu/usages").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["usages"], json!([]));
    }
}
