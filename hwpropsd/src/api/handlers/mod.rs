//! API request handlers for the hwprops daemon REST API.
//!
//! # Handler Modules
//!
//! - [`info`] - System information and root endpoint
//! - [`thermal`] - Fan speeds, device temperatures and CPU usages
//!
//! All handlers accept `State<AppState>` and return
//! `Result<Json<ApiResponse<T>>, ApiError>`, built with `api_ok!()` and
//! `api_fail!()`.
//!
//! A missing thermal service is not an error at this layer: the bridge
//! answers with empty lists and the handlers pass them through.

pub mod info;
pub mod thermal;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::{create_router, AppState};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use hwprops_hal::{FixtureThermal, HardwareProperties, ThermalFixture};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Router backed by the given fixture
    pub fn router_with(fixture: ThermalFixture) -> Router {
        let properties =
            HardwareProperties::with_service("thermal", Arc::new(FixtureThermal::new(fixture)));
        create_router(AppState::new(properties, false))
    }

    /// Router backed by the demo data set, in mock mode
    pub fn demo_router() -> Router {
        let properties = HardwareProperties::with_service("thermal", Arc::new(FixtureThermal::demo()));
        create_router(AppState::new(properties, true))
    }

    /// Router whose bridge holds no service
    pub fn disconnected_router() -> Router {
        create_router(AppState::new(HardwareProperties::new("thermal"), false))
    }

    /// GET `uri` and return the status and parsed JSON body
    pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
