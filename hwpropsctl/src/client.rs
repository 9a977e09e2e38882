//! HTTP client for communicating with the hwprops server.

use anyhow::{Context, Result};
use hwprops_core::api;
use hwprops_core::{TemperatureSource, TemperatureType};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

/// Normalize a server URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// HTTP client for the hwpropsd REST API.
///
/// # Retry Logic
///
/// Requests that fail before a response arrives (connection refused,
/// timeouts) are retried with a linear backoff: the delay before retry `n`
/// is `retry_delay * n`. HTTP error statuses and API error responses are
/// returned immediately.
///
/// # Examples
///
/// ```no_run
/// use hwpropsctl::client::HwPropsClient;
/// use std::time::Duration;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = HwPropsClient::with_config(
///     "http://localhost:3000".to_string(),
///     10,  // timeout in seconds
///     3,   // max retries
///     Duration::from_millis(500),  // initial retry delay
/// )?;
///
/// let speeds = client.get_fan_speeds().await?;
/// println!("{} fans", speeds.speeds.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HwPropsClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl HwPropsClient {
    /// Create a new client with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `server_url` - Base URL of the server (e.g., "http://localhost:3000")
    /// * `timeout_secs` - Request timeout in seconds
    /// * `max_retries` - Maximum number of retry attempts for failed requests
    /// * `retry_delay` - Delay unit between retries
    pub fn with_config(
        server_url: String,
        timeout_secs: u64,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("hwpropsctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_url(&server_url),
            max_retries,
            retry_delay,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Process an HTTP response and extract the API data.
    async fn handle_response<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", endpoint))?;

        if !status.is_success() {
            // Prefer the message from the API error envelope when there is one
            let detail = match serde_json::from_str::<api::ApiResponse<serde_json::Value>>(&text) {
                Ok(api::ApiResponse::Error { error }) => error,
                _ => text,
            };
            let error_msg = match status {
                StatusCode::NOT_FOUND => format!("Endpoint {} not found", endpoint),
                StatusCode::BAD_REQUEST => format!("Bad request to {}: {}", endpoint, detail),
                StatusCode::INTERNAL_SERVER_ERROR => {
                    format!("Server error at {}: {}", endpoint, detail)
                }
                StatusCode::SERVICE_UNAVAILABLE => format!("Service unavailable at {}", endpoint),
                _ => format!("HTTP {} error at {}: {}", status, endpoint, detail),
            };
            return Err(anyhow::anyhow!(error_msg));
        }

        let api_response: api::ApiResponse<T> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response from {}", endpoint))?;

        match api_response {
            api::ApiResponse::Success { data } => Ok(data),
            api::ApiResponse::Error { error } => {
                Err(anyhow::anyhow!("Server error at {}: {}", endpoint, error))
            }
        }
    }

    /// Execute an HTTP request with automatic retry logic.
    ///
    /// Only connection-related errors are retried.
    async fn execute_with_retry<F, Fut, T>(&self, endpoint: &str, request_fn: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<Response, reqwest::Error>>,
        T: DeserializeOwned,
    {
        let mut attempt = 0;

        loop {
            match request_fn().await {
                Ok(response) => {
                    return Self::handle_response(response, endpoint).await;
                }
                Err(e) => {
                    let should_retry = e.is_connect() || e.is_timeout() || e.is_request();

                    if attempt < self.max_retries && should_retry {
                        attempt += 1;
                        tokio::time::sleep(self.retry_delay * attempt).await;
                        continue;
                    }

                    return Err(anyhow::anyhow!(
                        "Failed to reach {} after {} attempts: {}",
                        endpoint,
                        attempt + 1,
                        e
                    ));
                }
            }
        }
    }

    /// Retrieve system information from the server.
    pub async fn get_info(&self) -> Result<api::InfoResponse> {
        let url = format!("{}/api/v0/info", self.base_url);
        let endpoint = "info";

        self.execute_with_retry(endpoint, || self.client.get(&url).send())
            .await
    }

    /// Retrieve the current speed of every cooling device.
    pub async fn get_fan_speeds(&self) -> Result<api::FanSpeedsResponse> {
        let url = format!("{}/api/v0/fans", self.base_url);
        let endpoint = "fans";

        self.execute_with_retry(endpoint, || self.client.get(&url).send())
            .await
    }

    /// Retrieve temperatures of one device type.
    ///
    /// # Arguments
    ///
    /// * `kind` - Device type to filter on
    /// * `source` - Which value of each sensor to report
    pub async fn get_device_temperatures(
        &self,
        kind: TemperatureType,
        source: TemperatureSource,
    ) -> Result<api::DeviceTemperaturesResponse> {
        let url = format!(
            "{}/api/v0/temperatures?type={}&source={}",
            self.base_url,
            kind.name(),
            source.name()
        );
        let endpoint = "temperatures";

        self.execute_with_retry(endpoint, || self.client.get(&url).send())
            .await
    }

    /// Retrieve usage of every CPU.
    pub async fn get_cpu_usages(&self) -> Result<api::CpuUsagesResponse> {
        let url = format!("{}/api/v0/cpu/usages", self.base_url);
        let endpoint = "cpu/usages";

        self.execute_with_retry(endpoint, || self.client.get(&url).send())
            .await
    }

    /// Check whether the server root answers, without retrying.
    pub async fn ping(&self) -> Result<bool> {
        let url = format!("{}/", self.base_url);

        // Use a shorter timeout for ping
        let client = Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .context("Failed to create ping client")?;

        match client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Check connectivity and API health.
    ///
    /// # Returns
    ///
    /// Returns a map containing:
    /// - `connected` - Whether the server is reachable
    /// - `ping_ms` - Response time in milliseconds
    /// - `api_working` - Whether the info endpoint responds (if connected)
    /// - `server_version` - Server version string (if API is working)
    /// - `hal_connected` - Whether the thermal service is available (if API is working)
    /// - `api_error` - Error message if the API check fails
    pub async fn health_check(&self) -> Result<BTreeMap<String, serde_json::Value>> {
        let mut health = BTreeMap::new();

        let ping_start = std::time::Instant::now();
        let ping_success = self.ping().await?;
        let ping_duration = ping_start.elapsed();

        health.insert(
            "connected".to_string(),
            serde_json::Value::Bool(ping_success),
        );
        health.insert(
            "ping_ms".to_string(),
            serde_json::Value::Number(serde_json::Number::from(ping_duration.as_millis() as u64)),
        );

        if ping_success {
            match self.get_info().await {
                Ok(info) => {
                    health.insert("api_working".to_string(), serde_json::Value::Bool(true));
                    health.insert(
                        "server_version".to_string(),
                        serde_json::Value::String(info.version),
                    );
                    health.insert(
                        "hal_connected".to_string(),
                        serde_json::Value::Bool(info.hal_connected),
                    );
                }
                Err(e) => {
                    health.insert("api_working".to_string(), serde_json::Value::Bool(false));
                    health.insert(
                        "api_error".to_string(),
                        serde_json::Value::String(e.to_string()),
                    );
                }
            }
        }

        Ok(health)
    }
}
