// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of the PETLIBRO cloud API.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};

use crate::api::{ApiResponse, PetlibroApi, SettingCommand};
use crate::error::ProtocolError;
use crate::state::Payload;

const BASE_INFO_PATH: &str = "/device/device/baseInfo";
const REAL_INFO_PATH: &str = "/device/device/realInfo";
const GRAIN_STATUS_PATH: &str = "/device/data/grainStatus";

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for the PETLIBRO HTTP API.
///
/// The session token is obtained by the caller; this library does not log in.
///
/// # Examples
///
/// ```
/// use petfeed_lib::api::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new()
///     .with_token("a1b2c3")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), HttpConfig::DEFAULT_BASE_URL);
/// assert_eq!(config.token(), Some("a1b2c3"));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpConfig {
    /// Default API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.us.petlibro.com";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration pointing at the default endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom endpoint, e.g. a regional server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the session token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the session token if set.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an [`HttpApi`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not `http(s)://` or the HTTP client
    /// cannot be created.
    pub fn into_client(self) -> Result<HttpApi, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpApi {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            client,
            token: self.token,
        })
    }
}

// ============================================================================
// HttpApi
// ============================================================================

/// HTTP client for the PETLIBRO cloud API.
///
/// Every call is a JSON `POST` answered with an [`ApiResponse`] envelope.
///
/// # Examples
///
/// ```no_run
/// use petfeed_lib::api::{HttpConfig, PetlibroApi};
///
/// # async fn example() -> petfeed_lib::Result<()> {
/// let api = HttpConfig::new().with_token("a1b2c3").into_client()?;
/// let real_info = api.device_real_info("AF0301000000001").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl HttpApi {
    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse, ProtocolError> {
        let url = format!("{}{path}", self.base_url);

        tracing::debug!(url = %url, body = %body, "Sending API request");

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.header("token", token);
        }

        let response = request.send().await.map_err(ProtocolError::Http)?;

        if !response.status().is_success() {
            return Err(ProtocolError::Status {
                status: response.status().as_u16(),
                reason: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
            });
        }

        let text = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %text, "Received API response");

        Ok(serde_json::from_str(&text)?)
    }

    async fn fetch_section(
        &self,
        path: &str,
        serial: &str,
    ) -> Result<Option<Payload>, ProtocolError> {
        let body = json!({ "id": serial, "deviceSn": serial });
        let payload = self.post(path, &body).await?.into_payload()?;
        if payload.is_none() {
            tracing::warn!(serial = %serial, path = %path, "API returned no data");
        }
        Ok(payload)
    }
}

impl PetlibroApi for HttpApi {
    async fn device_base_info(&self, serial: &str) -> Result<Option<Payload>, ProtocolError> {
        self.fetch_section(BASE_INFO_PATH, serial).await
    }

    async fn device_grain_status(&self, serial: &str) -> Result<Option<Payload>, ProtocolError> {
        self.fetch_section(GRAIN_STATUS_PATH, serial).await
    }

    async fn device_real_info(&self, serial: &str) -> Result<Option<Payload>, ProtocolError> {
        self.fetch_section(REAL_INFO_PATH, serial).await
    }

    async fn send_setting(
        &self,
        serial: &str,
        command: &SettingCommand,
    ) -> Result<(), ProtocolError> {
        self.post(command.path(), &command.body(serial))
            .await?
            .into_data()
            .map(|_| ())
    }
}
