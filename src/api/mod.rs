// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access to the PETLIBRO cloud API.
//!
//! Feeders never talk to the network themselves. They call a [`PetlibroApi`]
//! implementation, keyed by device serial, for section payloads and settings.
//! [`HttpApi`] is the bundled implementation; tests and hosts can provide
//! their own.
//!
//! Every read returns `Ok(None)` when the cloud answered without data. Faults
//! are returned unchanged and never retried here.

mod command;
#[cfg(feature = "http")]
mod http;

pub use command::SettingCommand;
#[cfg(feature = "http")]
pub use http::{HttpApi, HttpConfig};

use serde::Deserialize;
use serde_json::Value;

use crate::error::ProtocolError;
use crate::state::Payload;

/// Response envelope wrapping every PETLIBRO API answer.
///
/// # Examples
///
/// ```
/// use petfeed_lib::api::ApiResponse;
///
/// let ok: ApiResponse =
///     serde_json::from_str(r#"{"code":0,"msg":null,"data":{"online":true}}"#).unwrap();
/// assert!(ok.into_payload().unwrap().is_some());
///
/// let rejected: ApiResponse =
///     serde_json::from_str(r#"{"code":1009,"msg":"NOT_YET_LOGIN"}"#).unwrap();
/// assert!(rejected.into_payload().is_err());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Vendor result code, `0` on success.
    pub code: i64,
    /// Vendor message.
    #[serde(default)]
    pub msg: Option<String>,
    /// Response data.
    #[serde(default)]
    pub data: Value,
}

impl ApiResponse {
    /// Result code signalling success.
    pub const SUCCESS: i64 = 0;

    /// Fails with [`ProtocolError::Rejected`] on a non-zero code.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Rejected`] if the API rejected the request.
    pub fn into_data(self) -> Result<Value, ProtocolError> {
        if self.code == Self::SUCCESS {
            Ok(self.data)
        } else {
            Err(ProtocolError::Rejected {
                code: self.code,
                message: self.msg.unwrap_or_default(),
            })
        }
    }

    /// Extracts a section payload.
    ///
    /// `null` data yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Rejected`] on a non-zero code and
    /// [`ProtocolError::UnexpectedPayload`] if the data is not an object.
    pub fn into_payload(self) -> Result<Option<Payload>, ProtocolError> {
        match self.into_data()? {
            Value::Object(map) => Ok(Some(map)),
            Value::Null => Ok(None),
            other => Err(ProtocolError::UnexpectedPayload(format!(
                "expected an object, got: {other}"
            ))),
        }
    }
}

/// Operations the feeders need from the cloud API.
///
/// Each setter has a provided implementation that forwards a
/// [`SettingCommand`] to [`send_setting`](Self::send_setting).
#[allow(async_fn_in_trait)]
pub trait PetlibroApi {
    /// Fetches identity and firmware details.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn device_base_info(&self, serial: &str) -> Result<Option<Payload>, ProtocolError>;

    /// Fetches today's dispense and eating counters.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn device_grain_status(&self, serial: &str) -> Result<Option<Payload>, ProtocolError>;

    /// Fetches live hardware status.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn device_real_info(&self, serial: &str) -> Result<Option<Payload>, ProtocolError>;

    /// Writes a boolean setting.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn send_setting(
        &self,
        serial: &str,
        command: &SettingCommand,
    ) -> Result<(), ProtocolError>;

    /// Enables or disables the feeding plan.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn set_feeding_plan(&self, serial: &str, value: bool) -> Result<(), ProtocolError> {
        self.send_setting(serial, &SettingCommand::FeedingPlan(value))
            .await
    }

    /// Locks or unlocks the buttons.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn set_child_lock(&self, serial: &str, value: bool) -> Result<(), ProtocolError> {
        self.send_setting(serial, &SettingCommand::ChildLock(value))
            .await
    }

    /// Enables or disables the light feature.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn set_light_enable(&self, serial: &str, value: bool) -> Result<(), ProtocolError> {
        self.send_setting(serial, &SettingCommand::LightEnable(value))
            .await
    }

    /// Turns the light on or off.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn set_light_switch(&self, serial: &str, value: bool) -> Result<(), ProtocolError> {
        self.send_setting(serial, &SettingCommand::LightSwitch(value))
            .await
    }

    /// Enables or disables the sound feature.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn set_sound_enable(&self, serial: &str, value: bool) -> Result<(), ProtocolError> {
        self.send_setting(serial, &SettingCommand::SoundEnable(value))
            .await
    }

    /// Turns sound on or off.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn set_sound_switch(&self, serial: &str, value: bool) -> Result<(), ProtocolError> {
        self.send_setting(serial, &SettingCommand::SoundSwitch(value))
            .await
    }
}
