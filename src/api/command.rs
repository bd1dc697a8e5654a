// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boolean feeder settings.

use serde_json::{Value, json};

/// A boolean setting written to a feeder through the cloud API.
///
/// Each command names the vendor endpoint it is posted to and carries the
/// target value verbatim.
///
/// # Examples
///
/// ```
/// use petfeed_lib::api::SettingCommand;
///
/// let cmd = SettingCommand::ChildLock(true);
/// assert_eq!(cmd.path(), "/device/setting/updateChildLockSwitch");
/// assert!(cmd.value());
///
/// let body = cmd.body("AF0301");
/// assert_eq!(body["deviceSn"], "AF0301");
/// assert_eq!(body["enable"], true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingCommand {
    /// Enable or disable the scheduled feeding plan.
    FeedingPlan(bool),
    /// Lock or unlock the physical buttons.
    ChildLock(bool),
    /// Enable or disable the indicator light feature.
    LightEnable(bool),
    /// Turn the indicator light on or off.
    LightSwitch(bool),
    /// Enable or disable the sound feature.
    SoundEnable(bool),
    /// Turn sound on or off.
    SoundSwitch(bool),
}

impl SettingCommand {
    /// Human-readable name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FeedingPlan(_) => "feeding plan",
            Self::ChildLock(_) => "child lock",
            Self::LightEnable(_) => "light enable",
            Self::LightSwitch(_) => "light switch",
            Self::SoundEnable(_) => "sound enable",
            Self::SoundSwitch(_) => "sound switch",
        }
    }

    /// API path the command is posted to.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::FeedingPlan(_) => "/device/setting/updateFeedingPlanSwitch",
            Self::ChildLock(_) => "/device/setting/updateChildLockSwitch",
            Self::LightEnable(_) => "/device/setting/updateLightEnableSwitch",
            Self::LightSwitch(_) => "/device/setting/updateLightSwitch",
            Self::SoundEnable(_) => "/device/setting/updateSoundEnableSwitch",
            Self::SoundSwitch(_) => "/device/setting/updateSoundSwitch",
        }
    }

    /// Target value of the setting.
    #[must_use]
    pub const fn value(&self) -> bool {
        match self {
            Self::FeedingPlan(v)
            | Self::ChildLock(v)
            | Self::LightEnable(v)
            | Self::LightSwitch(v)
            | Self::SoundEnable(v)
            | Self::SoundSwitch(v) => *v,
        }
    }

    /// JSON request body for the given device.
    #[must_use]
    pub fn body(&self, serial: &str) -> Value {
        json!({
            "deviceSn": serial,
            "enable": self.value(),
        })
    }
}
