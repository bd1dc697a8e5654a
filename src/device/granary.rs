// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Granary-style feeders: hopper, door, dispenser and settings.

use std::borrow::Cow;

use crate::api::SettingCommand;
use crate::error::Result;
use crate::state::Field;
use crate::state::section::REAL_INFO;

use super::Feeder;

const BARN_DOOR_STATE: Field<bool> = Field::flag(REAL_INFO, "barnDoorState", false);
const DOOR_ERROR_STATE: Field<Cow<'static, str>> =
    Field::text(REAL_INFO, "doorErrorState", "NORMAL");
const GRAIN_OUTLET_STATE: Field<bool> = Field::flag(REAL_INFO, "grainOutletState", true);
const BARN_DOOR_ERROR: Field<bool> = Field::flag(REAL_INFO, "barnDoorError", false);
const SURPLUS_GRAIN: Field<bool> = Field::flag(REAL_INFO, "surplusGrain", false);
const BATTERY_DISPLAY_TYPE: Field<Cow<'static, str>> =
    Field::text(REAL_INFO, "batteryDisplayType", "percentage");
const ELECTRIC_QUANTITY: Field<i64> = Field::int(REAL_INFO, "electricQuantity", 0);
const WIFI_RSSI: Field<i64> = Field::int(REAL_INFO, "wifiRssi", 0);
const RUNNING_STATE: Field<Cow<'static, str>> = Field::text(REAL_INFO, "runningState", "IDLE");
const SLEEP_MODE: Field<bool> = Field::flag(REAL_INFO, "whetherInSleepMode", false);
const LOW_BATTERY_NOTICE: Field<bool> = Field::flag(REAL_INFO, "enableLowBatteryNotice", false);
const POWER_CHANGE_NOTICE: Field<bool> = Field::flag(REAL_INFO, "enablePowerChangeNotice", false);
const GRAIN_OUTLET_BLOCKED_NOTICE: Field<bool> =
    Field::flag(REAL_INFO, "enableGrainOutletBlockedNotice", false);

/// Value of `runningState` while the feeder dispenses.
const RUNNING: &str = "RUNNING";

/// Properties and settings of granary-style feeders.
///
/// Every setting forwards the requested value to the API and changes no
/// local state. The new value becomes visible after the next refresh.
#[allow(async_fn_in_trait)]
pub trait GranaryFeeder: Feeder {
    /// Whether the barn door is open.
    fn door_state(&self) -> bool {
        self.core().read(&BARN_DOOR_STATE)
    }

    /// Door fault label, `"NORMAL"` when not reported.
    fn door_error_state(&self) -> String {
        self.core().read(&DOOR_ERROR_STATE).into_owned()
    }

    /// Whether the food outlet is dispensing normally.
    ///
    /// The raw `grainOutletState` flags a blocked outlet.
    fn food_dispenser_state(&self) -> bool {
        !self.core().read(&GRAIN_OUTLET_STATE)
    }

    /// Whether the door is blocked.
    fn door_blocked(&self) -> bool {
        self.core().read(&BARN_DOOR_ERROR)
    }

    /// Whether the hopper is running low.
    ///
    /// The raw `surplusGrain` reports food remaining; absent means none.
    fn food_low(&self) -> bool {
        !self.core().read(&SURPLUS_GRAIN)
    }

    /// How the app displays the battery, `"percentage"` by default.
    fn battery_display_type(&self) -> String {
        self.core().read(&BATTERY_DISPLAY_TYPE).into_owned()
    }

    /// Battery charge in percent.
    fn electric_quantity(&self) -> i64 {
        self.core().read(&ELECTRIC_QUANTITY)
    }

    /// Wi-Fi signal strength in dBm.
    fn wifi_rssi(&self) -> i64 {
        self.core().read(&WIFI_RSSI)
    }

    /// Whether the feeder is dispensing right now.
    fn running_state(&self) -> bool {
        self.core().read(&RUNNING_STATE) == RUNNING
    }

    /// Whether the feeder is in sleep mode.
    fn whether_in_sleep_mode(&self) -> bool {
        self.core().read(&SLEEP_MODE)
    }

    /// Whether low-battery notifications are enabled.
    fn enable_low_battery_notice(&self) -> bool {
        self.core().read(&LOW_BATTERY_NOTICE)
    }

    /// Whether power-change notifications are enabled.
    fn enable_power_change_notice(&self) -> bool {
        self.core().read(&POWER_CHANGE_NOTICE)
    }

    /// Whether blocked-outlet notifications are enabled.
    fn enable_grain_outlet_blocked_notice(&self) -> bool {
        self.core().read(&GRAIN_OUTLET_BLOCKED_NOTICE)
    }

    // ========== Settings ==========

    /// Enables or disables the feeding plan.
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails.
    async fn set_feeding_plan(&self, value: bool) -> Result<()> {
        self.core()
            .send_setting(SettingCommand::FeedingPlan(value))
            .await
    }

    /// Enables or disables the child lock.
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails.
    async fn set_child_lock(&self, value: bool) -> Result<()> {
        self.core()
            .send_setting(SettingCommand::ChildLock(value))
            .await
    }

    /// Enables or disables the light feature.
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails.
    async fn set_light_enable(&self, value: bool) -> Result<()> {
        self.core()
            .send_setting(SettingCommand::LightEnable(value))
            .await
    }

    /// Turns the light on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails.
    async fn set_light_switch(&self, value: bool) -> Result<()> {
        self.core()
            .send_setting(SettingCommand::LightSwitch(value))
            .await
    }

    /// Enables or disables the sound feature.
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails.
    async fn set_sound_enable(&self, value: bool) -> Result<()> {
        self.core()
            .send_setting(SettingCommand::SoundEnable(value))
            .await
    }

    /// Turns sound on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails.
    async fn set_sound_switch(&self, value: bool) -> Result<()> {
        self.core()
            .send_setting(SettingCommand::SoundSwitch(value))
            .await
    }
}
