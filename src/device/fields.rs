// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field descriptors shared by every feeder model.
//!
//! Model-specific descriptors live next to the model that reads them.

use std::borrow::Cow;

use crate::state::Field;
use crate::state::section::{BASE_INFO, DEVICE, GRAIN_STATUS, REAL_INFO};
use crate::types::NO_EATING_TIME;

type Text = Field<Cow<'static, str>>;

// ========== Device listing ==========

/// Serial number as listed for the account.
pub const DEVICE_SN: Text = Field::text(DEVICE, "deviceSn", "");
/// Name given by the owner.
pub const NAME: Text = Field::text(DEVICE, "name", "");
/// Marketing name of the model, e.g. `"One RFID Smart Feeder"`.
pub const PRODUCT_NAME: Text = Field::text(DEVICE, "productName", "");

// ========== Base info ==========

/// Wi-Fi MAC address.
pub const MAC: Text = Field::text(BASE_INFO, "mac", "");
/// Firmware version.
pub const SOFTWARE_VERSION: Text = Field::text(BASE_INFO, "softwareVersion", "");
/// Hardware revision.
pub const HARDWARE_VERSION: Text = Field::text(BASE_INFO, "hardwareVersion", "");

// ========== Grain status ==========

/// Portions dispensed today.
pub const TODAY_FEEDING_QUANTITY: Field<i64> = Field::int(GRAIN_STATUS, "todayFeedingQuantity", 0);
/// Dispense events today.
pub const TODAY_FEEDING_TIMES: Field<i64> = Field::int(GRAIN_STATUS, "todayFeedingTimes", 0);
/// Eating visits detected today.
pub const TODAY_EATING_TIMES: Field<i64> = Field::int(GRAIN_STATUS, "todayEatingTimes", 0);
/// Time spent eating today, `"<minutes>'<seconds>''"`.
pub const EATING_TIME: Text = Field::text(GRAIN_STATUS, "eatingTime", NO_EATING_TIME);

// ========== Real info ==========

/// Whether the feeder is connected to the cloud.
pub const ONLINE: Field<bool> = Field::flag(REAL_INFO, "online", false);
/// Selected feed unit code.
pub const UNIT_TYPE: Field<i64> = Field::int(REAL_INFO, "unitType", 1);
/// Battery level label.
pub const BATTERY_STATE: Text = Field::text(REAL_INFO, "batteryState", "unknown");
