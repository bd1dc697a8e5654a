// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! [`DeviceState`] keeps the raw section payloads of one feeder and
//! [`Field`] describes how a typed value is read from them.
//!
//! # Examples
//!
//! ```
//! use petfeed_lib::state::{DeviceState, Field, Payload, section};
//! use serde_json::json;
//!
//! const FEEDING_TIMES: Field<i64> =
//!     Field::int(section::GRAIN_STATUS, "todayFeedingTimes", 0);
//!
//! let mut grain = Payload::new();
//! grain.insert("todayFeedingTimes".into(), json!(3));
//!
//! let state = DeviceState::new().merged([(section::GRAIN_STATUS, grain)]);
//! assert_eq!(FEEDING_TIMES.read(&state), 3);
//! ```

mod device_state;
mod field;

pub use device_state::{DeviceState, Payload};
pub use field::Field;

/// Names of the sections the cloud API delivers.
pub mod section {
    /// Entry from the account's device listing.
    pub const DEVICE: &str = "device";
    /// Identity and firmware details.
    pub const BASE_INFO: &str = "baseInfo";
    /// Today's dispense and eating counters.
    pub const GRAIN_STATUS: &str = "grainStatus";
    /// Live hardware status.
    pub const REAL_INFO: &str = "realInfo";
}
