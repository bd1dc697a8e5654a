// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types derived from raw feeder data.
//!
//! # Types
//!
//! - [`DoorPosition`] - Open/Closed/Unknown cover position
//! - [`FeedUnit`] - Display unit for feed quantities
//! - [`parse_eating_time`] - `"<minutes>'<seconds>''"` strings

mod door;
mod eating_time;
mod unit;

pub use door::DoorPosition;
pub use eating_time::{NO_EATING_TIME, eating_time_seconds, parse_eating_time};
pub use unit::FeedUnit;
