// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `PetFeed` Lib - Typed state for PETLIBRO cloud-connected pet feeders.
//!
//! This library keeps the latest data the PETLIBRO cloud reports for a
//! feeder and exposes it as typed, never-failing properties. Settings are
//! forwarded to the cloud unchanged.
//!
//! # Supported Models
//!
//! - One RFID Pet Feeder: cover position, desiccant, unit-converted quantity
//! - One RFID Smart Feeder: barn door, dispenser, battery, connectivity and
//!   settings
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use petfeed_lib::api::HttpConfig;
//! use petfeed_lib::{Feeder, GranaryFeeder, OneRfidSmartFeeder};
//!
//! #[tokio::main]
//! async fn main() -> petfeed_lib::Result<()> {
//!     let api = Arc::new(HttpConfig::new().with_token("a1b2c3").into_client()?);
//!     let feeder = OneRfidSmartFeeder::new("AF0301000000001", api);
//!
//!     feeder.refresh().await?;
//!     println!("{} dispensed {} portions", feeder.name(), feeder.today_feeding_quantity());
//!
//!     if feeder.food_low() {
//!         println!("refill the hopper");
//!     }
//!     feeder.set_child_lock(true).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Custom API
//!
//! Feeders are generic over [`api::PetlibroApi`]. Disable the default `http`
//! feature to drop the bundled `reqwest` client and provide your own.

mod capabilities;
pub mod api;
mod device;
pub mod error;
pub mod state;
pub mod types;

pub use capabilities::{Capabilities, DoorKind};
pub use device::fields;
pub use device::{
    AnyFeeder, Feeder, FeederCore, FeederModel, GranaryFeeder, OneRfidPetFeeder,
    OneRfidSmartFeeder, RefreshGuard, RefreshPhase,
};
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result};
pub use state::{DeviceState, Field, Payload};
pub use types::{DoorPosition, FeedUnit};
