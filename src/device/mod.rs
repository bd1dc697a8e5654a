// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feeder models and their typed properties.
//!
//! Every model wraps a [`FeederCore`] and implements [`Feeder`], which
//! provides the properties all feeders share. Models with a granary-style
//! hopper also implement [`GranaryFeeder`], which adds door, dispenser,
//! battery and connectivity properties plus the setting commands. A model
//! overrides only the properties whose raw layout differs.
//!
//! Properties are computed from the latest state record on every call and
//! never fail: missing or malformed data yields the documented default.
//!
//! # Refresh
//!
//! [`Feeder::refresh`] first merges the sections every feeder carries
//! (`baseInfo`), then fetches the model's own sections and merges them in a
//! single update.
//!
//! ```no_run
//! use std::sync::Arc;
//! use petfeed_lib::api::HttpConfig;
//! use petfeed_lib::{Feeder, GranaryFeeder, OneRfidSmartFeeder};
//!
//! # async fn example() -> petfeed_lib::Result<()> {
//! let api = Arc::new(HttpConfig::new().with_token("a1b2c3").into_client()?);
//! let feeder = OneRfidSmartFeeder::new("AF0301000000001", api);
//!
//! feeder.refresh().await?;
//! println!("eaten for {} s today", feeder.today_eating_time());
//!
//! if feeder.food_low() {
//!     feeder.set_light_switch(true).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod feeder_core;
pub mod fields;
mod granary;
mod one_rfid_pet_feeder;
mod one_rfid_smart_feeder;

pub use feeder_core::{FeederCore, RefreshGuard, RefreshPhase};
pub use granary::GranaryFeeder;
pub use one_rfid_pet_feeder::OneRfidPetFeeder;
pub use one_rfid_smart_feeder::OneRfidSmartFeeder;

use std::fmt;
use std::sync::Arc;

use crate::api::PetlibroApi;
use crate::capabilities::Capabilities;
use crate::error::{DeviceError, Result};
use crate::state::{DeviceState, Payload};
use crate::types::{FeedUnit, eating_time_seconds};

/// Supported feeder models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeederModel {
    /// One RFID Pet Feeder.
    OneRfidPetFeeder,
    /// One RFID Smart Feeder.
    OneRfidSmartFeeder,
}

impl FeederModel {
    /// Resolves the `productName` of a device listing entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use petfeed_lib::FeederModel;
    ///
    /// assert_eq!(
    ///     FeederModel::from_product_name("One RFID Smart Feeder"),
    ///     Some(FeederModel::OneRfidSmartFeeder)
    /// );
    /// assert_eq!(FeederModel::from_product_name("Dockstream Fountain"), None);
    /// ```
    #[must_use]
    pub fn from_product_name(name: &str) -> Option<Self> {
        match name.trim() {
            "One RFID Pet Feeder" => Some(Self::OneRfidPetFeeder),
            "One RFID Smart Feeder" => Some(Self::OneRfidSmartFeeder),
            _ => None,
        }
    }

    /// Returns the product name.
    #[must_use]
    pub const fn product_name(&self) -> &'static str {
        match self {
            Self::OneRfidPetFeeder => "One RFID Pet Feeder",
            Self::OneRfidSmartFeeder => "One RFID Smart Feeder",
        }
    }

    /// Returns the model's capabilities.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        match self {
            Self::OneRfidPetFeeder => Capabilities::one_rfid_pet_feeder(),
            Self::OneRfidSmartFeeder => Capabilities::one_rfid_smart_feeder(),
        }
    }
}

impl fmt::Display for FeederModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.product_name())
    }
}

/// Properties and refresh shared by every feeder.
#[allow(async_fn_in_trait)]
pub trait Feeder {
    /// API implementation the feeder talks to.
    type Api: PetlibroApi;

    /// Returns the shared core.
    fn core(&self) -> &FeederCore<Self::Api>;

    /// Returns the model.
    fn model(&self) -> FeederModel;

    /// Fetches the latest data from the API and merges it.
    ///
    /// # Errors
    ///
    /// Returns error if any API call fails. Sections merged by an earlier
    /// step of the same refresh are kept.
    async fn refresh(&self) -> Result<()>;

    /// Food dispensed today, in the model's display unit.
    fn today_feeding_quantity(&self) -> f64;

    /// Returns the device serial.
    fn serial(&self) -> &str {
        self.core().serial()
    }

    /// Returns a snapshot of the raw state.
    fn state(&self) -> DeviceState {
        self.core().state()
    }

    /// Returns the refresh phase.
    fn refresh_phase(&self) -> RefreshPhase {
        self.core().phase()
    }

    /// Returns the model's capabilities.
    fn capabilities(&self) -> Capabilities {
        self.model().capabilities()
    }

    /// Name given by the owner.
    fn name(&self) -> String {
        self.core().read(&fields::NAME).into_owned()
    }

    /// Product name from the device listing.
    fn product_name(&self) -> String {
        self.core().read(&fields::PRODUCT_NAME).into_owned()
    }

    /// Wi-Fi MAC address.
    fn mac(&self) -> String {
        self.core().read(&fields::MAC).into_owned()
    }

    /// Firmware version.
    fn software_version(&self) -> String {
        self.core().read(&fields::SOFTWARE_VERSION).into_owned()
    }

    /// Hardware revision.
    fn hardware_version(&self) -> String {
        self.core().read(&fields::HARDWARE_VERSION).into_owned()
    }

    /// Whether the feeder was connected at the last refresh.
    fn online(&self) -> bool {
        self.core().read(&fields::ONLINE)
    }

    /// Raw `unitType` code.
    fn unit_type(&self) -> i64 {
        self.core().read(&fields::UNIT_TYPE)
    }

    /// Display unit for quantities; unknown codes fall back to cups.
    fn feed_unit(&self) -> FeedUnit {
        FeedUnit::from_code(self.unit_type()).unwrap_or_default()
    }

    /// Converts a portion count into the display unit.
    fn convert_unit(&self, portions: i64) -> f64 {
        self.feed_unit().convert(portions)
    }

    /// Dispense events today.
    fn today_feeding_times(&self) -> i64 {
        self.core().read(&fields::TODAY_FEEDING_TIMES)
    }

    /// Eating visits today.
    fn today_eating_times(&self) -> i64 {
        self.core().read(&fields::TODAY_EATING_TIMES)
    }

    /// Seconds spent eating today.
    fn today_eating_time(&self) -> u64 {
        eating_time_seconds(&self.core().read(&fields::EATING_TIME))
    }

    /// Battery level label, `"unknown"` when not reported.
    fn battery_state(&self) -> String {
        self.core().read(&fields::BATTERY_STATE).into_owned()
    }
}

/// Any supported feeder, selected from a device listing entry.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use petfeed_lib::api::HttpConfig;
/// use petfeed_lib::{AnyFeeder, Feeder, GranaryFeeder};
/// use serde_json::json;
///
/// # async fn example() -> petfeed_lib::Result<()> {
/// let api = Arc::new(HttpConfig::new().with_token("a1b2c3").into_client()?);
/// let listing = json!({
///     "deviceSn": "AF0301000000001",
///     "productName": "One RFID Smart Feeder",
///     "name": "Kitchen",
/// });
/// let serde_json::Value::Object(listing) = listing else { unreachable!() };
///
/// let feeder = AnyFeeder::from_listing(listing, api)?;
/// feeder.refresh().await?;
///
/// if let Some(granary) = feeder.as_granary() {
///     println!("food low: {}", granary.food_low());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub enum AnyFeeder<A> {
    /// One RFID Pet Feeder.
    OneRfidPetFeeder(OneRfidPetFeeder<A>),
    /// One RFID Smart Feeder.
    OneRfidSmartFeeder(OneRfidSmartFeeder<A>),
}

impl<A: PetlibroApi> AnyFeeder<A> {
    /// Builds the right model for a device listing entry.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::UnsupportedModel`] for unknown product names
    /// and a parse error if the entry has no serial.
    pub fn from_listing(listing: Payload, api: Arc<A>) -> Result<Self> {
        let core = FeederCore::from_listing(listing, api)?;
        let product_name = core.read(&fields::PRODUCT_NAME);

        let Some(model) = FeederModel::from_product_name(&product_name) else {
            tracing::warn!(
                serial = %core.serial(),
                product = %product_name,
                "Unsupported feeder model"
            );
            return Err(DeviceError::UnsupportedModel(product_name.into_owned()).into());
        };

        tracing::debug!(serial = %core.serial(), model = %model, "Created feeder");

        Ok(match model {
            FeederModel::OneRfidPetFeeder => Self::OneRfidPetFeeder(OneRfidPetFeeder::from_core(core)),
            FeederModel::OneRfidSmartFeeder => {
                Self::OneRfidSmartFeeder(OneRfidSmartFeeder::from_core(core))
            }
        })
    }

    /// Returns the feeder as a granary-style feeder, if it is one.
    #[must_use]
    pub fn as_granary(&self) -> Option<&OneRfidSmartFeeder<A>> {
        match self {
            Self::OneRfidSmartFeeder(feeder) => Some(feeder),
            Self::OneRfidPetFeeder(_) => None,
        }
    }

    /// Returns the feeder as a One RFID Pet Feeder, if it is one.
    #[must_use]
    pub fn as_pet_feeder(&self) -> Option<&OneRfidPetFeeder<A>> {
        match self {
            Self::OneRfidPetFeeder(feeder) => Some(feeder),
            Self::OneRfidSmartFeeder(_) => None,
        }
    }
}

impl<A: PetlibroApi> Feeder for AnyFeeder<A> {
    type Api = A;

    fn core(&self) -> &FeederCore<A> {
        match self {
            Self::OneRfidPetFeeder(feeder) => feeder.core(),
            Self::OneRfidSmartFeeder(feeder) => feeder.core(),
        }
    }

    fn model(&self) -> FeederModel {
        match self {
            Self::OneRfidPetFeeder(feeder) => feeder.model(),
            Self::OneRfidSmartFeeder(feeder) => feeder.model(),
        }
    }

    async fn refresh(&self) -> Result<()> {
        match self {
            Self::OneRfidPetFeeder(feeder) => feeder.refresh().await,
            Self::OneRfidSmartFeeder(feeder) => feeder.refresh().await,
        }
    }

    fn today_feeding_quantity(&self) -> f64 {
        match self {
            Self::OneRfidPetFeeder(feeder) => feeder.today_feeding_quantity(),
            Self::OneRfidSmartFeeder(feeder) => feeder.today_feeding_quantity(),
        }
    }
}
