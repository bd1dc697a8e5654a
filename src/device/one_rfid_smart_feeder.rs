// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One RFID Smart Feeder.

use std::sync::Arc;

use crate::api::PetlibroApi;
use crate::error::Result;
use crate::state::Field;
use crate::state::section::{GRAIN_STATUS, REAL_INFO};

use super::{Feeder, FeederCore, FeederModel, GranaryFeeder, fields};

const TODAY_FEEDING_QUANTITIES: Field<Vec<i64>> =
    Field::int_list(GRAIN_STATUS, "todayFeedingQuantities");

/// One RFID Smart Feeder.
///
/// A granary-style feeder with a barn door. Quantities are reported as raw
/// portion counts.
#[derive(Debug)]
pub struct OneRfidSmartFeeder<A> {
    core: FeederCore<A>,
}

impl<A: PetlibroApi> OneRfidSmartFeeder<A> {
    /// Creates a feeder with an empty state.
    #[must_use]
    pub fn new(serial: impl Into<String>, api: Arc<A>) -> Self {
        Self::from_core(FeederCore::new(serial, api))
    }

    /// Wraps an existing core.
    #[must_use]
    pub fn from_core(core: FeederCore<A>) -> Self {
        Self { core }
    }

    /// Portions of each dispense today.
    #[must_use]
    pub fn today_feeding_quantities(&self) -> Vec<i64> {
        self.core.read(&TODAY_FEEDING_QUANTITIES)
    }
}

impl<A: PetlibroApi> Feeder for OneRfidSmartFeeder<A> {
    type Api = A;

    fn core(&self) -> &FeederCore<A> {
        &self.core
    }

    fn model(&self) -> FeederModel {
        FeederModel::OneRfidSmartFeeder
    }

    async fn refresh(&self) -> Result<()> {
        let guard = self.core.begin_refresh();
        self.core.refresh_base().await?;

        let api = self.core.api();
        let serial = self.core.serial();
        let (grain_status, real_info) = tokio::try_join!(
            api.device_grain_status(serial),
            api.device_real_info(serial)
        )?;

        self.core
            .update([(GRAIN_STATUS, grain_status), (REAL_INFO, real_info)]);
        guard.complete();
        Ok(())
    }

    // Raw portion count.
    #[allow(clippy::cast_precision_loss)]
    fn today_feeding_quantity(&self) -> f64 {
        self.core.read(&fields::TODAY_FEEDING_QUANTITY) as f64
    }
}

impl<A: PetlibroApi> GranaryFeeder for OneRfidSmartFeeder<A> {}
