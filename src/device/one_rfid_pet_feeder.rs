// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One RFID Pet Feeder.

use std::borrow::Cow;
use std::sync::Arc;

use crate::api::PetlibroApi;
use crate::error::Result;
use crate::state::Field;
use crate::state::section::{DEVICE, GRAIN_STATUS, REAL_INFO};
use crate::types::DoorPosition;

use super::{Feeder, FeederCore, FeederModel, fields};

const COVER_CLOSE_POSITION: Field<i64> = Field::int(REAL_INFO, "coverClosePosition", 0);
const REMAINING_DESICCANT: Field<Cow<'static, str>> =
    Field::text(DEVICE, "remainingDesiccantDays", "unknown");

/// One RFID Pet Feeder.
///
/// Reports its cover as a position code and today's quantity in portions,
/// converted to the owner's display unit.
#[derive(Debug)]
pub struct OneRfidPetFeeder<A> {
    core: FeederCore<A>,
}

impl<A: PetlibroApi> OneRfidPetFeeder<A> {
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

    /// Days of desiccant left, as listed for the account.
    #[must_use]
    pub fn remaining_desiccant(&self) -> String {
        self.core.read(&REMAINING_DESICCANT).into_owned()
    }

    /// Position of the food cover.
    #[must_use]
    pub fn door_state(&self) -> DoorPosition {
        DoorPosition::from_code(self.core.read(&COVER_CLOSE_POSITION))
    }
}

impl<A: PetlibroApi> Feeder for OneRfidPetFeeder<A> {
    type Api = A;

    fn core(&self) -> &FeederCore<A> {
        &self.core
    }

    fn model(&self) -> FeederModel {
        FeederModel::OneRfidPetFeeder
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

    fn today_feeding_quantity(&self) -> f64 {
        match self.core.read(&fields::TODAY_FEEDING_QUANTITY) {
            0 => 0.0,
            portions => self.convert_unit(portions),
        }
    }
}
