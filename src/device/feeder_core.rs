// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State and API handle shared by every feeder model.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::api::{PetlibroApi, SettingCommand};
use crate::error::{ParseError, Result};
use crate::state::section::{BASE_INFO, DEVICE};
use crate::state::{DeviceState, Field, Payload};

use super::fields;

/// Progress of a feeder's data refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPhase {
    /// No refresh has completed yet.
    #[default]
    Uninitialized,
    /// A refresh is in flight.
    Refreshing,
    /// At least one refresh has completed.
    Populated,
}

/// Serial, API handle and state record of one physical feeder.
///
/// Models wrap a `FeederCore` and read their properties from it. The state
/// record is replaced on every merge; readers always see a whole record.
#[derive(Debug)]
pub struct FeederCore<A> {
    serial: String,
    api: Arc<A>,
    state: RwLock<DeviceState>,
    phase: Mutex<RefreshPhase>,
}

impl<A: PetlibroApi> FeederCore<A> {
    /// Creates a core with an empty state.
    #[must_use]
    pub fn new(serial: impl Into<String>, api: Arc<A>) -> Self {
        Self::with_state(serial.into(), api, DeviceState::new())
    }

    /// Creates a core from an entry of the account's device listing.
    ///
    /// The entry is stored as the `device` section.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if the entry has no `deviceSn`.
    pub fn from_listing(listing: Payload, api: Arc<A>) -> Result<Self> {
        let seeded = DeviceState::new().merged([(DEVICE, listing)]);
        let serial = fields::DEVICE_SN.read(&seeded);
        if serial.is_empty() {
            return Err(ParseError::MissingField("deviceSn".to_string()).into());
        }
        Ok(Self::with_state(serial.into_owned(), api, seeded))
    }

    fn with_state(serial: String, api: Arc<A>, state: DeviceState) -> Self {
        Self {
            serial,
            api,
            state: RwLock::new(state),
            phase: Mutex::new(RefreshPhase::Uninitialized),
        }
    }

    /// Returns the device serial.
    #[must_use]
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Returns the API handle.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns a snapshot of the current state record.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state.read().clone()
    }

    /// Returns the refresh phase.
    #[must_use]
    pub fn phase(&self) -> RefreshPhase {
        *self.phase.lock()
    }

    /// Reads a field from the current state.
    #[must_use]
    pub fn read<T: Clone>(&self, field: &Field<T>) -> T {
        field.read(&self.state.read())
    }

    /// Merges fetched sections into the state.
    ///
    /// A section fetched without data is stored empty, so its fields fall
    /// back to their defaults instead of keeping values from an earlier
    /// fetch.
    pub fn update<I>(&self, updates: I)
    where
        I: IntoIterator<Item = (&'static str, Option<Payload>)>,
    {
        let mut state = self.state.write();
        *state = state.merged(
            updates
                .into_iter()
                .map(|(name, payload)| (name, payload.unwrap_or_default())),
        );
    }

    /// Fetches and merges the sections every feeder carries.
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails; nothing is merged in that case.
    pub async fn refresh_base(&self) -> Result<()> {
        let base_info = self.api.device_base_info(&self.serial).await?;
        self.update([(BASE_INFO, base_info)]);
        Ok(())
    }

    /// Sends a setting to the API. The state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails.
    pub async fn send_setting(&self, command: SettingCommand) -> Result<()> {
        tracing::debug!(
            serial = %self.serial,
            setting = command.name(),
            value = command.value(),
            "Sending setting"
        );
        self.api.send_setting(&self.serial, &command).await?;
        Ok(())
    }

    /// Marks a refresh as started.
    ///
    /// The returned guard restores the previous phase unless
    /// [`RefreshGuard::complete`] is called.
    pub fn begin_refresh(&self) -> RefreshGuard<'_> {
        let mut phase = self.phase.lock();
        let previous = *phase;
        *phase = RefreshPhase::Refreshing;
        tracing::debug!(serial = %self.serial, "Refreshing feeder");
        RefreshGuard {
            phase: &self.phase,
            serial: &self.serial,
            previous,
            completed: false,
        }
    }
}

/// Tracks one in-flight refresh, see [`FeederCore::begin_refresh`].
#[derive(Debug)]
pub struct RefreshGuard<'a> {
    phase: &'a Mutex<RefreshPhase>,
    serial: &'a str,
    previous: RefreshPhase,
    completed: bool,
}

impl RefreshGuard<'_> {
    /// Marks the refresh as successfully merged.
    pub fn complete(mut self) {
        self.completed = true;
        *self.phase.lock() = RefreshPhase::Populated;
        tracing::debug!(serial = %self.serial, "Feeder refreshed");
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            *self.phase.lock() = self.previous;
            tracing::debug!(serial = %self.serial, "Feeder refresh did not complete");
        }
    }
}
