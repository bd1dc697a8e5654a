// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feeder capabilities.
//!
//! Hosts use [`Capabilities`] to decide which sensors, switches and binary
//! indicators to register for a feeder, without matching on the model.

/// How a model reports its food cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorKind {
    /// Motorised cover reported as a position code, see
    /// [`DoorPosition`](crate::types::DoorPosition).
    Position,
    /// Barn door reported as an open/closed flag.
    BarnDoor,
}

/// Capabilities of a feeder model.
///
/// # Examples
///
/// ```
/// use petfeed_lib::{Capabilities, DoorKind};
///
/// let smart = Capabilities::one_rfid_smart_feeder();
/// assert!(smart.controls);
/// assert_eq!(smart.door, DoorKind::BarnDoor);
///
/// let pet = Capabilities::one_rfid_pet_feeder();
/// assert!(!pet.controls);
/// assert!(pet.desiccant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
// Each flag gates an independent group of entities.
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// How the food cover is reported.
    pub door: DoorKind,

    /// Supports the boolean setting commands (feeding plan, child lock,
    /// light, sound).
    pub controls: bool,

    /// Reports the list of individual dispense quantities of today.
    pub feeding_quantities: bool,

    /// Reports remaining desiccant days.
    pub desiccant: bool,

    /// Reports door faults, food level and notice settings.
    pub diagnostics: bool,
}

impl Capabilities {
    /// Capabilities of the One RFID Pet Feeder.
    #[must_use]
    pub const fn one_rfid_pet_feeder() -> Self {
        Self {
            door: DoorKind::Position,
            controls: false,
            feeding_quantities: false,
            desiccant: true,
            diagnostics: false,
        }
    }

    /// Capabilities of the One RFID Smart Feeder.
    #[must_use]
    pub const fn one_rfid_smart_feeder() -> Self {
        Self {
            door: DoorKind::BarnDoor,
            controls: true,
            feeding_quantities: true,
            desiccant: false,
            diagnostics: true,
        }
    }

    /// Returns whether the feeder accepts setting commands.
    #[must_use]
    pub const fn has_controls(&self) -> bool {
        self.controls
    }
}
