// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lid/door position reported by feeders with a motorised cover.

use std::fmt;

/// Position of the feeder's food cover.
///
/// The cloud reports the cover as an integer `coverClosePosition`. Only two
/// codes carry meaning; every other value maps to [`DoorPosition::Unknown`].
///
/// # Examples
///
/// ```
/// use petfeed_lib::types::DoorPosition;
///
/// assert_eq!(DoorPosition::from_code(4), DoorPosition::Closed);
/// assert_eq!(DoorPosition::from_code(1), DoorPosition::Open);
/// assert_eq!(DoorPosition::from_code(2), DoorPosition::Unknown);
/// assert_eq!(DoorPosition::Closed.as_str(), "Closed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DoorPosition {
    /// The cover is open and the bowl is reachable.
    Open,
    /// The cover is closed.
    Closed,
    /// Not reported, or a code with no known meaning.
    #[default]
    Unknown,
}

impl DoorPosition {
    /// Cover code for the open position.
    pub const OPEN_CODE: i64 = 1;
    /// Cover code for the closed position.
    pub const CLOSED_CODE: i64 = 4;

    /// Translates a `coverClosePosition` code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            Self::OPEN_CODE => Self::Open,
            Self::CLOSED_CODE => Self::Closed,
            _ => Self::Unknown,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DoorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
