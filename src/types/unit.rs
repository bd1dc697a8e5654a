// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feed quantity units.
//!
//! Feeders count food in dispense portions. The owner picks a display unit in
//! the mobile app and the cloud reports it as `unitType`.

use std::fmt;

/// Display unit selected for feed quantities.
///
/// # Examples
///
/// ```
/// use petfeed_lib::types::FeedUnit;
///
/// let unit = FeedUnit::from_code(3).unwrap();
/// assert_eq!(unit, FeedUnit::Grams);
/// assert!((unit.convert(12) - 120.0).abs() < f64::EPSILON);
/// assert_eq!(unit.symbol(), "g");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeedUnit {
    /// Cups (1 portion = 1/12 cup).
    #[default]
    Cups,
    /// Ounces (1 portion = 0.35 oz).
    Ounces,
    /// Grams (1 portion = 10 g).
    Grams,
    /// Millilitres (1 portion = 20 ml).
    Milliliters,
}

impl FeedUnit {
    /// Resolves a `unitType` code.
    ///
    /// Returns `None` for codes outside 1-4.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Cups),
            2 => Some(Self::Ounces),
            3 => Some(Self::Grams),
            4 => Some(Self::Milliliters),
            _ => None,
        }
    }

    /// Returns the `unitType` code.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Cups => 1,
            Self::Ounces => 2,
            Self::Grams => 3,
            Self::Milliliters => 4,
        }
    }

    /// Returns the unit symbol shown next to quantities.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Cups => "cups",
            Self::Ounces => "oz",
            Self::Grams => "g",
            Self::Milliliters => "mL",
        }
    }

    /// Size of one dispense portion in this unit.
    #[must_use]
    pub const fn per_portion(&self) -> f64 {
        match self {
            Self::Cups => 1.0 / 12.0,
            Self::Ounces => 0.35,
            Self::Grams => 10.0,
            Self::Milliliters => 20.0,
        }
    }

    /// Converts a portion count, rounded to two decimals.
    #[must_use]
    pub fn convert(&self, portions: i64) -> f64 {
        // Daily portion counts are far below 2^52.
        #[allow(clippy::cast_precision_loss)]
        let portions = portions as f64;
        (portions * self.per_portion() * 100.0).round() / 100.0
    }
}

impl fmt::Display for FeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
