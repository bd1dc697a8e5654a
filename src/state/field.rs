// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed field descriptors.
//!
//! A [`Field`] names where a value lives (section and key), how to decode it
//! and what to return when it is missing or has the wrong shape. Reading a
//! field never fails.

use std::borrow::Cow;

use serde_json::Value;

use super::DeviceState;

/// Descriptor of one raw field inside a section.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
/// use petfeed_lib::state::{DeviceState, Field};
///
/// const BATTERY_STATE: Field<Cow<'static, str>> =
///     Field::text("realInfo", "batteryState", "unknown");
///
/// let state = DeviceState::new();
/// assert_eq!(BATTERY_STATE.read(&state), "unknown");
/// ```
#[derive(Debug, Clone)]
pub struct Field<T: 'static> {
    section: &'static str,
    key: &'static str,
    default: T,
    decode: fn(&Value) -> Option<T>,
}

impl<T: Clone> Field<T> {
    /// Creates a descriptor with a custom decoder.
    #[must_use]
    pub const fn new(
        section: &'static str,
        key: &'static str,
        default: T,
        decode: fn(&Value) -> Option<T>,
    ) -> Self {
        Self {
            section,
            key,
            default,
            decode,
        }
    }

    /// Reads the field, falling back to the default when it is absent or
    /// cannot be decoded.
    #[must_use]
    pub fn read(&self, state: &DeviceState) -> T {
        state
            .get(self.section, self.key)
            .and_then(self.decode)
            .unwrap_or_else(|| self.default.clone())
    }

    /// Section the field lives in.
    #[must_use]
    pub const fn section(&self) -> &'static str {
        self.section
    }

    /// Key of the field inside its section.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Value returned when the field is absent.
    #[must_use]
    pub const fn default_value(&self) -> &T {
        &self.default
    }
}

impl Field<i64> {
    /// Integer field.
    #[must_use]
    pub const fn int(section: &'static str, key: &'static str, default: i64) -> Self {
        Self::new(section, key, default, decode_int)
    }
}

impl Field<bool> {
    /// Boolean field; `0`/non-zero numbers are accepted as flags.
    #[must_use]
    pub const fn flag(section: &'static str, key: &'static str, default: bool) -> Self {
        Self::new(section, key, default, decode_flag)
    }
}

impl Field<Cow<'static, str>> {
    /// Text field; numbers are rendered as text.
    #[must_use]
    pub const fn text(section: &'static str, key: &'static str, default: &'static str) -> Self {
        Self::new(section, key, Cow::Borrowed(default), decode_text)
    }
}

impl Field<Vec<i64>> {
    /// List of integers, empty by default.
    #[must_use]
    pub const fn int_list(section: &'static str, key: &'static str) -> Self {
        Self::new(section, key, Vec::new(), decode_int_list)
    }
}

// Whole floats only; 9.2e18 is just above i64::MAX.
#[allow(clippy::cast_possible_truncation)]
fn decode_int(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f.fract() == 0.0 && f.abs() < 9.2e18).then_some(f as i64)
}

fn decode_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(_) => decode_int(value).map(|n| n != 0),
        _ => None,
    }
}

fn decode_text(value: &Value) -> Option<Cow<'static, str>> {
    match value {
        Value::String(s) => Some(Cow::Owned(s.clone())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

fn decode_int_list(value: &Value) -> Option<Vec<i64>> {
    value.as_array()?.iter().map(decode_int).collect()
}
