// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use std::collections::BTreeMap;

use serde_json::Value;

/// A raw section payload as returned by the cloud API.
pub type Payload = serde_json::Map<String, Value>;

/// Latest known raw data of a feeder, grouped by section.
///
/// Each section (`"grainStatus"`, `"realInfo"`, ...) holds the payload from
/// the most recent fetch of that section. Merging replaces whole sections and
/// never mixes fields from different fetches of the same section. Sections
/// that were never fetched are absent.
///
/// A merge produces a new record with a bumped revision; the previous record
/// is left untouched.
///
/// # Examples
///
/// ```
/// use petfeed_lib::state::{DeviceState, Payload};
/// use serde_json::json;
///
/// let state = DeviceState::new();
/// let mut real_info = Payload::new();
/// real_info.insert("batteryState".into(), json!("high"));
///
/// let next = state.merged([("realInfo", real_info)]);
/// assert_eq!(next.get("realInfo", "batteryState"), Some(&json!("high")));
/// assert!(state.is_empty());
/// assert_eq!(next.revision(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceState {
    sections: BTreeMap<String, Payload>,
    revision: u64,
}

impl DeviceState {
    /// Creates a new empty device state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a state containing the given sections, replacing any stored
    /// section of the same name wholesale.
    ///
    /// Section names are not validated; unknown sections are kept as-is.
    #[must_use]
    pub fn merged<I, S>(&self, updates: I) -> Self
    where
        I: IntoIterator<Item = (S, Payload)>,
        S: Into<String>,
    {
        let mut sections = self.sections.clone();
        for (name, payload) in updates {
            let name = name.into();
            tracing::trace!(section = %name, fields = payload.len(), "Replacing section");
            sections.insert(name, payload);
        }
        Self {
            sections,
            revision: self.revision.saturating_add(1),
        }
    }

    /// Replaces this record with [`merged`](Self::merged).
    pub fn update<I, S>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (S, Payload)>,
        S: Into<String>,
    {
        *self = self.merged(updates);
    }

    /// Returns a field of a section.
    ///
    /// A missing section, a missing key and a JSON `null` are all reported
    /// as `None`.
    #[must_use]
    pub fn get(&self, section: &str, field: &str) -> Option<&Value> {
        self.sections
            .get(section)
            .and_then(|payload| payload.get(field))
            .filter(|value| !value.is_null())
    }

    /// Returns a field of a section, or `default` when it is absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, section: &str, field: &str, default: &'a Value) -> &'a Value {
        self.get(section, field).unwrap_or(default)
    }

    /// Returns a whole section.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Payload> {
        self.sections.get(name)
    }

    /// Returns all stored sections.
    #[must_use]
    pub fn sections(&self) -> &BTreeMap<String, Payload> {
        &self.sections
    }

    /// Number of merges applied since creation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if no section has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
