// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PETLIBRO eating-time format parsing.
//!
//! Feeders with an RFID reader report how long the pet ate today as a
//! minutes/seconds string such as `"5'30''"`, where `'` follows the minutes
//! and `''` follows the seconds.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! let duration = petfeed_lib::types::parse_eating_time("5'30''").unwrap();
//! assert_eq!(duration, Duration::from_secs(330));
//! ```

use std::time::Duration;

use crate::error::ParseError;

/// Value reported by the cloud before the pet has eaten today.
pub const NO_EATING_TIME: &str = "0'0''";

/// Parses a PETLIBRO eating-time string into a [`Duration`].
///
/// # Format
///
/// `"<minutes>'<seconds>''"`. The seconds marker is stripped first, then the
/// remainder must split on `'` into exactly two non-negative integers.
/// Minutes are not bounded and seconds are not required to be below 60.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use petfeed_lib::types::parse_eating_time;
///
/// assert_eq!(parse_eating_time("0'0''").unwrap(), Duration::ZERO);
/// assert_eq!(parse_eating_time("12'05''").unwrap(), Duration::from_secs(725));
/// assert!(parse_eating_time("abc'1''").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ParseError::InvalidValue`] if:
/// - The string does not contain exactly one minutes marker
/// - Minutes or seconds are not valid numbers
/// - The total overflows
pub fn parse_eating_time(s: &str) -> Result<Duration, ParseError> {
    let stripped = s.replace("''", "");
    let mut parts = stripped.split('\'');

    let (Some(minutes_str), Some(seconds_str), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid(format!("expected <minutes>'<seconds>'' format, got: {s}")));
    };

    let minutes: u64 = minutes_str
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid minutes: {minutes_str}")))?;

    let seconds: u64 = seconds_str
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid seconds: {seconds_str}")))?;

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .map(Duration::from_secs)
        .ok_or_else(|| invalid(format!("eating time overflows: {s}")))
}

/// Parses an eating-time string into whole seconds.
///
/// Empty and malformed values resolve to `0`, including negative
/// components such as `"-1'30''"`.
#[must_use]
pub fn eating_time_seconds(s: &str) -> u64 {
    parse_eating_time(s).map_or(0, |d| d.as_secs())
}

fn invalid(message: String) -> ParseError {
    ParseError::InvalidValue {
        field: "eatingTime".to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minutes_and_seconds() {
        let dur = parse_eating_time("5'30''").unwrap();
        assert_eq!(dur, Duration::from_secs(330));
    }

    #[test]
    fn parse_zero() {
        let dur = parse_eating_time(NO_EATING_TIME).unwrap();
        assert_eq!(dur, Duration::ZERO);
    }

    #[test]
    fn parse_seconds_above_sixty() {
        // 1 * 60 + 75
        let dur = parse_eating_time("1'75''").unwrap();
        assert_eq!(dur, Duration::from_secs(135));
    }

    #[test]
    fn parse_with_whitespace() {
        let dur = parse_eating_time(" 2' 10 ''").unwrap();
        assert_eq!(dur, Duration::from_secs(130));
    }

    #[test]
    fn parse_invalid_minutes() {
        let err = parse_eating_time("abc'1''").unwrap_err();
        assert!(err.to_string().contains("invalid minutes"));
    }

    #[test]
    fn parse_missing_seconds() {
        let err = parse_eating_time("5'").unwrap_err();
        assert!(err.to_string().contains("invalid seconds"));
    }

    #[test]
    fn parse_missing_marker() {
        let err = parse_eating_time("330").unwrap_err();
        assert!(err.to_string().contains("expected <minutes>'<seconds>''"));
    }

    #[test]
    fn parse_too_many_markers() {
        assert!(parse_eating_time("1'2'3''").is_err());
    }

    #[test]
    fn parse_negative_is_rejected() {
        assert!(parse_eating_time("-1'30''").is_err());
    }

    #[test]
    fn parse_overflow() {
        let s = format!("{}'0''", u64::MAX);
        let err = parse_eating_time(&s).unwrap_err();
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn seconds_default_to_zero() {
        assert_eq!(eating_time_seconds(""), 0);
        assert_eq!(eating_time_seconds("abc'1''"), 0);
        assert_eq!(eating_time_seconds("5'"), 0);
        assert_eq!(eating_time_seconds("5'30''"), 330);
    }

    #[test]
    fn negative_components_resolve_to_zero() {
        assert_eq!(eating_time_seconds("-1'30''"), 0);
        assert_eq!(eating_time_seconds("1'-30''"), 0);
    }
}
