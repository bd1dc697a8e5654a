// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `petfeed_lib` library.
//!
//! Only two kinds of failure leave this crate: faults raised by the cloud API
//! (transport, HTTP status, vendor rejection) and construction errors when a
//! device listing cannot be turned into a feeder. Malformed device data never
//! surfaces as an error; property accessors absorb it into their defaults.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while talking to the cloud API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing an API response or listing.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred while building or driving a device.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

/// Errors related to communication with the PETLIBRO cloud API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status}: {reason}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase, if known.
        reason: String,
    },

    /// The API answered with a non-zero envelope code.
    #[error("request rejected by API (code {code}): {message}")]
    Rejected {
        /// Vendor result code.
        code: i64,
        /// Vendor message, empty when none was sent.
        message: String,
    },

    /// Invalid base URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Response body could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Response envelope carried data of an unexpected shape.
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
}

/// Errors related to parsing device data.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Expected field is missing.
    #[error("missing field: {0}")]
    MissingField(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to device construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The listing names a product this library has no model for.
    #[error("unsupported feeder model: {0}")]
    UnsupportedModel(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
