// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `voxlight` library.
//!
//! Nothing in this crate is fatal to the caller. Every variant here ends up
//! either degrading a voice command to [`DeviceCommand::Unknown`] or being
//! shown to the user as a notice.
//!
//! [`DeviceCommand::Unknown`]: crate::command::DeviceCommand::Unknown

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while setting up or using a transport.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Classifier output could not be turned into a command.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The intent classifier could not be reached or timed out.
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(#[source] ProtocolError),

    /// Another utterance is still being classified.
    #[error("a voice command is already being processed")]
    ClassifierBusy,

    /// Writing a value to the state store failed.
    #[error("write to {path} failed: {source}")]
    StoreWriteFailed {
        /// The store path that was being written.
        path: String,
        /// The underlying transport failure.
        #[source]
        source: ProtocolError,
    },

    /// Reading a value from the state store failed.
    #[error("read of {path} failed: {source}")]
    StoreReadFailed {
        /// The store path that was being read.
        path: String,
        /// The underlying transport failure.
        #[source]
        source: ProtocolError,
    },

    /// Required configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A hue value is outside the valid range (0-360).
    #[error("hue value {0} is out of range [0, 360]")]
    InvalidHue(u16),

    /// A saturation value is outside the valid range (0-100).
    #[error("saturation value {0} is out of range [0, 100]")]
    InvalidSaturation(u8),

    /// A value (brightness) is outside the valid range (0-100).
    #[error("value {0} is out of range [0, 100]")]
    InvalidValue(u8),
}

/// Errors related to talking to the state store or the classifier over HTTP.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with an error status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The remote answered, but not with anything usable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors related to parsing classifier output.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the output.
    #[error("missing field in classifier output: {0}")]
    MissingField(String),

    /// Unexpected output format.
    #[error("unexpected classifier output: {0}")]
    UnexpectedFormat(String),

    /// The `action` field named something this crate does not know.
    #[error("unrecognized action: {0}")]
    UnrecognizedAction(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
