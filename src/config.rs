// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller configuration.
//!
//! Connection settings for the store and the classifier live next to their
//! clients ([`FirebaseConfig`](crate::protocol::FirebaseConfig),
//! [`GeminiConfig`](crate::protocol::GeminiConfig)).

use std::time::Duration;

use crate::error::Error;

/// Timing settings for [`DeviceController`](crate::control::DeviceController).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use voxlight::config::ControllerConfig;
///
/// let config = ControllerConfig::new().with_classify_timeout(Duration::from_secs(3));
/// assert_eq!(config.classify_timeout(), Duration::from_secs(3));
/// assert_eq!(config.lux_interval(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    classify_timeout: Duration,
    lux_interval: Duration,
}

impl ControllerConfig {
    /// Default limit for one classifier call.
    pub const DEFAULT_CLASSIFY_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default lux refresh period.
    pub const DEFAULT_LUX_INTERVAL: Duration = Duration::from_millis(500);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classify_timeout: Self::DEFAULT_CLASSIFY_TIMEOUT,
            lux_interval: Self::DEFAULT_LUX_INTERVAL,
        }
    }

    /// Sets the classifier timeout. Expiry resolves the utterance to
    /// [`DeviceCommand::Unknown`](crate::command::DeviceCommand::Unknown).
    #[must_use]
    pub fn with_classify_timeout(mut self, timeout: Duration) -> Self {
        self.classify_timeout = timeout;
        self
    }

    /// Sets the lux refresh period.
    #[must_use]
    pub fn with_lux_interval(mut self, interval: Duration) -> Self {
        self.lux_interval = interval;
        self
    }

    /// Returns the classifier timeout.
    #[must_use]
    pub fn classify_timeout(&self) -> Duration {
        self.classify_timeout
    }

    /// Returns the lux refresh period.
    #[must_use]
    pub fn lux_interval(&self) -> Duration {
        self.lux_interval
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a required environment variable.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub(crate) fn required_env(name: &str) -> Result<String, Error> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Configuration(format!("{name} is not set"))),
    }
}

/// Reads an optional environment variable, treating blank as unset.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub(crate) fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
