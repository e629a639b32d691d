// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State store paths and the writes the façade emits.

use std::fmt;

use serde_json::{Value, json};

use crate::types::{LcdText, RgbColor};

/// A key in the state store, relative to the device root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorePath {
    /// `controls/led/enabled` (bool).
    LedEnabled,
    /// `controls/rgb` (`{r, g, b}`).
    Rgb,
    /// `controls/lcd/enabled` (bool).
    LcdEnabled,
    /// `display` (`{text, enabled}`).
    Display,
    /// `sensors/lux` (integer, read-only for this client).
    SensorLux,
}

impl StorePath {
    /// Returns the slash-separated key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LedEnabled => "controls/led/enabled",
            Self::Rgb => "controls/rgb",
            Self::LcdEnabled => "controls/lcd/enabled",
            Self::Display => "display",
            Self::SensorLux => "sensors/lux",
        }
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value to write at one path.
///
/// Writes are independent last-write-wins updates; a sequence of them is
/// applied in order but not atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreWrite {
    path: StorePath,
    value: Value,
}

impl StoreWrite {
    /// LED switch.
    #[must_use]
    pub fn led_enabled(on: bool) -> Self {
        Self {
            path: StorePath::LedEnabled,
            value: Value::Bool(on),
        }
    }

    /// LED color.
    #[must_use]
    pub fn rgb(rgb: RgbColor) -> Self {
        Self {
            path: StorePath::Rgb,
            value: json!({ "r": rgb.red(), "g": rgb.green(), "b": rgb.blue() }),
        }
    }

    /// LCD switch.
    #[must_use]
    pub fn lcd_enabled(on: bool) -> Self {
        Self {
            path: StorePath::LcdEnabled,
            value: Value::Bool(on),
        }
    }

    /// LCD text together with its enabled flag.
    #[must_use]
    pub fn display(text: &LcdText, enabled: bool) -> Self {
        Self {
            path: StorePath::Display,
            value: json!({ "text": text.as_str(), "enabled": enabled }),
        }
    }

    /// Returns the target path.
    #[must_use]
    pub fn path(&self) -> StorePath {
        self.path
    }

    /// Returns the JSON value to store.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for StoreWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.path, self.value)
    }
}
