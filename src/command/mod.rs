// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device commands and the voice command resolver.
//!
//! A [`DeviceCommand`] is one user intent, produced either by a UI event or
//! by resolving classifier output with [`resolve`]. Commands are consumed
//! immediately by [`control::apply`](crate::control::apply) and never stored.
//!
//! # Available Commands
//!
//! | Command | Classifier action | Effect |
//! |---------|-------------------|--------|
//! | [`DeviceCommand::LedOn`] | `led_on` | LED on, white if it was dark |
//! | [`DeviceCommand::LedOff`] | `led_off` | LED off, color zeroed |
//! | [`DeviceCommand::SensorOn`] | `sensor_on` | Show the lux reading |
//! | [`DeviceCommand::SensorOff`] | `sensor_off` | Hide the lux reading |
//! | [`DeviceCommand::LcdOn`] | `lcd_on` | LCD on |
//! | [`DeviceCommand::LcdOff`] | `lcd_off` | LCD off |
//! | [`DeviceCommand::LcdText`] | `lcd_text` | Show text, LCD on |
//! | [`DeviceCommand::SetColor`] | `led_color`, `rgb` + `color` | Named color |
//! | [`DeviceCommand::SetRgb`] | `rgb` + `r`,`g`,`b` | Raw color |
//!
//! # Examples
//!
//! ```
//! use voxlight::command::{resolve, DeviceCommand};
//! use voxlight::types::RgbColor;
//!
//! let cmd = resolve("```json\n{\"action\":\"led_on\"}\n```");
//! assert_eq!(cmd, DeviceCommand::LedOn);
//!
//! let cmd = resolve(r#"{"action":"rgb","r":300,"g":-5,"b":10}"#);
//! assert_eq!(cmd, DeviceCommand::SetRgb(RgbColor::new(255, 0, 10)));
//!
//! assert_eq!(resolve("not json"), DeviceCommand::Unknown);
//! ```

mod prompt;
mod resolver;

pub use prompt::build_prompt;
pub use resolver::{resolve, strip_code_fence, try_resolve};

use std::fmt;

use crate::types::{ColorSample, LcdText, RgbColor};

/// A typed device command representing one user intent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceCommand {
    /// Turn the LED on.
    LedOn,
    /// Turn the LED off.
    LedOff,
    /// Show the ambient light reading.
    SensorOn,
    /// Hide the ambient light reading.
    SensorOff,
    /// Turn the LCD on.
    LcdOn,
    /// Turn the LCD off.
    LcdOff,
    /// Show text on the LCD.
    LcdText(LcdText),
    /// Set the LED to a spoken color name.
    SetColor {
        /// The color name as the user said it.
        name: String,
    },
    /// Set the LED to an RGB triple.
    SetRgb(RgbColor),
    /// The classifier produced nothing this crate recognizes.
    Unknown,
}

impl DeviceCommand {
    /// Creates a color command from slider positions.
    ///
    /// ```
    /// use voxlight::command::DeviceCommand;
    /// use voxlight::types::{ColorSample, RgbColor};
    ///
    /// let cmd = DeviceCommand::from_sample(ColorSample::pure(120));
    /// assert_eq!(cmd, DeviceCommand::SetRgb(RgbColor::new(0, 255, 0)));
    /// ```
    #[must_use]
    pub fn from_sample(sample: ColorSample) -> Self {
        Self::SetRgb(sample.to_rgb())
    }

    /// Creates a named color command.
    #[must_use]
    pub fn color(name: impl Into<String>) -> Self {
        Self::SetColor { name: name.into() }
    }

    /// Creates an LCD text command, truncating the text if needed.
    #[must_use]
    pub fn lcd_text(text: impl Into<String>) -> Self {
        Self::LcdText(LcdText::new(text))
    }

    /// Returns `true` for [`DeviceCommand::Unknown`].
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns the classifier action name this command corresponds to.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::LedOn => "led_on",
            Self::LedOff => "led_off",
            Self::SensorOn => "sensor_on",
            Self::SensorOff => "sensor_off",
            Self::LcdOn => "lcd_on",
            Self::LcdOff => "lcd_off",
            Self::LcdText(_) => "lcd_text",
            Self::SetColor { .. } => "led_color",
            Self::SetRgb(_) => "rgb",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LcdText(text) => write!(f, "lcd_text({text})"),
            Self::SetColor { name } => write!(f, "led_color({name})"),
            Self::SetRgb(rgb) => write!(f, "rgb({rgb})"),
            other => f.write_str(other.action()),
        }
    }
}
