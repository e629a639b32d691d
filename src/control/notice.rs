// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Short user-facing feedback messages.

use std::fmt;

use crate::types::{LcdText, RgbColor};

/// Feedback to show the user after a command, as a toast or status line.
///
/// The `Display` text is the Korean message the screen shows.
///
/// ```
/// use voxlight::control::Notice;
///
/// assert_eq!(Notice::LedOn.to_string(), "LED 켜짐");
/// assert_eq!(Notice::NotUnderstood.to_string(), "명령 분석 중 오류");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The LED was switched on.
    LedOn,
    /// The LED was switched off.
    LedOff,
    /// The lux reading is now shown.
    SensorOn,
    /// The lux reading is now hidden.
    SensorOff,
    /// The LCD was switched on.
    LcdOn,
    /// The LCD was switched off.
    LcdOff,
    /// Text was sent to the LCD.
    LcdText(LcdText),
    /// The LED was set to a named color.
    ColorChanged(String),
    /// The LED was set to an RGB triple.
    RgbChanged(RgbColor),
    /// The utterance could not be turned into a command.
    NotUnderstood,
    /// At least one store write failed.
    StoreWriteFailed,
}

impl Notice {
    /// Returns `true` for notices that report a problem.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::NotUnderstood | Self::StoreWriteFailed)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LedOn => f.write_str("LED 켜짐"),
            Self::LedOff => f.write_str("LED 꺼짐"),
            Self::SensorOn => f.write_str("조도 센서 켜짐"),
            Self::SensorOff => f.write_str("조도 센서 꺼짐"),
            Self::LcdOn => f.write_str("LCD 켜짐"),
            Self::LcdOff => f.write_str("LCD 꺼짐"),
            Self::LcdText(text) => write!(f, "LCD 표시: {text}"),
            Self::ColorChanged(name) => write!(f, "{name} LED로 변경"),
            Self::RgbChanged(rgb) => write!(
                f,
                "RGB({}, {}, {}) LED로 변경",
                rgb.red(),
                rgb.green(),
                rgb.blue()
            ),
            Self::NotUnderstood => f.write_str("명령 분석 중 오류"),
            Self::StoreWriteFailed => f.write_str("기기 상태 저장 실패"),
        }
    }
}
