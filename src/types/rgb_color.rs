// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with HSV conversion.
//!
//! The conversion follows the 8-bit platform algorithm used by the sliders
//! (value, `p`, `q` and `t` are each rounded to a byte), so named colors and
//! slider positions map to exactly the same triples the device has always
//! received.

use std::fmt;

/// RGB color with 8-bit channels (0-255).
///
/// Serializes as `{"r": .., "g": .., "b": ..}`, which is the shape stored at
/// `controls/rgb`.
///
/// # Examples
///
/// ```
/// use voxlight::types::RgbColor;
///
/// let color = RgbColor::from_hsv(0.0, 1.0, 1.0);
/// assert_eq!(color, RgbColor::new(255, 0, 0));
/// assert_eq!(color.to_hex(), "FF0000");
///
/// let hsv = RgbColor::new(0, 0, 255).to_hsv();
/// assert!((hsv.hue - 240.0).abs() < f32::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct RgbColor {
    r: u8,
    g: u8,
    b: u8,
}

/// Floating point HSV triple.
///
/// `hue` is in degrees `[0, 360)`, `saturation` and `value` are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in degrees.
    pub hue: f32,
    /// Saturation in `[0, 1]`.
    pub saturation: f32,
    /// Value in `[0, 1]`.
    pub value: f32,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from channel values of any integer range, clamping
    /// each channel independently to `[0, 255]`.
    ///
    /// ```
    /// use voxlight::types::RgbColor;
    ///
    /// assert_eq!(RgbColor::clamped(300, -5, 10), RgbColor::new(255, 0, 10));
    /// ```
    #[must_use]
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.r
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.g
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.b
    }

    /// Returns `true` if every channel is zero.
    #[must_use]
    pub const fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Returns the color as a hex string without the hash prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts an HSV triple to RGB.
    ///
    /// Saturation and value are clamped to `[0, 1]`. A hue outside
    /// `[0, 360)` is treated as 0, so 360 is red again.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::many_single_char_names
    )]
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);
        let v_byte = to_byte(v);

        if s <= GREYSCALE_SATURATION {
            return Self::new(v_byte, v_byte, v_byte);
        }

        let hx = if (0.0..360.0).contains(&hue) {
            hue / 60.0
        } else {
            0.0
        };
        let sector = hx.floor();
        let f = hx - sector;

        let p = to_byte((1.0 - s) * v);
        let q = to_byte((1.0 - s * f) * v);
        let t = to_byte((1.0 - s * (1.0 - f)) * v);

        let (r, g, b) = match sector as u8 {
            0 => (v_byte, t, p),
            1 => (q, v_byte, p),
            2 => (p, v_byte, t),
            3 => (p, q, v_byte),
            4 => (t, p, v_byte),
            _ => (v_byte, p, q),
        };
        Self::new(r, g, b)
    }

    /// Converts this color to HSV.
    ///
    /// Greys (including black) report hue 0 and saturation 0.
    #[must_use]
    pub fn to_hsv(&self) -> Hsv {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = f32::from(max - min);
        let value = f32::from(max) / 255.0;

        if max == min {
            return Hsv {
                hue: 0.0,
                saturation: 0.0,
                value,
            };
        }

        let (r, g, b) = (f32::from(self.r), f32::from(self.g), f32::from(self.b));
        let sector = if self.r == max {
            (g - b) / delta
        } else if self.g == max {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };

        let mut hue = sector * 60.0;
        if hue < 0.0 {
            hue += 360.0;
        }

        Hsv {
            hue,
            saturation: delta / f32::from(max),
            value,
        }
    }

    /// Full white.
    #[must_use]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// All channels off.
    #[must_use]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

// Saturation at or below this is rendered as a pure grey.
const GREYSCALE_SATURATION: f32 = 1.0 / 4096.0;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_byte(unit: f32) -> u8 {
    (unit * 255.0).round() as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}
