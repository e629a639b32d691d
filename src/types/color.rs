// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HSV color sample in slider units.
//!
//! A [`ColorSample`] is what the hue/saturation/value sliders show: hue in
//! whole degrees and saturation/value in whole percent. Named colors are
//! defined in these units and converted to RGB only when written to the
//! store.

use std::fmt;

use crate::error::ValueError;

use super::RgbColor;

/// HSV color with integer slider units (Hue 0-360, Saturation 0-100, Value 0-100).
///
/// # Examples
///
/// ```
/// use voxlight::types::{ColorSample, RgbColor};
///
/// let red = ColorSample::new(0, 100, 100).unwrap();
/// assert_eq!(red.to_rgb(), RgbColor::new(255, 0, 0));
///
/// let orange = ColorSample::new(30, 100, 100).unwrap();
/// assert_eq!(orange.to_rgb(), RgbColor::new(255, 128, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawColorSample")]
pub struct ColorSample {
    hue: u16,
    saturation: u8,
    value: u8,
}

impl ColorSample {
    /// Maximum hue value (wraps at 360).
    pub const MAX_HUE: u16 = 360;

    /// Maximum saturation value.
    pub const MAX_SATURATION: u8 = 100;

    /// Maximum value (brightness).
    pub const MAX_VALUE: u8 = 100;

    /// Creates a new sample.
    ///
    /// # Arguments
    ///
    /// * `hue` - Color hue (0-360 degrees, where 0/360 is red)
    /// * `saturation` - Color saturation (0-100%)
    /// * `value` - Color value (0-100%)
    ///
    /// # Errors
    ///
    /// Returns error if any value is outside its valid range.
    pub fn new(hue: u16, saturation: u8, value: u8) -> Result<Self, ValueError> {
        if hue > Self::MAX_HUE {
            return Err(ValueError::InvalidHue(hue));
        }
        if saturation > Self::MAX_SATURATION {
            return Err(ValueError::InvalidSaturation(saturation));
        }
        if value > Self::MAX_VALUE {
            return Err(ValueError::InvalidValue(value));
        }
        Ok(Self {
            hue,
            saturation,
            value,
        })
    }

    /// Creates a fully saturated, full value color at the given hue.
    ///
    /// Hues above 360 wrap around.
    #[must_use]
    pub const fn pure(hue: u16) -> Self {
        Self {
            hue: hue % 360,
            saturation: 100,
            value: 100,
        }
    }

    /// White (no saturation, full value).
    #[must_use]
    pub const fn white() -> Self {
        Self {
            hue: 0,
            saturation: 0,
            value: 100,
        }
    }

    /// Black (all sliders at zero).
    #[must_use]
    pub const fn black() -> Self {
        Self {
            hue: 0,
            saturation: 0,
            value: 0,
        }
    }

    /// Returns the hue value (0-360).
    #[must_use]
    pub const fn hue(&self) -> u16 {
        self.hue
    }

    /// Returns the saturation value (0-100).
    #[must_use]
    pub const fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Returns the value (0-100).
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Converts the sample to an RGB triple.
    #[must_use]
    pub fn to_rgb(&self) -> RgbColor {
        RgbColor::from_hsv(
            f32::from(self.hue),
            f32::from(self.saturation) / 100.0,
            f32::from(self.value) / 100.0,
        )
    }

    /// Returns the slider positions that show the given RGB color.
    ///
    /// Each component is rounded to the nearest slider step.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_rgb(rgb: RgbColor) -> Self {
        let hsv = rgb.to_hsv();
        Self {
            hue: (hsv.hue.round() as u16).min(Self::MAX_HUE),
            saturation: ((hsv.saturation * 100.0).round() as u8).min(Self::MAX_SATURATION),
            value: ((hsv.value * 100.0).round() as u8).min(Self::MAX_VALUE),
        }
    }
}

// Unchecked wire form; deserialization goes through `ColorSample::new`.
#[derive(serde::Deserialize)]
struct RawColorSample {
    hue: u16,
    saturation: u8,
    value: u8,
}

impl TryFrom<RawColorSample> for ColorSample {
    type Error = ValueError;

    fn try_from(raw: RawColorSample) -> Result<Self, Self::Error> {
        Self::new(raw.hue, raw.saturation, raw.value)
    }
}

impl Default for ColorSample {
    fn default() -> Self {
        Self::white()
    }
}

impl From<ColorSample> for RgbColor {
    fn from(sample: ColorSample) -> Self {
        sample.to_rgb()
    }
}

impl fmt::Display for ColorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HSV({}, {}%, {}%)", self.hue, self.saturation, self.value)
    }
}
