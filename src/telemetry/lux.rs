// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ambient light reading and how it is shown.

use std::fmt;

use serde_json::Value;

use crate::state::DeviceState;

/// Coarse brightness classification of a lux reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LuxLevel {
    /// Below 100 lux.
    Dark,
    /// 100 to 499 lux.
    Normal,
    /// 500 lux and above.
    Bright,
}

impl LuxLevel {
    /// Classifies a reading.
    #[must_use]
    pub fn classify(lux: u32) -> Self {
        match lux {
            0..100 => Self::Dark,
            100..500 => Self::Normal,
            _ => Self::Bright,
        }
    }

    /// Korean status label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dark => "어두움",
            Self::Normal => "보통",
            Self::Bright => "밝음",
        }
    }
}

impl fmt::Display for LuxLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the light sensor panel shows for a state.
///
/// # Examples
///
/// ```
/// use voxlight::state::DeviceState;
/// use voxlight::telemetry::LuxDisplay;
///
/// let shown = LuxDisplay::for_state(&DeviceState::new().with_sensor(true).with_lux(250));
/// assert_eq!(shown.text(), "250 lux");
/// assert_eq!(shown.status(), "보통");
///
/// let hidden = LuxDisplay::for_state(&DeviceState::new().with_lux(250));
/// assert_eq!(hidden.text(), "--- lux");
/// assert_eq!(hidden.progress(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuxDisplay {
    text: String,
    progress: u16,
    status: &'static str,
}

impl LuxDisplay {
    /// Upper end of the progress bar.
    pub const PROGRESS_MAX: u16 = 1000;

    /// Builds the panel contents for a state.
    #[must_use]
    pub fn for_state(state: &DeviceState) -> Self {
        if !state.sensor_on() {
            return Self {
                text: "--- lux".to_string(),
                progress: 0,
                status: "측정 중지",
            };
        }

        let lux = state.last_lux();
        Self {
            text: format!("{lux} lux"),
            progress: u16::try_from(lux)
                .unwrap_or(Self::PROGRESS_MAX)
                .min(Self::PROGRESS_MAX),
            status: LuxLevel::classify(lux).label(),
        }
    }

    /// The reading, e.g. `"250 lux"`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Progress bar position, `0..=1000`.
    #[must_use]
    pub fn progress(&self) -> u16 {
        self.progress
    }

    /// Status label.
    #[must_use]
    pub fn status(&self) -> &'static str {
        self.status
    }
}

/// Reads a lux value stored at `sensors/lux`.
///
/// Negative values read as 0 and fractions are rounded. Returns `None` for
/// anything that is not a number.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lux_from_value(value: &Value) -> Option<u32> {
    if let Some(lux) = value.as_u64() {
        return Some(u32::try_from(lux).unwrap_or(u32::MAX));
    }
    if value.as_i64().is_some() {
        return Some(0);
    }
    value
        .as_f64()
        .map(|lux| lux.round().clamp(0.0, f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn level_boundaries() {
        assert_eq!(LuxLevel::classify(0), LuxLevel::Dark);
        assert_eq!(LuxLevel::classify(99), LuxLevel::Dark);
        assert_eq!(LuxLevel::classify(100), LuxLevel::Normal);
        assert_eq!(LuxLevel::classify(499), LuxLevel::Normal);
        assert_eq!(LuxLevel::classify(500), LuxLevel::Bright);
    }

    #[test]
    fn display_clamps_progress() {
        let state = DeviceState::new().with_sensor(true).with_lux(5000);
        let shown = LuxDisplay::for_state(&state);
        assert_eq!(shown.text(), "5000 lux");
        assert_eq!(shown.progress(), 1000);
        assert_eq!(shown.status(), "밝음");

        let state = DeviceState::new().with_sensor(true).with_lux(70_000);
        assert_eq!(LuxDisplay::for_state(&state).progress(), 1000);
    }

    #[test]
    fn display_when_off() {
        let shown = LuxDisplay::for_state(&DeviceState::new());
        assert_eq!(shown.status(), "측정 중지");
    }

    #[test]
    fn lux_values() {
        assert_eq!(lux_from_value(&json!(320)), Some(320));
        assert_eq!(lux_from_value(&json!(-4)), Some(0));
        assert_eq!(lux_from_value(&json!(12.6)), Some(13));
        assert_eq!(lux_from_value(&json!(1e20)), Some(u32::MAX));
        assert_eq!(lux_from_value(&json!("320")), None);
        assert_eq!(lux_from_value(&json!(null)), None);
    }
}
