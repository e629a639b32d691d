// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Text shown on the device's character LCD.

use std::fmt;

/// Text for the LCD, at most [`LcdText::MAX_CHARS`] characters.
///
/// Longer input is truncated on construction, counting characters rather
/// than bytes so Korean text is never cut mid-character.
///
/// # Examples
///
/// ```
/// use voxlight::types::LcdText;
///
/// let text = LcdText::new("안녕하세요");
/// assert_eq!(text.as_str(), "안녕하세요");
///
/// let long = LcdText::new("x".repeat(40));
/// assert_eq!(long.as_str().chars().count(), LcdText::MAX_CHARS);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LcdText(String);

impl LcdText {
    /// Two 16-character rows.
    pub const MAX_CHARS: usize = 32;

    /// Shown when the classifier asks for LCD text but gives none.
    pub const PLACEHOLDER: &'static str = "Hello!";

    /// Creates LCD text, truncating to [`Self::MAX_CHARS`] characters.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if let Some((cut, _)) = text.char_indices().nth(Self::MAX_CHARS) {
            text.truncate(cut);
        }
        Self(text)
    }

    /// The placeholder text.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(Self::PLACEHOLDER.to_string())
    }

    /// Returns the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if there is no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LcdText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LcdText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
