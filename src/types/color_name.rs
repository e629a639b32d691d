// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spoken color names.
//!
//! The classifier hands back whatever color word the user said, usually a
//! Korean name such as `빨간색` or a loanword such as `레드`. Lookup ignores
//! whitespace and ASCII case, and accepts the bare stem without the trailing
//! `색` (`파란` for `파란색`).

use super::ColorSample;

/// Name used when the classifier asks for a color change without naming one.
pub const DEFAULT_COLOR_NAME: &str = "흰색";

const NAMED_COLORS: &[(&[&str], ColorSample)] = &[
    (&["빨간색", "레드", "red"], ColorSample::pure(0)),
    (&["주황색", "오렌지", "orange"], ColorSample::pure(30)),
    (&["노란색", "옐로우", "yellow"], ColorSample::pure(60)),
    (&["초록색", "그린", "green"], ColorSample::pure(120)),
    (&["하늘색", "스카이블루", "skyblue", "cyan"], ColorSample::pure(180)),
    (&["파란색", "블루", "blue"], ColorSample::pure(240)),
    (&["보라색", "퍼플", "자주색", "purple", "violet"], ColorSample::pure(270)),
    (&["분홍색", "핑크", "pink", "magenta"], ColorSample::pure(300)),
    (&["흰색", "화이트", "white"], ColorSample::white()),
];

/// Looks up a spoken color name.
///
/// Returns `None` for names outside the table.
///
/// # Examples
///
/// ```
/// use voxlight::types::{lookup_color, ColorSample};
///
/// assert_eq!(lookup_color("빨간 색"), Some(ColorSample::pure(0)));
/// assert_eq!(lookup_color("Blue"), Some(ColorSample::pure(240)));
/// assert_eq!(lookup_color("금색"), None);
/// ```
#[must_use]
pub fn lookup_color(name: &str) -> Option<ColorSample> {
    let key: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if key.is_empty() {
        return None;
    }

    find(&key).or_else(|| {
        if key.ends_with('색') {
            None
        } else {
            find(&format!("{key}색"))
        }
    })
}

/// Looks up a spoken color name, falling back to white for unknown names.
#[must_use]
pub fn color_for_name(name: &str) -> ColorSample {
    lookup_color(name).unwrap_or_else(ColorSample::white)
}

fn find(key: &str) -> Option<ColorSample> {
    NAMED_COLORS
        .iter()
        .find(|(aliases, _)| aliases.contains(&key))
        .map(|(_, sample)| *sample)
}
