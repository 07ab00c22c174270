// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Naming colors after the closest entry of a small fixed table.

use crate::{distance::weighted_distance, hex};

/// Returned for input that can't be read as a color.
pub const UNKNOWN_COLOR_NAME: &str = "Unknown";

/// Reference colors and their names. Earlier entries win ties.
pub const COLOR_NAMES: [(&str, &str); 32] = [
    ("#FF0000", "Red"),
    ("#FF4500", "Orange Red"),
    ("#FFA500", "Orange"),
    ("#FFFF00", "Yellow"),
    ("#FFFFE0", "Light Yellow"),
    ("#ADFF2F", "Green Yellow"),
    ("#008000", "Green"),
    ("#00FF00", "Lime"),
    ("#00FFFF", "Cyan"),
    ("#008080", "Teal"),
    ("#0000FF", "Blue"),
    ("#000080", "Navy"),
    ("#800080", "Purple"),
    ("#FF00FF", "Magenta"),
    ("#FFC0CB", "Pink"),
    ("#FFB6C1", "Light Pink"),
    ("#800000", "Maroon"),
    ("#A52A2A", "Brown"),
    ("#FFFFFF", "White"),
    ("#F5F5F5", "White Smoke"),
    ("#DCDCDC", "Gainsboro"),
    ("#D3D3D3", "Light Gray"),
    ("#C0C0C0", "Silver"),
    ("#A9A9A9", "Dark Gray"),
    ("#808080", "Gray"),
    ("#696969", "Dim Gray"),
    ("#000000", "Black"),
    ("#F5F5DC", "Beige"),
    ("#FFE4C4", "Bisque"),
    ("#FFDEAD", "Navajo White"),
    ("#D2B48C", "Tan"),
    ("#BC8F8F", "Rosy Brown"),
];

/// Name a hex color after the closest entry in [`COLOR_NAMES`].
///
/// Never fails. Only the first three two-digit groups are read, so `#ff0000ff` is named like
/// `#ff0000`; anything without three readable channels is named [`UNKNOWN_COLOR_NAME`].
pub fn name_of(input: &str) -> &'static str {
    if let Ok(normalized) = hex::normalize(input) {
        if let Some(&(_, name)) = COLOR_NAMES
            .iter()
            .find(|(entry, _)| entry.eq_ignore_ascii_case(&normalized))
        {
            return name;
        }
    }

    match read_channels(input) {
        Some(rgb) => name_of_rgb(rgb),
        None => {
            tracing::debug!(input, "cannot name unparseable color");
            UNKNOWN_COLOR_NAME
        }
    }
}

/// Read the first three two-digit groups after an optional `#`, ignoring anything after them. A
/// group only needs to start with a hex digit; it ends at the first character that isn't one.
fn read_channels(input: &str) -> Option<(u8, u8, u8)> {
    let digits = input.trim();
    let digits: Vec<char> = digits.strip_prefix('#').unwrap_or(digits).chars().take(6).collect();

    let channel = |group: usize| {
        let start = (group * 2).min(digits.len());
        let end = (group * 2 + 2).min(digits.len());

        let mut value = None;
        for digit in &digits[start..end] {
            match digit.to_digit(16) {
                Some(nibble) => value = Some(value.unwrap_or(0) * 16 + nibble),
                None => break,
            }
        }

        value.map(|value| value as u8)
    };

    Some((channel(0)?, channel(1)?, channel(2)?))
}

/// Name a color after the closest entry in [`COLOR_NAMES`].
pub fn name_of_rgb(rgb: (u8, u8, u8)) -> &'static str {
    nearest_name(rgb, &COLOR_NAMES).unwrap_or(UNKNOWN_COLOR_NAME)
}

fn nearest_name(rgb: (u8, u8, u8), table: &[(&'static str, &'static str)]) -> Option<&'static str> {
    let mut min_distance = f32::MAX;
    let mut min_name = None;

    for &(entry, name) in table {
        let entry_rgb = match hex::rgb_of(entry) {
            Ok(entry_rgb) => entry_rgb,
            Err(err) => {
                tracing::warn!(entry, name, %err, "skipping malformed color name entry");
                continue;
            }
        };

        let distance = weighted_distance(rgb, entry_rgb);
        if distance < min_distance {
            min_distance = distance;
            min_name = Some(name);
        }
    }

    min_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_entries_name_themselves() {
        for (hex, name) in COLOR_NAMES {
            assert_eq!(name_of(hex), name);
            assert_eq!(name_of(&hex.to_lowercase()), name);
        }
    }

    #[test]
    fn common_names() {
        assert_eq!(name_of("#FF0000"), "Red");
        assert_eq!(name_of("#000000"), "Black");
        assert_eq!(name_of("0000ff"), "Blue");
    }

    #[test]
    fn near_colors_take_the_closest_name() {
        assert_eq!(name_of("#FE0000"), "Red");
        assert_eq!(name_of("#7f7f7f"), "Gray");
        assert_eq!(name_of("#00007F"), "Navy");
        assert_eq!(name_of("#010203"), "Black");
        assert_eq!(name_of("#FFFFFE"), "White");
        assert_eq!(name_of_rgb((250, 70, 5)), "Orange Red");
    }

    #[test]
    fn unparseable_input_is_unknown() {
        for input in ["", "#", "red", "#ff00", "#gg0000", "#ff 000", "#fffz"] {
            assert_eq!(name_of(input), UNKNOWN_COLOR_NAME, "input {input:?}");
        }
    }

    #[test]
    fn reads_the_first_three_channels_of_longer_input() {
        assert_eq!(name_of("#ff0000ff"), "Red");
        assert_eq!(name_of("#ff00000"), "Red");
        assert_eq!(name_of("0000FF80"), "Blue");
        assert_eq!(name_of("#FF0000 "), "Red");
    }

    #[test]
    fn channels_end_at_the_first_non_hex_digit() {
        assert_eq!(read_channels("#12345z"), Some((0x12, 0x34, 0x5)));
        assert_eq!(read_channels("#f0f0fz"), Some((0xf0, 0xf0, 0xf)));
        assert_eq!(read_channels("#ff00"), None);
        assert_eq!(read_channels("#ffz000"), None);
        assert_eq!(name_of("#12345z"), "Black");
    }

    #[test]
    fn first_of_equally_close_entries_wins() {
        let table = [("#000000", "First"), ("#000000", "Second")];
        assert_eq!(nearest_name((10, 10, 10), &table), Some("First"));

        // (0, 0, 0) and (20, 0, 0) are the same distance from (10, 0, 0)
        let table = [("#140000", "Lighter"), ("#000000", "Darker")];
        assert_eq!(nearest_name((10, 0, 0), &table), Some("Lighter"));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let table = [("#zz0000", "Broken"), ("#ff0000", "Red")];
        assert_eq!(nearest_name((0, 0, 0), &table), Some("Red"));

        let table = [("nope", "Broken")];
        assert_eq!(nearest_name((0, 0, 0), &table), None);
    }
}
