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

//! Conversion between `(r, g, b)` channel triples and `#rrggbb` hex strings.

const HEX_DIGITS: usize = 6;

/// Error returned when a string cannot be read as a six digit hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseHexError {
    #[error("expected 6 hex digits, got {length}")]
    InvalidLength { length: usize },
    #[error("invalid hex digit {digit:?}")]
    InvalidDigit { digit: char },
}

/// Format a color as `#rrggbb` with lowercase, zero-padded digits.
pub fn hex_of((red, green, blue): (u8, u8, u8)) -> String {
    format!("#{red:02x}{green:02x}{blue:02x}")
}

/// Parse a hex color with an optional leading `#`. Digits may be in either case.
pub fn rgb_of(hex: &str) -> Result<(u8, u8, u8), ParseHexError> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    let length = digits.chars().count();
    if length != HEX_DIGITS {
        return Err(ParseHexError::InvalidLength { length });
    }

    let mut value = 0u32;
    for digit in digits.chars() {
        let nibble = digit.to_digit(16).ok_or(ParseHexError::InvalidDigit { digit })?;
        value = (value << 4) | nibble;
    }

    Ok(((value >> 16) as u8, (value >> 8) as u8, value as u8))
}

/// Canonical lowercase form of a hex color, always with the leading `#`.
pub fn normalize(hex: &str) -> Result<String, ParseHexError> {
    rgb_of(hex).map(hex_of)
}
