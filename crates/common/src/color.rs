use serde::{Deserialize, Serialize};

/// Linear RGB color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Errors from parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("expected '#rrggbb', got {0:?}")]
    BadFormat(String),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    /// Accent palette used by the decorative presets.
    pub const BLUE: Color = Color::rgb8(0x3b, 0x82, 0xf6);
    pub const VIOLET: Color = Color::rgb8(0x8b, 0x5c, 0xf6);
    pub const CYAN: Color = Color::rgb8(0x06, 0xb6, 0xd4);
    pub const PINK: Color = Color::rgb8(0xec, 0x48, 0x99);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` hex string.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::BadFormat(s.to_string()))?;
        // Byte length alone is not enough: a multi-byte char would make the
        // digit slices below land off a char boundary.
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError::BadFormat(s.to_string()));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::BadDigit(s.to_string()))
        };
        Ok(Self::rgb8(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }

    /// Parse a hex string, falling back to the default accent on failure.
    /// Malformed colors are a configuration misuse, not an error condition.
    pub fn from_hex_or_default(s: &str) -> Self {
        Self::from_hex(s).unwrap_or(Self::BLUE)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_hex() {
        assert_eq!(Color::from_hex("#3b82f6").unwrap(), Color::BLUE);
        assert_eq!(Color::from_hex("#ffffff").unwrap(), Color::WHITE);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(
            Color::from_hex("3b82f6"),
            Err(ColorParseError::BadFormat(_))
        ));
        assert!(matches!(
            Color::from_hex("#3b82f"),
            Err(ColorParseError::BadFormat(_))
        ));
        assert!(matches!(
            Color::from_hex("#zzzzzz"),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn rejects_non_ascii_hex() {
        // "\u{20ac}" is three bytes, so this is six bytes but not six digits.
        assert!(matches!(
            Color::from_hex("#a\u{20ac}bc"),
            Err(ColorParseError::BadFormat(_))
        ));
        assert_eq!(Color::from_hex_or_default("#a\u{20ac}bc"), Color::BLUE);
    }

    #[test]
    fn malformed_hex_falls_back_to_accent() {
        assert_eq!(Color::from_hex_or_default("not-a-color"), Color::BLUE);
    }

    #[test]
    fn channels_normalized() {
        let c = Color::rgb8(255, 0, 128);
        assert!((c.r - 1.0).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 128.0 / 255.0).abs() < 1e-6);
    }
}
