//! Material colour as sent by the producer.
//!
//! The producer is not consistent about colour encoding, so parsing is
//! lenient: hex strings with or without prefix, shorthand `#rgb`, packed
//! integers and `[r, g, b]` float triples are all accepted. Anything else
//! falls back to white.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Linear RGB colour, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
}

impl Color {
    /// White, the fallback for missing or unreadable colours.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a colour from float components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a colour from a packed `0xRRGGBB` integer.
    #[must_use]
    pub fn from_rgb_u32(packed: u32) -> Self {
        let channel = |shift: u32| ((packed >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Packs the colour back into `0xRRGGBB`.
    #[must_use]
    pub fn to_rgb_u32(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Parses a hex string: `#rrggbb`, `rrggbb`, `0xrrggbb` or `#rgb`.
    #[must_use]
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text
            .trim()
            .trim_start_matches('#')
            .trim_start_matches("0x")
            .trim_start_matches("0X");
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_rgb_u32),
            3 => {
                let short = u32::from_str_radix(digits, 16).ok()?;
                let expand = |nibble: u32| nibble << 4 | nibble;
                let packed = expand((short >> 8) & 0xf) << 16
                    | expand((short >> 4) & 0xf) << 8
                    | expand(short & 0xf);
                Some(Self::from_rgb_u32(packed))
            }
            _ => None,
        }
    }

    /// Interprets an arbitrary JSON value as a colour.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::parse_hex(text).unwrap_or(Self::WHITE),
            Value::Number(n) => n
                .as_u64()
                .and_then(|packed| u32::try_from(packed).ok())
                .map_or(Self::WHITE, Self::from_rgb_u32),
            Value::Array(items) if items.len() == 3 => {
                let channel = |i: usize| items[i].as_f64().unwrap_or(1.0) as f32;
                Self::new(channel(0), channel(1), channel(2))
            }
            _ => Self::WHITE,
        }
    }

    /// Formats as `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.to_rgb_u32())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
