use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{FluxError, Result};

/// Name given to a gradient once either endpoint has been edited by hand.
pub const CUSTOM_NAME: &str = "Custom";

/// An opaque sRGB color, displayed as uppercase `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Hex form with an extra alpha byte, e.g. `#007AFF15`.
    pub fn to_hex_with_alpha(self, alpha: u8) -> String {
        format!("{self}{alpha:02X}")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = FluxError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FluxError::InvalidColor(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Self::from_u32(value)),
            3 => {
                let expand = |nibble: u32| (nibble as u8) * 0x11;
                Ok(Self::new(
                    expand((value >> 8) & 0xF),
                    expand((value >> 4) & 0xF),
                    expand(value & 0xF),
                ))
            }
            _ => Err(invalid()),
        }
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A named pair of endpoint colors for a linear gradient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientSpec {
    pub name: String,
    pub color_from: Rgb,
    pub color_to: Rgb,
}

impl GradientSpec {
    pub fn new(name: impl Into<String>, color_from: Rgb, color_to: Rgb) -> Self {
        Self {
            name: name.into(),
            color_from,
            color_to,
        }
    }

    /// A hand-edited gradient.
    pub fn custom(color_from: Rgb, color_to: Rgb) -> Self {
        Self::new(CUSTOM_NAME, color_from, color_to)
    }

    pub fn with_from(&self, color: Rgb) -> Self {
        Self::custom(color, self.color_to)
    }

    pub fn with_to(&self, color: Rgb) -> Self {
        Self::custom(self.color_from, color)
    }

    pub fn is_custom(&self) -> bool {
        self.name == CUSTOM_NAME
    }

    /// CSS `linear-gradient(...)` expression at the given angle.
    pub fn css(&self, angle_deg: u32) -> String {
        format!(
            "linear-gradient({angle_deg}deg, {}, {})",
            self.color_from, self.color_to
        )
    }
}

impl Default for GradientSpec {
    fn default() -> Self {
        PRESETS[0].spec()
    }
}

/// The fixed gradient presets, in display order.
pub static PRESETS: [Preset; 8] = [
    Preset::new("Ocean Blue", 0x007AFF, 0x5856D6),
    Preset::new("Sunset", 0xFF2D55, 0xFF9500),
    Preset::new("Mint Green", 0x34C759, 0x30D158),
    Preset::new("Purple Dream", 0x5E5CE6, 0xBF5AF2),
    Preset::new("Coral Burst", 0xFF9F0A, 0xFF375F),
    Preset::new("Sky Blue", 0x00C7BE, 0x007AFF),
    Preset::new("Rose Gold", 0xFF6482, 0xFFB347),
    Preset::new("Forest", 0x32D74B, 0x64D2FF),
];

/// Entry of the fixed preset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub from: Rgb,
    pub to: Rgb,
}

impl Preset {
    const fn new(name: &'static str, from: u32, to: u32) -> Self {
        Self {
            name,
            from: Rgb::from_u32(from),
            to: Rgb::from_u32(to),
        }
    }

    pub fn spec(&self) -> GradientSpec {
        GradientSpec::new(self.name, self.from, self.to)
    }

    pub fn get(index: usize) -> Option<&'static Preset> {
        PRESETS.get(index)
    }

    /// Case-insensitive lookup by display name.
    pub fn find(name: &str) -> Result<&'static Preset> {
        let wanted = name.trim();
        PRESETS
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FluxError::UnknownPreset(name.to_string()))
    }

    /// True when `gradient` is exactly one of the presets.
    pub fn contains(gradient: &GradientSpec) -> bool {
        PRESETS.iter().any(|preset| preset.spec() == *gradient)
    }
}
