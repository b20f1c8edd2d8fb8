//! Tone presets: the house style applied when a design category is chosen.

use crate::model::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named visual theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Classical,
    Floral,
    Modern,
    Minimal,
    Luxe,
}

/// Palette and font a tone applies to a blank document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonePreset {
    pub background_color: Color,
    pub text_color: Color,
    pub font_family: &'static str,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Classical,
        Tone::Floral,
        Tone::Modern,
        Tone::Minimal,
        Tone::Luxe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Classical => "Classical",
            Tone::Floral => "Floral",
            Tone::Modern => "Modern",
            Tone::Minimal => "Minimal",
            Tone::Luxe => "Luxe",
        }
    }

    /// Look up the tone's palette and font.
    pub fn preset(&self) -> TonePreset {
        match self {
            Tone::Classical => TonePreset {
                background_color: Color::rgb8(0xFD, 0xFB, 0xF7),
                text_color: Color::rgb8(0x34, 0x40, 0x54),
                font_family: "font-serif",
            },
            Tone::Floral => TonePreset {
                background_color: Color::rgb8(0xFF, 0xF1, 0xF3),
                text_color: Color::rgb8(0x9F, 0x12, 0x39),
                font_family: "font-serif",
            },
            Tone::Modern => TonePreset {
                background_color: Color::rgb8(0x1D, 0x29, 0x39),
                text_color: Color::rgb8(0xFF, 0xFF, 0xFF),
                font_family: "font-sans",
            },
            Tone::Minimal => TonePreset {
                background_color: Color::rgb8(0xFF, 0xFF, 0xFF),
                text_color: Color::rgb8(0x10, 0x18, 0x28),
                font_family: "font-sans",
            },
            Tone::Luxe => TonePreset {
                background_color: Color::rgb8(0x0C, 0x11, 0x1D),
                text_color: Color::rgb8(0xD4, 0xAF, 0x37),
                font_family: "font-serif",
            },
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tone: {s}"))
    }
}
