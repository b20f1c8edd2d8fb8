//! Design categories offered when starting a new design.

use crate::tone::Tone;
use serde::Serialize;

/// A kind of stationery with its default artboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    pub suggested_tone: Tone,
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Invitation Card",
        width: 500.0,
        height: 700.0,
        suggested_tone: Tone::Classical,
    },
    Category {
        name: "Save the Date",
        width: 700.0,
        height: 500.0,
        suggested_tone: Tone::Floral,
    },
    Category {
        name: "Menu",
        width: 400.0,
        height: 900.0,
        suggested_tone: Tone::Minimal,
    },
    Category {
        name: "Program",
        width: 500.0,
        height: 800.0,
        suggested_tone: Tone::Modern,
    },
    Category {
        name: "Thank You Card",
        width: 600.0,
        height: 420.0,
        suggested_tone: Tone::Luxe,
    },
    Category {
        name: "Place Card",
        width: 350.0,
        height: 250.0,
        suggested_tone: Tone::Minimal,
    },
];

/// Find a category by name, ignoring ASCII case.
pub fn find_category(name: &str) -> Option<&'static Category> {
    let name = name.trim();
    CATEGORIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}
