//! Flat element patches.
//!
//! Callers (property panel, host UI) send a flat key → value map such as
//! `{"x": 40, "color": "#FFFFFF"}`. Keys in the style allow-list are routed
//! into the element's style; the remaining known keys are root geometry.
//! Routing is decided by key name only, never by inspecting the element.
//!
//! A style key that the element's kind has no field for (e.g. `fontSize` on
//! a shape) is ignored. Unknown keys are ignored as well.

use serde_json::{Map, Value};
use studio_core::{Color, Element, ElementStyle, TextAlign};

/// Keys routed into the style of an element.
pub const STYLE_KEYS: &[&str] = &[
    "backgroundColor",
    "color",
    "fontSize",
    "fontFamily",
    "fontWeight",
    "textAlign",
    "borderRadius",
    "opacity",
    "border",
    "boxShadow",
];

/// Keys routed onto the element itself.
pub const GEOMETRY_KEYS: &[&str] = &["x", "y", "width", "height", "rotation", "content"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKey {
    BackgroundColor,
    Color,
    FontSize,
    FontFamily,
    FontWeight,
    TextAlign,
    BorderRadius,
    Opacity,
    Border,
    BoxShadow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKey {
    X,
    Y,
    Width,
    Height,
    Rotation,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchKey {
    Geometry(GeometryKey),
    Style(StyleKey),
}

impl StyleKey {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "backgroundColor" => StyleKey::BackgroundColor,
            "color" => StyleKey::Color,
            "fontSize" => StyleKey::FontSize,
            "fontFamily" => StyleKey::FontFamily,
            "fontWeight" => StyleKey::FontWeight,
            "textAlign" => StyleKey::TextAlign,
            "borderRadius" => StyleKey::BorderRadius,
            "opacity" => StyleKey::Opacity,
            "border" => StyleKey::Border,
            "boxShadow" => StyleKey::BoxShadow,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            StyleKey::BackgroundColor => "backgroundColor",
            StyleKey::Color => "color",
            StyleKey::FontSize => "fontSize",
            StyleKey::FontFamily => "fontFamily",
            StyleKey::FontWeight => "fontWeight",
            StyleKey::TextAlign => "textAlign",
            StyleKey::BorderRadius => "borderRadius",
            StyleKey::Opacity => "opacity",
            StyleKey::Border => "border",
            StyleKey::BoxShadow => "boxShadow",
        }
    }
}

impl GeometryKey {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "x" => GeometryKey::X,
            "y" => GeometryKey::Y,
            "width" => GeometryKey::Width,
            "height" => GeometryKey::Height,
            "rotation" => GeometryKey::Rotation,
            "content" => GeometryKey::Content,
            _ => return None,
        })
    }
}

/// Route a flat key to its domain. Style allow-list wins.
pub fn route_key(name: &str) -> Option<PatchKey> {
    if STYLE_KEYS.contains(&name) {
        StyleKey::from_name(name).map(PatchKey::Style)
    } else if GEOMETRY_KEYS.contains(&name) {
        GeometryKey::from_name(name).map(PatchKey::Geometry)
    } else {
        None
    }
}

/// A flat patch split into its two domains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutedPatch {
    pub geometry: Vec<(GeometryKey, Value)>,
    pub style: Vec<(StyleKey, Value)>,
    pub unknown: Vec<String>,
}

impl RoutedPatch {
    pub fn route(patch: &Map<String, Value>) -> Self {
        let mut routed = RoutedPatch::default();
        for (key, value) in patch {
            match route_key(key) {
                Some(PatchKey::Geometry(k)) => routed.geometry.push((k, value.clone())),
                Some(PatchKey::Style(k)) => routed.style.push((k, value.clone())),
                None => routed.unknown.push(key.clone()),
            }
        }
        routed
    }

    /// Apply to an element. Returns `true` if any field changed.
    pub fn apply(&self, el: &mut Element) -> bool {
        for key in &self.unknown {
            log::warn!("patch: unknown key '{key}' ignored");
        }
        let before = el.clone();
        for (key, value) in &self.geometry {
            apply_geometry(el, *key, value);
        }
        for (key, value) in &self.style {
            if !apply_style(el, *key, value) {
                log::debug!(
                    "patch: '{}' does not apply to {} element {}",
                    key.name(),
                    el.kind().as_str(),
                    el.id
                );
            }
        }
        *el != before
    }
}

/// Numeric coercion for form input: anything unparsable becomes `0`.
pub fn number_or_zero(value: &Value) -> f32 {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(|v| v as f32)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f32>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn string_or_none(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_color(value: &Value) -> Option<Color> {
    let parsed = value.as_str().and_then(Color::from_hex);
    if parsed.is_none() {
        log::warn!("patch: invalid color {value}");
    }
    parsed
}

fn apply_geometry(el: &mut Element, key: GeometryKey, value: &Value) {
    match key {
        GeometryKey::X => el.x = number_or_zero(value),
        GeometryKey::Y => el.y = number_or_zero(value),
        GeometryKey::Width => el.width = number_or_zero(value),
        GeometryKey::Height => el.height = number_or_zero(value),
        GeometryKey::Rotation => el.rotation = number_or_zero(value),
        GeometryKey::Content => el.content = string_or_none(value),
    }
}

/// Returns `false` when the element's kind has no such style field.
fn apply_style(el: &mut Element, key: StyleKey, value: &Value) -> bool {
    match key {
        StyleKey::Opacity => {
            el.common.opacity = number_or_zero(value).clamp(0.0, 1.0);
            return true;
        }
        StyleKey::Border => {
            el.common.border = string_or_none(value).filter(|s| !s.is_empty());
            return true;
        }
        StyleKey::BoxShadow => {
            el.common.shadow = string_or_none(value).filter(|s| !s.is_empty());
            return true;
        }
        _ => {}
    }

    match (&mut el.style, key) {
        (ElementStyle::Text(s), StyleKey::BackgroundColor) => {
            if value.is_null() {
                s.background_color = None;
            } else if let Some(c) = parse_color(value) {
                s.background_color = Some(c);
            }
        }
        (ElementStyle::Shape(s), StyleKey::BackgroundColor) => {
            if value.is_null() {
                s.background_color = Color::TRANSPARENT;
            } else if let Some(c) = parse_color(value) {
                s.background_color = c;
            }
        }
        (ElementStyle::Text(s), StyleKey::Color) => {
            if let Some(c) = parse_color(value) {
                s.color = c;
            }
        }
        (ElementStyle::Text(s), StyleKey::FontSize) => s.font_size = number_or_zero(value),
        (ElementStyle::Text(s), StyleKey::FontFamily) => {
            if let Some(family) = value.as_str() {
                s.font_family = family.to_string();
            }
        }
        (ElementStyle::Text(s), StyleKey::FontWeight) => {
            s.font_weight = match value.as_str().map(str::trim) {
                Some("normal") => 400,
                Some("bold") => 700,
                _ => number_or_zero(value).clamp(0.0, 1000.0) as u16,
            };
        }
        (ElementStyle::Text(s), StyleKey::TextAlign) => {
            if let Some(align) = value.as_str().and_then(|v| v.parse::<TextAlign>().ok()) {
                s.text_align = align;
            }
        }
        (ElementStyle::Shape(s), StyleKey::BorderRadius) => s.border_radius = number_or_zero(value),
        (ElementStyle::Image(s), StyleKey::BorderRadius) => s.border_radius = number_or_zero(value),
        _ => return false,
    }
    true
}

/// Read a style field as a JSON value, if the element's kind has it.
pub fn read_style(el: &Element, key: StyleKey) -> Option<Value> {
    match key {
        StyleKey::Opacity => return Some(Value::from(el.common.opacity)),
        StyleKey::Border => return el.common.border.clone().map(Value::String),
        StyleKey::BoxShadow => return el.common.shadow.clone().map(Value::String),
        _ => {}
    }
    match (&el.style, key) {
        (ElementStyle::Text(s), StyleKey::BackgroundColor) => {
            s.background_color.map(|c| Value::String(c.to_hex()))
        }
        (ElementStyle::Shape(s), StyleKey::BackgroundColor) => {
            Some(Value::String(s.background_color.to_hex()))
        }
        (ElementStyle::Text(s), StyleKey::Color) => Some(Value::String(s.color.to_hex())),
        (ElementStyle::Text(s), StyleKey::FontSize) => Some(Value::from(s.font_size)),
        (ElementStyle::Text(s), StyleKey::FontFamily) => Some(Value::String(s.font_family.clone())),
        (ElementStyle::Text(s), StyleKey::FontWeight) => Some(Value::from(s.font_weight)),
        (ElementStyle::Text(s), StyleKey::TextAlign) => {
            Some(Value::String(s.text_align.as_str().to_string()))
        }
        (ElementStyle::Shape(s), StyleKey::BorderRadius) => Some(Value::from(s.border_radius)),
        (ElementStyle::Image(s), StyleKey::BorderRadius) => Some(Value::from(s.border_radius)),
        _ => None,
    }
}
