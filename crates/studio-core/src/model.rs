//! Document model for Design Studio.
//!
//! A `Document` is an ordered list of pages sharing one artboard size. Each
//! `Page` owns an ordered list of elements; position in that list is the
//! paint order (later = on top). Elements are a fixed tagged variant
//! (text, image, shape) whose style carries only the fields meaningful to
//! that variant, plus a `CommonStyle` subset every element has.

use crate::id::{ElementId, PageId};
use crate::tone::Tone;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::{SmallVec, smallvec};
use std::fmt;
use std::str::FromStr;

/// Default artboard size (a 5×7 card at 100 px per inch).
pub const DEFAULT_WIDTH: f32 = 500.0;
pub const DEFAULT_HEIGHT: f32 = 700.0;

/// Label of the page every fresh document starts with.
pub const FIRST_PAGE_LABEL: &str = "Front";

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0], serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels. Survives a hex round trip exactly.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` or `transparent`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        if hex.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| {
            let hi = hex_val(bytes[i])?;
            let lo = hex_val(bytes[i + 1])?;
            Some((hi << 4 | lo) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        );
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: {s}")))
    }
}

// ─── Element kinds & styles ──────────────────────────────────────────────

/// The fixed set of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Shape,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Shape => "shape",
        }
    }

    /// Box size given to a freshly added element of this kind.
    pub fn default_size(&self) -> (f32, f32) {
        match self {
            ElementKind::Text => (200.0, 50.0),
            ElementKind::Image | ElementKind::Shape => (100.0, 100.0),
        }
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ElementKind::Text),
            "image" => Ok(ElementKind::Image),
            "shape" => Ok(ElementKind::Shape),
            other => Err(format!("unknown element type: {other}")),
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

impl FromStr for TextAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Ok(TextAlign::Left),
            "center" | "middle" => Ok(TextAlign::Center),
            "right" | "end" => Ok(TextAlign::Right),
            other => Err(format!("unknown text alignment: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    pub color: Color,
    pub font_size: f32,
    pub font_family: String,
    pub font_weight: u16, // 100..900
    pub text_align: TextAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb8(0x1F, 0x29, 0x37),
            font_size: 24.0,
            font_family: "font-serif".into(),
            font_weight: 400,
            text_align: TextAlign::Center,
            background_color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeStyle {
    pub background_color: Color,
    pub border_radius: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb8(0xE5, 0xE7, 0xEB),
            border_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageStyle {
    pub border_radius: f32,
}

/// Per-kind style. The variant is the element's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementStyle {
    Text(TextStyle),
    Image(ImageStyle),
    Shape(ShapeStyle),
}

impl ElementStyle {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementStyle::Text(_) => ElementKind::Text,
            ElementStyle::Image(_) => ElementKind::Image,
            ElementStyle::Shape(_) => ElementKind::Shape,
        }
    }

    /// Default style for a kind, before document defaults are applied.
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => ElementStyle::Text(TextStyle::default()),
            ElementKind::Image => ElementStyle::Image(ImageStyle::default()),
            ElementKind::Shape => ElementStyle::Shape(ShapeStyle::default()),
        }
    }
}

/// Visual attributes every element kind accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonStyle {
    pub opacity: f32, // 0.0 .. 1.0
    /// CSS border shorthand, e.g. `2px solid #C9A227`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    /// CSS box-shadow value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
}

impl Default for CommonStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            border: None,
            shadow: None,
        }
    }
}

// ─── Elements & pages ────────────────────────────────────────────────────

/// One placed object on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub rotation: f32, // degrees
    /// Literal text for text elements, URL for images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub style: ElementStyle,
    #[serde(default)]
    pub common: CommonStyle,
}

impl Element {
    /// A new element of `style`'s kind at the origin with the kind's default size.
    pub fn new(id: ElementId, style: ElementStyle) -> Self {
        let (width, height) = style.kind().default_size();
        Self {
            id,
            x: 0.0,
            y: 0.0,
            width,
            height,
            rotation: 0.0,
            content: None,
            style,
            common: CommonStyle::default(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.style.kind()
    }

    /// Centre point of the element box.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// One artboard face of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub label: String,
    pub background_color: Color,
    /// Paint order: later elements are drawn on top.
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(id: PageId, label: impl Into<String>, background_color: Color) -> Self {
        Self {
            id,
            label: label.into(),
            background_color,
            elements: Vec::new(),
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Position of an element in the paint order.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Element ids in paint order.
    pub fn element_ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id).collect()
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// The complete in-memory design being edited.
///
/// Structural invariants (non-empty pages, valid current page, selection on
/// the current page) are maintained by the editor store, which is the only
/// writer; deserialized documents are normalized through it as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub width: f32,
    pub height: f32,
    /// Zoom factor. Rendering only; geometry is stored unscaled.
    pub scale: f32,
    pub pages: SmallVec<[Page; 2]>,
    pub current_page: PageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<ElementId>,
    pub tone: Tone,
    /// Default color for new text elements.
    pub text_color: Color,
    /// Default font family for new text elements.
    pub font_family: String,
    /// Name of the design category the document was started from.
    #[serde(default)]
    pub category: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A fresh single-page document in the default tone.
    pub fn new() -> Self {
        let tone = Tone::default();
        let preset = tone.preset();
        let front = Page::new(PageId::intern("front"), FIRST_PAGE_LABEL, preset.background_color);
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: 1.0,
            current_page: front.id,
            pages: smallvec![front],
            selected: None,
            tone,
            text_color: preset.text_color,
            font_family: preset.font_family.to_string(),
            category: String::new(),
        }
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    pub fn page_index(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    /// The page being edited. Falls back to the first page if the current
    /// id is stale.
    pub fn current_page(&self) -> &Page {
        self.page(self.current_page).unwrap_or(&self.pages[0])
    }

    pub fn current_page_mut(&mut self) -> &mut Page {
        let idx = self.page_index(self.current_page).unwrap_or(0);
        &mut self.pages[idx]
    }

    /// The selected element, resolved against the current page.
    /// A selection that does not resolve reads as nothing selected.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.current_page().element(id))
    }

    pub fn page_ids(&self) -> Vec<PageId> {
        self.pages.iter().map(|p| p.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#1D2939").unwrap();
        assert_eq!(c.to_hex(), "#1D2939");
        let c = Color::from_hex("fff").unwrap();
        assert_eq!(c.to_hex(), "#FFFFFF");
        let c = Color::from_hex("#00000080").unwrap();
        assert_eq!(c.to_hex(), "#00000080");
    }

    #[test]
    fn color_rejects_garbage() {
        assert!(Color::from_hex("#12").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
        assert!(Color::from_hex("").is_none());
    }

    #[test]
    fn color_transparent_keyword() {
        assert_eq!(Color::from_hex("transparent"), Some(Color::TRANSPARENT));
    }

    #[test]
    fn element_kind_default_sizes() {
        assert_eq!(ElementKind::Text.default_size(), (200.0, 50.0));
        assert_eq!(ElementKind::Shape.default_size(), (100.0, 100.0));
        assert_eq!(ElementKind::Image.default_size(), (100.0, 100.0));
    }

    #[test]
    fn fresh_document_has_front_page() {
        let doc = Document::new();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.current_page().label, "Front");
        assert!(doc.current_page().elements.is_empty());
        assert!(doc.selected_element().is_none());
    }

    #[test]
    fn element_json_shape() {
        let el = Element::new(
            ElementId::intern("title"),
            ElementStyle::default_for(ElementKind::Text),
        );
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["style"]["type"], "text");
        assert_eq!(json["style"]["textAlign"], "center");
        assert_eq!(json["common"]["opacity"], 1.0);
    }

    #[test]
    fn element_style_defaults_fill_missing_fields() {
        let json = r##"{
            "id": "dot", "x": 1, "y": 2, "width": 10, "height": 10,
            "style": { "type": "shape", "backgroundColor": "#C9A227" }
        }"##;
        let el: Element = serde_json::from_str(json).unwrap();
        assert_eq!(el.kind(), ElementKind::Shape);
        assert_eq!(el.rotation, 0.0);
        assert_eq!(el.common.opacity, 1.0);
        match el.style {
            ElementStyle::Shape(s) => {
                assert_eq!(s.background_color.to_hex(), "#C9A227");
                assert_eq!(s.border_radius, 0.0);
            }
            _ => panic!("expected shape"),
        }
    }
}
