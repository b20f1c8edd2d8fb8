//! Property panel binding.
//!
//! A stateless projection of the store: with an element selected the panel
//! shows and edits that element (writes go through
//! [`CanvasStore::update_element`]); with nothing selected it shows the
//! artboard size and the current page background. The selected element is
//! looked up again on every read and write.

use crate::patch::{StyleKey, number_or_zero, read_style};
use crate::store::CanvasStore;
use serde::Serialize;
use serde_json::{Map, Value};
use studio_core::{Color, ElementKind};

/// An editable field of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelField {
    X,
    Y,
    Width,
    Height,
    Rotation,
    Content,
    Style(StyleKey),
    DocumentWidth,
    DocumentHeight,
    PageBackground,
}

impl PanelField {
    /// Field for a form key: patch keys for element fields, plus
    /// `documentWidth`, `documentHeight`, `pageBackground`.
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "x" => PanelField::X,
            "y" => PanelField::Y,
            "width" => PanelField::Width,
            "height" => PanelField::Height,
            "rotation" => PanelField::Rotation,
            "content" => PanelField::Content,
            "documentWidth" => PanelField::DocumentWidth,
            "documentHeight" => PanelField::DocumentHeight,
            "pageBackground" => PanelField::PageBackground,
            other => PanelField::Style(StyleKey::from_name(other)?),
        })
    }

    pub fn key(&self) -> &'static str {
        match self {
            PanelField::X => "x",
            PanelField::Y => "y",
            PanelField::Width => "width",
            PanelField::Height => "height",
            PanelField::Rotation => "rotation",
            PanelField::Content => "content",
            PanelField::Style(k) => k.name(),
            PanelField::DocumentWidth => "documentWidth",
            PanelField::DocumentHeight => "documentHeight",
            PanelField::PageBackground => "pageBackground",
        }
    }

    pub fn is_document_field(&self) -> bool {
        matches!(
            self,
            PanelField::DocumentWidth | PanelField::DocumentHeight | PanelField::PageBackground
        )
    }

    fn is_numeric(&self) -> bool {
        matches!(
            self,
            PanelField::X
                | PanelField::Y
                | PanelField::Width
                | PanelField::Height
                | PanelField::Rotation
                | PanelField::DocumentWidth
                | PanelField::DocumentHeight
                | PanelField::Style(
                    StyleKey::FontSize | StyleKey::Opacity | StyleKey::BorderRadius
                )
        )
    }
}

/// What the panel currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "target", rename_all = "camelCase")]
pub enum PanelView {
    #[serde(rename_all = "camelCase")]
    Element {
        id: String,
        kind: ElementKind,
        fields: Map<String, Value>,
    },
    #[serde(rename_all = "camelCase")]
    Document {
        width: f32,
        height: f32,
        page_label: String,
        page_background: String,
    },
}

pub struct PropertyPanel;

impl PropertyPanel {
    pub fn read(store: &CanvasStore) -> PanelView {
        match store.selected_element() {
            Some(el) => {
                let mut fields = Map::new();
                fields.insert("x".into(), Value::from(el.x));
                fields.insert("y".into(), Value::from(el.y));
                fields.insert("width".into(), Value::from(el.width));
                fields.insert("height".into(), Value::from(el.height));
                fields.insert("rotation".into(), Value::from(el.rotation));
                if let Some(content) = &el.content {
                    fields.insert("content".into(), Value::String(content.clone()));
                }
                for name in crate::patch::STYLE_KEYS {
                    if let Some(key) = StyleKey::from_name(name)
                        && let Some(value) = read_style(el, key)
                    {
                        fields.insert((*name).into(), value);
                    }
                }
                PanelView::Element {
                    id: el.id.to_string(),
                    kind: el.kind(),
                    fields,
                }
            }
            None => {
                let doc = store.document();
                let page = store.current_page();
                PanelView::Document {
                    width: doc.width,
                    height: doc.height,
                    page_label: page.label.clone(),
                    page_background: page.background_color.to_hex(),
                }
            }
        }
    }

    /// Current value of one field, or `None` when the field is not bound
    /// (element field without a selection, style field the kind lacks).
    pub fn read_field(store: &CanvasStore, field: PanelField) -> Option<Value> {
        if field.is_document_field() {
            let doc = store.document();
            return Some(match field {
                PanelField::DocumentWidth => Value::from(doc.width),
                PanelField::DocumentHeight => Value::from(doc.height),
                _ => Value::String(store.current_page().background_color.to_hex()),
            });
        }
        let el = store.selected_element()?;
        match field {
            PanelField::X => Some(Value::from(el.x)),
            PanelField::Y => Some(Value::from(el.y)),
            PanelField::Width => Some(Value::from(el.width)),
            PanelField::Height => Some(Value::from(el.height)),
            PanelField::Rotation => Some(Value::from(el.rotation)),
            PanelField::Content => el.content.clone().map(Value::String),
            PanelField::Style(key) => read_style(el, key),
            _ => None,
        }
    }

    /// Write raw form input into a field. Numeric input that does not
    /// parse is written as `0`; color input that does not parse is
    /// rejected. Returns `true` if the document changed.
    pub fn write(store: &mut CanvasStore, field: PanelField, raw: &str) -> bool {
        match field {
            PanelField::DocumentWidth => {
                let height = store.document().height;
                store.set_document_size(parse_number(raw), height)
            }
            PanelField::DocumentHeight => {
                let width = store.document().width;
                store.set_document_size(width, parse_number(raw))
            }
            PanelField::PageBackground => match Color::from_hex(raw) {
                Some(color) => {
                    let page = store.current_page_id();
                    store.set_page_background(page, color)
                }
                None => {
                    log::warn!("panel: invalid page background '{raw}'");
                    false
                }
            },
            element_field => {
                let value = if element_field.is_numeric() {
                    Value::from(parse_number(raw))
                } else {
                    Value::String(raw.to_string())
                };
                let mut patch = Map::new();
                patch.insert(element_field.key().to_string(), value);
                store.update_element(&patch)
            }
        }
    }

    /// [`PropertyPanel::write`] by form key. Unknown keys are ignored.
    pub fn write_key(store: &mut CanvasStore, key: &str, raw: &str) -> bool {
        match PanelField::from_key(key) {
            Some(field) => Self::write(store, field, raw),
            None => {
                log::warn!("panel: unknown field '{key}'");
                false
            }
        }
    }
}

fn parse_number(raw: &str) -> f32 {
    number_or_zero(&Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_view_without_selection() {
        let store = CanvasStore::new();
        match PropertyPanel::read(&store) {
            PanelView::Document {
                width,
                height,
                page_label,
                ..
            } => {
                assert_eq!((width, height), (500.0, 700.0));
                assert_eq!(page_label, "Front");
            }
            other => panic!("expected document view, got {other:?}"),
        }
    }

    #[test]
    fn element_view_tracks_store() {
        let mut store = CanvasStore::new();
        store.add_element(ElementKind::Text, Some("Hi".into()), None);
        let PanelView::Element { fields, kind, .. } = PropertyPanel::read(&store) else {
            panic!("expected element view");
        };
        assert_eq!(kind, ElementKind::Text);
        assert_eq!(fields["x"], json!(150.0));
        assert_eq!(fields["content"], json!("Hi"));
        assert!(fields.contains_key("fontSize"));
        assert!(!fields.contains_key("borderRadius"));

        store.delete_selected();
        assert!(matches!(PropertyPanel::read(&store), PanelView::Document { .. }));
    }

    #[test]
    fn numeric_write_routes_through_update() {
        let mut store = CanvasStore::new();
        store.add_element(ElementKind::Shape, None, None);
        assert!(PropertyPanel::write(&mut store, PanelField::Rotation, "45"));
        assert!(PropertyPanel::write_key(&mut store, "borderRadius", "8"));
        assert_eq!(
            PropertyPanel::read_field(&store, PanelField::Rotation),
            Some(json!(45.0))
        );
        assert_eq!(
            PropertyPanel::read_field(&store, PanelField::Style(StyleKey::BorderRadius)),
            Some(json!(8.0))
        );
    }

    #[test]
    fn empty_width_becomes_zero() {
        let mut store = CanvasStore::new();
        store.add_element(ElementKind::Shape, None, None);
        assert!(PropertyPanel::write(&mut store, PanelField::Width, ""));
        assert_eq!(store.selected_element().unwrap().width, 0.0);
    }

    #[test]
    fn element_write_without_selection_is_noop() {
        let mut store = CanvasStore::new();
        let before = store.document().clone();
        assert!(!PropertyPanel::write(&mut store, PanelField::X, "10"));
        assert_eq!(store.document(), &before);
        assert_eq!(PropertyPanel::read_field(&store, PanelField::X), None);
    }

    #[test]
    fn document_fields() {
        let mut store = CanvasStore::new();
        assert!(PropertyPanel::write(&mut store, PanelField::DocumentWidth, "640"));
        assert!(PropertyPanel::write(&mut store, PanelField::DocumentHeight, "oops"));
        assert_eq!(store.document().width, 640.0);
        assert_eq!(store.document().height, 0.0);

        assert!(PropertyPanel::write(&mut store, PanelField::PageBackground, "#123456"));
        assert!(!PropertyPanel::write(&mut store, PanelField::PageBackground, "blue-ish"));
        assert_eq!(
            PropertyPanel::read_field(&store, PanelField::PageBackground),
            Some(json!("#123456"))
        );
    }

    #[test]
    fn text_style_fields() {
        let mut store = CanvasStore::new();
        store.add_element(ElementKind::Text, None, None);
        assert!(PropertyPanel::write_key(&mut store, "color", "#FF00AA"));
        assert!(PropertyPanel::write_key(&mut store, "fontFamily", "font-mono"));
        assert!(PropertyPanel::write_key(&mut store, "textAlign", "left"));
        assert!(PropertyPanel::write_key(&mut store, "fontSize", "36"));
        assert!(!PropertyPanel::write_key(&mut store, "color", "nope"));
        let el = store.selected_element().unwrap();
        assert_eq!(read_style(el, StyleKey::Color), Some(json!("#FF00AA")));
        assert_eq!(read_style(el, StyleKey::FontFamily), Some(json!("font-mono")));
        assert_eq!(read_style(el, StyleKey::TextAlign), Some(json!("left")));
        assert_eq!(read_style(el, StyleKey::FontSize), Some(json!(36.0)));
    }

    #[test]
    fn field_keys_roundtrip() {
        for key in ["x", "content", "documentWidth", "pageBackground", "fontSize"] {
            assert_eq!(PanelField::from_key(key).unwrap().key(), key);
        }
        assert_eq!(PanelField::from_key("zIndex"), None);
    }
}
