//! Element manipulation on the current page: create, patch, move, reorder,
//! duplicate, delete.
//!
//! Z-order is the position in the page's element list; the reordering
//! operations move entries within that list and never touch geometry.

use crate::patch::RoutedPatch;
use crate::store::CanvasStore;
use serde_json::{Map, Value};
use studio_core::{Element, ElementId, ElementKind, ElementStyle, TextStyle};

/// Offset applied to duplicates so they don't hide the original.
pub const DUPLICATE_OFFSET: f32 = 20.0;

/// Content given to a text element added without any.
pub const DEFAULT_TEXT: &str = "New Text";

impl CanvasStore {
    /// Style for a new element of `kind`, using the document's text defaults.
    pub fn default_style(&self, kind: ElementKind) -> ElementStyle {
        match kind {
            ElementKind::Text => ElementStyle::Text(TextStyle {
                color: self.doc.text_color,
                font_family: self.doc.font_family.clone(),
                ..TextStyle::default()
            }),
            other => ElementStyle::default_for(other),
        }
    }

    /// Add an element centered on the artboard, on top of the current page,
    /// and select it. A `style` of a different kind than `kind` is replaced
    /// by the kind's default style.
    pub fn add_element(
        &mut self,
        kind: ElementKind,
        content: Option<String>,
        style: Option<ElementStyle>,
    ) -> ElementId {
        let style = match style {
            Some(s) if s.kind() == kind => s,
            Some(s) => {
                log::warn!(
                    "add_element: {} style given for {} element, using defaults",
                    s.kind().as_str(),
                    kind.as_str()
                );
                self.default_style(kind)
            }
            None => self.default_style(kind),
        };

        let page = self.doc.current_page();
        let id = ElementId::fresh(kind.as_str(), |id| page.contains(id));

        let mut el = Element::new(id, style);
        el.x = self.doc.width / 2.0 - el.width / 2.0;
        el.y = self.doc.height / 2.0 - el.height / 2.0;
        el.content = match (kind, content) {
            (ElementKind::Text, None) => Some(DEFAULT_TEXT.to_string()),
            (_, content) => content,
        };

        log::debug!("add {} element {id} at ({}, {})", kind.as_str(), el.x, el.y);
        self.doc.current_page_mut().elements.push(el);
        self.doc.selected = Some(id);
        id
    }

    /// Apply a flat patch to the selected element. No-op without a selection.
    pub fn update_element(&mut self, patch: &Map<String, Value>) -> bool {
        let Some(id) = self.selected_id() else {
            log::debug!("update_element: nothing selected");
            return false;
        };
        let routed = RoutedPatch::route(patch);
        match self.doc.current_page_mut().element_mut(id) {
            Some(el) => routed.apply(el),
            None => false,
        }
    }

    /// Place an element at absolute artboard coordinates (no clamping).
    pub fn move_element_to(&mut self, id: ElementId, x: f32, y: f32) -> bool {
        let Some(el) = self.doc.current_page_mut().element_mut(id) else {
            return false;
        };
        if el.x == x && el.y == y {
            return false;
        }
        log::trace!("move {id} to ({x}, {y})");
        el.x = x;
        el.y = y;
        true
    }

    /// Offset an element by a delta in artboard units.
    pub fn move_element_by(&mut self, id: ElementId, dx: f32, dy: f32) -> bool {
        let Some((x, y)) = self.current_page().element(id).map(|e| (e.x, e.y)) else {
            return false;
        };
        self.move_element_to(id, x + dx, y + dy)
    }

    /// Move an element to the end of the paint order (topmost).
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        let elements = &mut self.doc.current_page_mut().elements;
        let Some(idx) = elements.iter().position(|e| e.id == id) else {
            return false;
        };
        if idx + 1 == elements.len() {
            return false;
        }
        let el = elements.remove(idx);
        elements.push(el);
        true
    }

    /// Move an element to the start of the paint order (bottommost).
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        let elements = &mut self.doc.current_page_mut().elements;
        let Some(idx) = elements.iter().position(|e| e.id == id) else {
            return false;
        };
        if idx == 0 {
            return false;
        }
        let el = elements.remove(idx);
        elements.insert(0, el);
        true
    }

    /// Swap an element with the one above it.
    pub fn bring_forward(&mut self, id: ElementId) -> bool {
        let elements = &mut self.doc.current_page_mut().elements;
        match elements.iter().position(|e| e.id == id) {
            Some(idx) if idx + 1 < elements.len() => {
                elements.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap an element with the one below it.
    pub fn send_backward(&mut self, id: ElementId) -> bool {
        let elements = &mut self.doc.current_page_mut().elements;
        match elements.iter().position(|e| e.id == id) {
            Some(idx) if idx > 0 => {
                elements.swap(idx, idx - 1);
                true
            }
            _ => false,
        }
    }

    /// Remove an element from the current page, clearing the selection if
    /// it pointed at it.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        let page = self.doc.current_page_mut();
        let Some(idx) = page.index_of(id) else {
            return false;
        };
        page.elements.remove(idx);
        if self.doc.selected == Some(id) {
            self.doc.selected = None;
        }
        log::debug!("deleted element {id}");
        true
    }

    /// Delete whatever is selected.
    pub fn delete_selected(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.delete_element(id),
            None => false,
        }
    }

    /// Copy an element under a fresh id, offset down-right, on top, and
    /// select the copy.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let page = self.doc.current_page();
        let original = page.element(id)?;
        let new_id = ElementId::fresh(original.kind().as_str(), |candidate| {
            page.contains(candidate)
        });
        let mut copy = original.clone();
        copy.id = new_id;
        copy.x += DUPLICATE_OFFSET;
        copy.y += DUPLICATE_OFFSET;

        self.doc.current_page_mut().elements.push(copy);
        self.doc.selected = Some(new_id);
        log::debug!("duplicated {id} as {new_id}");
        Some(new_id)
    }
}
