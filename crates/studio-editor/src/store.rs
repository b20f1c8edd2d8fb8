//! Canvas state store: the single source of truth for the open design.
//!
//! Every mutation goes through `CanvasStore`, either as a direct method call
//! or as a `CanvasMutation` value passed to [`CanvasStore::apply_mutation`]
//! (the form produced by the drag controller and keyboard shortcuts).
//!
//! The store keeps three invariants at all times:
//!
//! - the document has at least one page,
//! - `current_page` names one of those pages,
//! - `selected`, when set, names an element on the current page.
//!
//! Operations never fail. Invalid input is normalized (unknown page ids fall
//! back to the first page, dangling selections are cleared) and each
//! operation reports whether the document changed.

use crate::notify::{Notification, Outbox};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use studio_core::{
    Color, Document, ElementId, ElementKind, ElementStyle, FIRST_PAGE_LABEL, Page, PageId,
};

pub const MIN_ZOOM: f32 = 0.2;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.1;

/// A canvas mutation request.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasMutation {
    SetDocumentSize {
        width: f32,
        height: f32,
    },
    SetZoom {
        scale: f32,
    },
    Select {
        id: Option<ElementId>,
    },
    AddElement {
        kind: ElementKind,
        content: Option<String>,
        style: Option<ElementStyle>,
    },
    /// Flat property patch for the selected element.
    UpdateSelected {
        patch: Map<String, Value>,
    },
    MoveElementTo {
        id: ElementId,
        x: f32,
        y: f32,
    },
    MoveElementBy {
        id: ElementId,
        dx: f32,
        dy: f32,
    },
    BringToFront {
        id: ElementId,
    },
    SendToBack {
        id: ElementId,
    },
    BringForward {
        id: ElementId,
    },
    SendBackward {
        id: ElementId,
    },
    DeleteElement {
        id: ElementId,
    },
    DuplicateElement {
        id: ElementId,
    },
    AddPage,
    RemovePage {
        id: PageId,
    },
    RenamePage {
        id: PageId,
        label: String,
    },
    SwitchPage {
        id: PageId,
    },
    SetPageBackground {
        id: PageId,
        color: Color,
    },
}

/// Owns the open document and the notification outbox.
#[derive(Debug)]
pub struct CanvasStore {
    pub(crate) doc: Document,
    outbox: Outbox,
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasStore {
    /// A store holding a fresh single-page document.
    pub fn new() -> Self {
        Self::from_document(Document::new())
    }

    /// Take ownership of an existing document, repairing any broken
    /// invariants (empty page list, stale current page, dangling selection).
    pub fn from_document(doc: Document) -> Self {
        let mut store = Self {
            doc,
            outbox: Outbox::default(),
        };
        store.normalize();
        store
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn current_page(&self) -> &Page {
        self.doc.current_page()
    }

    pub fn current_page_id(&self) -> PageId {
        self.doc.current_page
    }

    /// The selected element, re-resolved on every call.
    pub fn selected_element(&self) -> Option<&studio_core::Element> {
        self.doc.selected_element()
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected_element().map(|e| e.id)
    }

    pub fn scale(&self) -> f32 {
        self.doc.scale
    }

    // ─── Notifications ───────────────────────────────────────────────────

    pub fn notify(&mut self, notification: Notification) {
        self.outbox.push(notification);
    }

    pub fn notifications(&self) -> &[Notification] {
        self.outbox.peek()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.outbox.drain()
    }

    // ─── Document-level operations ───────────────────────────────────────

    /// Replace the artboard size shared by every page.
    pub fn set_document_size(&mut self, width: f32, height: f32) -> bool {
        if self.doc.width == width && self.doc.height == height {
            return false;
        }
        log::debug!("document size {width}x{height}");
        self.doc.width = width;
        self.doc.height = height;
        true
    }

    /// Set the zoom factor, clamped to [`MIN_ZOOM`, `MAX_ZOOM`].
    /// Non-finite factors are ignored.
    pub fn set_zoom(&mut self, factor: f32) -> bool {
        if !factor.is_finite() {
            log::warn!("ignoring non-finite zoom factor {factor}");
            return false;
        }
        let scale = factor.clamp(MIN_ZOOM, MAX_ZOOM);
        if scale == self.doc.scale {
            return false;
        }
        self.doc.scale = scale;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(round_zoom(self.doc.scale + ZOOM_STEP))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(round_zoom(self.doc.scale - ZOOM_STEP))
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.set_zoom(1.0)
    }

    /// Select an element on the current page, or clear the selection with
    /// `None`. An id that is not on the current page clears the selection.
    pub fn select_element(&mut self, id: Option<ElementId>) -> bool {
        let next = match id {
            Some(id) if self.doc.current_page().contains(id) => Some(id),
            Some(id) => {
                log::warn!("select: {id} is not on page {}", self.doc.current_page);
                None
            }
            None => None,
        };
        let changed = self.doc.selected != next;
        self.doc.selected = next;
        changed
    }

    pub fn deselect(&mut self) -> bool {
        self.select_element(None)
    }

    /// Atomically swap the page list. Clears the selection. An unknown
    /// `current` falls back to the first page; an empty page list is
    /// replaced by a single blank page.
    pub fn replace_document(&mut self, pages: impl IntoIterator<Item = Page>, current: PageId) {
        let mut pages: SmallVec<[Page; 2]> = pages.into_iter().collect();
        if pages.is_empty() {
            let background = self.doc.pages[0].background_color;
            pages.push(Page::new(PageId::intern("front"), FIRST_PAGE_LABEL, background));
        }
        self.doc.current_page = if pages.iter().any(|p| p.id == current) {
            current
        } else {
            log::warn!("replace_document: unknown page {current}, using first page");
            pages[0].id
        };
        self.doc.pages = pages;
        self.doc.selected = None;
        log::debug!(
            "document replaced: {} page(s), current {}",
            self.doc.pages.len(),
            self.doc.current_page
        );
    }

    // ─── Mutation dispatch ───────────────────────────────────────────────

    /// Apply a mutation. Returns `true` if the document changed.
    pub fn apply_mutation(&mut self, mutation: CanvasMutation) -> bool {
        match mutation {
            CanvasMutation::SetDocumentSize { width, height } => {
                self.set_document_size(width, height)
            }
            CanvasMutation::SetZoom { scale } => self.set_zoom(scale),
            CanvasMutation::Select { id } => self.select_element(id),
            CanvasMutation::AddElement {
                kind,
                content,
                style,
            } => {
                self.add_element(kind, content, style);
                true
            }
            CanvasMutation::UpdateSelected { patch } => self.update_element(&patch),
            CanvasMutation::MoveElementTo { id, x, y } => self.move_element_to(id, x, y),
            CanvasMutation::MoveElementBy { id, dx, dy } => self.move_element_by(id, dx, dy),
            CanvasMutation::BringToFront { id } => self.bring_to_front(id),
            CanvasMutation::SendToBack { id } => self.send_to_back(id),
            CanvasMutation::BringForward { id } => self.bring_forward(id),
            CanvasMutation::SendBackward { id } => self.send_backward(id),
            CanvasMutation::DeleteElement { id } => self.delete_element(id),
            CanvasMutation::DuplicateElement { id } => self.duplicate_element(id).is_some(),
            CanvasMutation::AddPage => {
                self.add_page();
                true
            }
            CanvasMutation::RemovePage { id } => self.remove_page(id),
            CanvasMutation::RenamePage { id, label } => self.rename_page(id, &label),
            CanvasMutation::SwitchPage { id } => self.switch_page(id),
            CanvasMutation::SetPageBackground { id, color } => self.set_page_background(id, color),
        }
    }

    /// Apply a batch in order. Returns `true` if any mutation changed state.
    pub fn apply_all(&mut self, mutations: impl IntoIterator<Item = CanvasMutation>) -> bool {
        mutations
            .into_iter()
            .fold(false, |changed, m| self.apply_mutation(m) || changed)
    }

    // ─── Invariants ──────────────────────────────────────────────────────

    fn normalize(&mut self) {
        if self.doc.pages.is_empty() {
            let background = self.doc.tone.preset().background_color;
            self.doc
                .pages
                .push(Page::new(PageId::intern("front"), FIRST_PAGE_LABEL, background));
        }
        if self.doc.page(self.doc.current_page).is_none() {
            self.doc.current_page = self.doc.pages[0].id;
        }
        if let Some(id) = self.doc.selected
            && !self.doc.current_page().contains(id)
        {
            self.doc.selected = None;
        }
        if !self.doc.scale.is_finite() {
            self.doc.scale = 1.0;
        }
        self.doc.scale = self.doc.scale.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Check the store invariants. Used by tests after every operation.
    pub fn invariants_hold(&self) -> bool {
        !self.doc.pages.is_empty()
            && self.doc.page(self.doc.current_page).is_some()
            && self
                .doc
                .selected
                .is_none_or(|id| self.doc.current_page().contains(id))
    }
}

/// Keep stepped zoom on one-decimal values (0.1 steps accumulate error).
fn round_zoom(z: f32) -> f32 {
    (z * 10.0).round() / 10.0
}
