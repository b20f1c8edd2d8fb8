//! "My Designs": saved snapshots of the open document.
//!
//! Saving is two-phase. [`DesignLibrary::begin_save`] captures the document
//! and schedules completion [`SAVE_LATENCY_MS`] later; the host then calls
//! [`DesignLibrary::poll`] with its clock until the save lands. Snapshots are
//! MessagePack-encoded documents, so reopening restores every page exactly.

use crate::notify::Notification;
use crate::store::CanvasStore;
use serde::Serialize;
use studio_core::{CATEGORIES, Document, Tone, find_category, render_page_svg};

/// Simulated persistence latency.
pub const SAVE_LATENCY_MS: u64 = 800;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    pub id: String,
    pub title: String,
    pub category: String,
    pub tone: Tone,
    /// SVG preview of the first page.
    pub thumbnail_svg: String,
    pub saved_at_ms: u64,
    #[serde(skip)]
    pub snapshot: Vec<u8>,
}

#[derive(Debug, Clone)]
struct PendingSave {
    due_ms: u64,
    design: SavedDesign,
}

#[derive(Debug, Default)]
pub struct DesignLibrary {
    designs: Vec<SavedDesign>,
    pending: Option<PendingSave>,
    next_id: u64,
}

impl DesignLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[SavedDesign] {
        &self.designs
    }

    pub fn get(&self, id: &str) -> Option<&SavedDesign> {
        self.designs.iter().find(|d| d.id == id)
    }

    pub fn is_saving(&self) -> bool {
        self.pending.is_some()
    }

    /// Capture the document and schedule the save. Returns `false` (with a
    /// notification) when the title is blank, a save is already in flight,
    /// or the document cannot be encoded.
    pub fn begin_save(&mut self, store: &mut CanvasStore, title: &str, now_ms: u64) -> bool {
        let title = title.trim();
        if title.is_empty() {
            store.notify(Notification::error("Please enter a title for your design"));
            return false;
        }
        if self.pending.is_some() {
            store.notify(Notification::warning("A save is already in progress"));
            return false;
        }

        let doc = store.document();
        let snapshot = match rmp_serde::to_vec_named(doc) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("snapshot encode failed: {e}");
                store.notify(Notification::error("Could not save your design"));
                return false;
            }
        };

        self.next_id += 1;
        let design = SavedDesign {
            id: format!("design-{}", self.next_id),
            title: title.to_string(),
            category: doc.category.clone(),
            tone: doc.tone,
            thumbnail_svg: render_page_svg(doc, &doc.pages[0]),
            saved_at_ms: now_ms,
            snapshot,
        };
        log::debug!("saving {} ({} bytes)", design.id, design.snapshot.len());
        self.pending = Some(PendingSave {
            due_ms: now_ms.saturating_add(SAVE_LATENCY_MS),
            design,
        });
        true
    }

    /// Complete the pending save if it is due. Returns the new design's id.
    pub fn poll(&mut self, store: &mut CanvasStore, now_ms: u64) -> Option<String> {
        let due = self.pending.as_ref().is_some_and(|p| now_ms >= p.due_ms);
        if !due {
            return None;
        }
        let PendingSave { design, .. } = self.pending.take()?;
        let id = design.id.clone();
        store.notify(Notification::success(format!(
            "\"{}\" saved to My Designs",
            design.title
        )));
        self.designs.push(design);
        Some(id)
    }

    /// Replace the open document with a saved one. The selection is cleared
    /// and the current zoom kept. A snapshot that fails to decode falls back
    /// to a blank design of the saved category and tone.
    pub fn open(&self, id: &str, store: &mut CanvasStore) -> Result<(), String> {
        let design = self
            .get(id)
            .ok_or_else(|| format!("no saved design '{id}'"))?;

        match rmp_serde::from_slice::<Document>(&design.snapshot) {
            Ok(doc) => {
                restore(store, doc);
                store.notify(Notification::info(format!("Opened \"{}\"", design.title)));
            }
            Err(e) => {
                log::warn!("snapshot decode failed for {id}: {e}");
                let category = find_category(&design.category).unwrap_or(&CATEGORIES[0]);
                store.select_category(category, design.tone);
                store.notify(Notification::warning(format!(
                    "\"{}\" could not be restored; started a blank {}",
                    design.title, category.name
                )));
            }
        }
        Ok(())
    }

    /// Delete a saved design. Returns `false` for unknown ids.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.designs.len();
        self.designs.retain(|d| d.id != id);
        self.designs.len() != before
    }
}

fn restore(store: &mut CanvasStore, doc: Document) {
    let Document {
        width,
        height,
        pages,
        current_page,
        tone,
        text_color,
        font_family,
        category,
        ..
    } = doc;
    store.doc.width = width;
    store.doc.height = height;
    store.doc.tone = tone;
    store.doc.text_color = text_color;
    store.doc.font_family = font_family;
    store.doc.category = category;
    store.replace_document(pages, current_page);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;
    use pretty_assertions::assert_eq;
    use studio_core::ElementKind;

    #[test]
    fn blank_title_is_rejected() {
        let mut store = CanvasStore::new();
        let mut lib = DesignLibrary::new();
        assert!(!lib.begin_save(&mut store, "   ", 0));
        assert!(!lib.is_saving());
        assert_eq!(store.drain_notifications()[0].kind, NotificationKind::Error);
    }

    #[test]
    fn save_completes_after_latency() {
        let mut store = CanvasStore::new();
        store.add_element(ElementKind::Text, Some("Ada & Grace".into()), None);
        let mut lib = DesignLibrary::new();
        assert!(lib.begin_save(&mut store, "Wedding", 1_000));

        assert_eq!(lib.poll(&mut store, 1_500), None);
        assert!(lib.list().is_empty());

        let id = lib.poll(&mut store, 1_800).unwrap();
        assert_eq!(lib.list().len(), 1);
        let saved = lib.get(&id).unwrap();
        assert_eq!(saved.title, "Wedding");
        assert!(saved.thumbnail_svg.contains("Ada &amp; Grace"));
        assert_eq!(
            store.notifications().last().unwrap().kind,
            NotificationKind::Success
        );
        assert!(!lib.is_saving());
    }

    #[test]
    fn overlapping_save_warns() {
        let mut store = CanvasStore::new();
        let mut lib = DesignLibrary::new();
        assert!(lib.begin_save(&mut store, "One", 0));
        assert!(!lib.begin_save(&mut store, "Two", 10));
        assert_eq!(store.drain_notifications()[0].kind, NotificationKind::Warning);
    }

    #[test]
    fn open_restores_pages_and_clears_selection() {
        let mut store = CanvasStore::new();
        let front = store.add_element(ElementKind::Shape, None, None);
        store.add_page();
        store.add_element(ElementKind::Text, None, None);
        let saved_doc = store.document().clone();

        let mut lib = DesignLibrary::new();
        lib.begin_save(&mut store, "Two pages", 0);
        let id = lib.poll(&mut store, SAVE_LATENCY_MS).unwrap();

        store.delete_element(front);
        store.remove_page(store.current_page_id());
        store.set_zoom(2.0);

        lib.open(&id, &mut store).unwrap();
        let doc = store.document();
        assert_eq!(doc.pages, saved_doc.pages);
        assert_eq!(doc.current_page, saved_doc.current_page);
        assert_eq!(doc.selected, None);
        assert_eq!(doc.scale, 2.0);
        assert!(store.invariants_hold());
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_category() {
        let mut store = CanvasStore::new();
        store.select_category_by_name("Menu", Tone::Floral);
        let mut lib = DesignLibrary::new();
        lib.begin_save(&mut store, "Broken", 0);
        let id = lib.poll(&mut store, SAVE_LATENCY_MS).unwrap();
        lib.designs[0].snapshot = vec![0xc1];
        store.drain_notifications();

        lib.open(&id, &mut store).unwrap();
        let doc = store.document();
        assert_eq!(doc.category, "Menu");
        assert_eq!(doc.tone, Tone::Floral);
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(
            store.notifications().last().unwrap().kind,
            NotificationKind::Warning
        );
    }

    #[test]
    fn open_unknown_and_remove() {
        let mut store = CanvasStore::new();
        let mut lib = DesignLibrary::new();
        assert!(lib.open("design-9", &mut store).is_err());

        lib.begin_save(&mut store, "Keep", 0);
        let id = lib.poll(&mut store, 10_000).unwrap();
        assert!(lib.remove(&id));
        assert!(!lib.remove(&id));
        assert!(lib.list().is_empty());
    }
}
