//! Page manager: add, remove, rename, switch, and recolor pages.

use crate::store::CanvasStore;
use studio_core::{Color, Page, PageId};

impl CanvasStore {
    /// Append a blank page and make it current.
    ///
    /// The label is `Page N` with N = page count + 1; labels are cosmetic
    /// and may repeat after removals. The background is copied from the
    /// first page, not the current one.
    pub fn add_page(&mut self) -> PageId {
        let id = PageId::fresh("page", |id| self.doc.page(id).is_some());
        let label = format!("Page {}", self.doc.pages.len() + 1);
        let background = self.doc.pages[0].background_color;
        self.doc.pages.push(Page::new(id, label, background));
        self.doc.current_page = id;
        self.doc.selected = None;
        log::debug!("added page {id}");
        id
    }

    /// Remove a page. Refused when it is the only page. Removing the
    /// current page makes the (new) first page current.
    pub fn remove_page(&mut self, id: PageId) -> bool {
        if self.doc.pages.len() <= 1 {
            log::debug!("remove_page: refusing to remove the last page");
            return false;
        }
        let Some(idx) = self.doc.page_index(id) else {
            return false;
        };
        self.doc.pages.remove(idx);
        if self.doc.current_page == id {
            self.doc.current_page = self.doc.pages[0].id;
            self.doc.selected = None;
        }
        log::debug!("removed page {id}");
        true
    }

    pub fn rename_page(&mut self, id: PageId, label: &str) -> bool {
        match self.doc.page_mut(id) {
            Some(page) if page.label != label => {
                page.label = label.to_string();
                true
            }
            _ => false,
        }
    }

    /// Make another page current. The selection never carries across.
    /// Unknown ids are ignored.
    pub fn switch_page(&mut self, id: PageId) -> bool {
        if self.doc.page(id).is_none() {
            log::warn!("switch_page: unknown page {id}");
            return false;
        }
        let changed = self.doc.current_page != id || self.doc.selected.is_some();
        self.doc.current_page = id;
        self.doc.selected = None;
        if changed {
            log::debug!("switched to page {id}");
        }
        changed
    }

    /// Switch to the page after the current one, if any.
    pub fn next_page(&mut self) -> bool {
        let idx = self.doc.page_index(self.doc.current_page).unwrap_or(0);
        match self.doc.pages.get(idx + 1).map(|p| p.id) {
            Some(id) => self.switch_page(id),
            None => false,
        }
    }

    /// Switch to the page before the current one, if any.
    pub fn previous_page(&mut self) -> bool {
        let idx = self.doc.page_index(self.doc.current_page).unwrap_or(0);
        match idx.checked_sub(1).map(|i| self.doc.pages[i].id) {
            Some(id) => self.switch_page(id),
            None => false,
        }
    }

    pub fn set_page_background(&mut self, id: PageId, color: Color) -> bool {
        match self.doc.page_mut(id) {
            Some(page) if page.background_color != color => {
                page.background_color = color;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::ElementKind;

    #[test]
    fn fresh_store_has_single_front_page() {
        let store = CanvasStore::new();
        let doc = store.document();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].label, "Front");
        assert!(doc.pages[0].elements.is_empty());
    }

    #[test]
    fn add_page_labels_and_switches() {
        let mut store = CanvasStore::new();
        let id = store.add_page();
        let doc = store.document();
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].label, "Page 2");
        assert_eq!(doc.current_page, id);
        assert!(doc.pages[1].elements.is_empty());
    }

    #[test]
    fn add_page_copies_first_page_background() {
        let mut store = CanvasStore::new();
        let first = store.current_page_id();
        let second = store.add_page();
        store.set_page_background(second, Color::BLACK);
        store.set_page_background(first, Color::rgba(1.0, 0.0, 0.0, 1.0));
        let third = store.add_page();
        let page = store.document().page(third).unwrap();
        assert_eq!(page.background_color.to_hex(), "#FF0000");
        assert_eq!(page.label, "Page 3");
    }

    #[test]
    fn remove_last_page_is_refused() {
        let mut store = CanvasStore::new();
        let only = store.current_page_id();
        let before = store.document().clone();
        assert!(!store.remove_page(only));
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn remove_current_falls_back_to_first() {
        let mut store = CanvasStore::new();
        let first = store.current_page_id();
        let second = store.add_page();
        store.add_element(ElementKind::Shape, None, None);
        assert!(store.remove_page(second));
        assert_eq!(store.current_page_id(), first);
        assert!(store.document().selected.is_none());
        assert!(store.invariants_hold());
    }

    #[test]
    fn remove_first_while_on_second_keeps_current() {
        let mut store = CanvasStore::new();
        let first = store.current_page_id();
        let second = store.add_page();
        assert!(store.remove_page(first));
        assert_eq!(store.current_page_id(), second);
        assert_eq!(store.document().pages.len(), 1);
    }

    #[test]
    fn switching_clears_selection() {
        let mut store = CanvasStore::new();
        let first = store.current_page_id();
        store.add_page();
        store.add_element(ElementKind::Text, None, None);
        assert!(store.selected_id().is_some());
        assert!(store.switch_page(first));
        assert!(store.selected_id().is_none());
        assert!(!store.switch_page(PageId::intern("no_such_page")));
        assert_eq!(store.current_page_id(), first);
    }

    #[test]
    fn rename_touches_only_label() {
        let mut store = CanvasStore::new();
        let id = store.current_page_id();
        store.add_element(ElementKind::Shape, None, None);
        let elements = store.current_page().elements.clone();
        assert!(store.rename_page(id, "Cover"));
        assert!(!store.rename_page(id, "Cover"));
        assert_eq!(store.current_page().label, "Cover");
        assert_eq!(store.current_page().elements, elements);
    }

    #[test]
    fn next_and_previous() {
        let mut store = CanvasStore::new();
        let first = store.current_page_id();
        let second = store.add_page();
        assert!(!store.next_page());
        assert!(store.previous_page());
        assert_eq!(store.current_page_id(), first);
        assert!(!store.previous_page());
        assert!(store.next_page());
        assert_eq!(store.current_page_id(), second);
    }
}
