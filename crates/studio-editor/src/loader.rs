//! Template and tone loading. Both replace the document's pages through
//! [`CanvasStore::replace_document`].

use crate::notify::Notification;
use crate::store::CanvasStore;
use studio_core::{
    Category, FIRST_PAGE_LABEL, Page, PageId, Template, TemplateCatalog, Tone, find_category,
};

impl CanvasStore {
    /// Apply a tone's palette and font to the document defaults.
    fn apply_tone(&mut self, tone: Tone) {
        let preset = tone.preset();
        self.doc.tone = tone;
        self.doc.text_color = preset.text_color;
        self.doc.font_family = preset.font_family.to_string();
    }

    /// Start a blank design of `category` in `tone`: the tone's defaults
    /// are applied and the document is reset to a single empty page with
    /// the tone's background.
    pub fn select_category(&mut self, category: &Category, tone: Tone) {
        self.apply_tone(tone);
        self.doc.width = category.width;
        self.doc.height = category.height;
        self.doc.category = category.name.to_string();

        let front = Page::new(
            PageId::intern("front"),
            FIRST_PAGE_LABEL,
            tone.preset().background_color,
        );
        let id = front.id;
        self.replace_document([front], id);
        log::debug!("category {} in {tone} tone", category.name);
        self.notify(Notification::info(format!(
            "Started a new {} in the {tone} tone",
            category.name
        )));
    }

    /// Look up a category by name. Unknown names leave the document as is.
    pub fn select_category_by_name(&mut self, name: &str, tone: Tone) -> bool {
        match find_category(name) {
            Some(category) => {
                self.select_category(category, tone);
                true
            }
            None => {
                log::warn!("unknown category '{name}'");
                false
            }
        }
    }

    /// Replace the document's pages with a template's pages. The first
    /// template page becomes current and the selection is cleared. The
    /// template's size and tone are applied when it defines them.
    pub fn load_template(&mut self, template: &Template) {
        if let (Some(width), Some(height)) = (template.width, template.height) {
            self.doc.width = width;
            self.doc.height = height;
        }
        if let Some(tone) = template.tone {
            self.apply_tone(tone);
        }
        self.doc.category = template.category.clone();

        let first = template.pages.first().map(|p| p.id);
        self.replace_document(
            template.pages.iter().cloned(),
            first.unwrap_or_else(|| PageId::intern("front")),
        );
        log::debug!(
            "loaded template {} ({} page(s))",
            template.id,
            template.pages.len()
        );
        self.notify(Notification::success(format!(
            "Template \"{}\" loaded",
            template.name
        )));
    }

    /// Load a template from a catalog by id. Unknown ids report an error
    /// notification and leave the document untouched.
    pub fn load_template_by_id(&mut self, catalog: &TemplateCatalog, id: &str) -> bool {
        match catalog.get(id) {
            Some(template) => {
                self.load_template(template);
                true
            }
            None => {
                log::warn!("unknown template '{id}'");
                self.notify(Notification::error(format!("Template \"{id}\" not found")));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;
    use studio_core::{ElementKind, find_category};

    #[test]
    fn modern_category_resets_to_one_page() {
        let mut store = CanvasStore::new();
        store.add_page();
        store.add_element(ElementKind::Text, None, None);

        store.select_category(find_category("Program").unwrap(), Tone::Modern);

        let doc = store.document();
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.pages[0].elements.is_empty());
        assert_eq!(doc.pages[0].background_color.to_hex(), "#1D2939");
        assert_eq!(doc.text_color.to_hex(), "#FFFFFF");
        assert_eq!(doc.font_family, "font-sans");
        assert_eq!(doc.tone, Tone::Modern);
        assert_eq!(doc.category, "Program");
        assert_eq!((doc.width, doc.height), (500.0, 800.0));
        assert!(doc.selected.is_none());
        assert!(store.invariants_hold());
    }

    #[test]
    fn new_text_after_category_uses_tone_defaults() {
        let mut store = CanvasStore::new();
        store.select_category(find_category("Menu").unwrap(), Tone::Luxe);
        store.add_element(ElementKind::Text, None, None);
        let json = serde_json::to_value(store.selected_element().unwrap()).unwrap();
        assert_eq!(json["style"]["color"], "#D4AF37");
        assert_eq!(json["style"]["fontFamily"], "font-serif");
    }

    #[test]
    fn unknown_category_is_ignored() {
        let mut store = CanvasStore::new();
        let before = store.document().clone();
        assert!(!store.select_category_by_name("Billboard", Tone::Modern));
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn template_replaces_pages_and_clears_selection() {
        let mut store = CanvasStore::new();
        store.add_element(ElementKind::Shape, None, None);
        assert!(store.selected_id().is_some());

        let catalog = TemplateCatalog::builtin();
        assert!(store.load_template_by_id(catalog, "classic-elegance"));

        let doc = store.document();
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.current_page, PageId::intern("front"));
        assert!(doc.selected.is_none());
        assert_eq!(doc.tone, Tone::Classical);
        assert_eq!(doc.category, "Invitation Card");
        let note = store.notifications().last().unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert!(note.message.contains("Classic Elegance"));
    }

    #[test]
    fn template_without_size_keeps_document_size() {
        let mut store = CanvasStore::new();
        store.set_document_size(321.0, 654.0);
        store.load_template_by_id(TemplateCatalog::builtin(), "bold-program");
        assert_eq!(store.document().width, 321.0);
        assert_eq!(store.document().tone, Tone::Modern);
    }

    #[test]
    fn unknown_template_reports_error() {
        let mut store = CanvasStore::new();
        let before = store.document().clone();
        assert!(!store.load_template_by_id(TemplateCatalog::builtin(), "nope"));
        assert_eq!(store.document(), &before);
        assert_eq!(
            store.drain_notifications()[0].kind,
            NotificationKind::Error
        );
    }
}
