//! WASM bridge for Design Studio: exposes the canvas engine to the web
//! front-end.
//!
//! Compiled via `wasm-pack build --target web`. The host renders the DOM;
//! this crate owns the document. Structured results are returned as JSON
//! strings.

use serde::Serialize;
use std::str::FromStr;
use studio_core::{
    CATEGORIES, ElementId, ElementKind, PageId, TemplateCatalog, Tone, render_page_svg,
};
use studio_editor::{
    CanvasStore, DesignLibrary, DragController, InputEvent, Modifiers, PropertyPanel,
    ShortcutMap,
};
use wasm_bindgen::prelude::*;

/// The main WASM-facing canvas controller.
///
/// Holds the store, the drag controller and the saved-design library. All
/// interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct StudioCanvas {
    store: CanvasStore,
    drag: DragController,
    library: DesignLibrary,
}

impl Default for StudioCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl StudioCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        console_logger_setup();
        Self {
            store: CanvasStore::new(),
            drag: DragController::new(),
            library: DesignLibrary::new(),
        }
    }

    // ─── Read access ─────────────────────────────────────────────────────

    /// The whole document as JSON.
    pub fn document_json(&self) -> String {
        to_json(self.store.document(), "{}")
    }

    pub fn current_page_json(&self) -> String {
        to_json(self.store.current_page(), "{}")
    }

    pub fn current_page_id(&self) -> String {
        self.store.current_page_id().to_string()
    }

    /// The selected element as JSON, or `null`.
    pub fn selection_json(&self) -> String {
        to_json(&self.store.selected_element(), "null")
    }

    pub fn scale(&self) -> f32 {
        self.store.scale()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Pointer pressed. `target` is the id of the element under the pointer
    /// (resolved from the DOM), or `None` for empty canvas.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        target: Option<String>,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = InputEvent::PointerDown {
            x,
            y,
            target: target.as_deref().map(ElementId::intern),
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        };
        self.drive(event)
    }

    pub fn handle_pointer_move(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = InputEvent::PointerMove {
            x,
            y,
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        };
        self.drive(event)
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.drive(InputEvent::pointer_up(x, y))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Handle a key press. Returns `{"changed":bool,"action":"name"}`.
    /// A shortcut that changes the current page ends any drag.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let action = match ShortcutMap::resolve(key, modifiers) {
            Some(a) => a,
            None => return r#"{"changed":false,"action":"none"}"#.to_string(),
        };
        let page = self.store.current_page_id();
        let changed = ShortcutMap::dispatch(action, &mut self.store);
        if self.store.current_page_id() != page {
            self.drag.cancel();
        }
        format!(
            r#"{{"changed":{changed},"action":"{}"}}"#,
            action.name()
        )
    }

    // ─── Elements ────────────────────────────────────────────────────────

    /// Add an element of `kind` (`text`, `image`, `shape`). Returns the new
    /// id, or an empty string for an unknown kind.
    pub fn add_element(&mut self, kind: &str, content: Option<String>) -> String {
        match ElementKind::from_str(kind) {
            Ok(kind) => self.store.add_element(kind, content, None).to_string(),
            Err(e) => {
                log::warn!("{e}");
                String::new()
            }
        }
    }

    /// Apply a flat JSON patch to the selected element.
    pub fn update_selected(&mut self, patch_json: &str) -> bool {
        match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(patch_json) {
            Ok(patch) => self.store.update_element(&patch),
            Err(e) => {
                log::warn!("update_selected: invalid patch: {e}");
                false
            }
        }
    }

    pub fn select(&mut self, id: Option<String>) -> bool {
        self.store
            .select_element(id.as_deref().map(ElementId::intern))
    }

    pub fn delete_selected(&mut self) -> bool {
        self.store.delete_selected()
    }

    /// Duplicate the selection. Returns the copy's id or an empty string.
    pub fn duplicate_selected(&mut self) -> String {
        self.store
            .selected_id()
            .and_then(|id| self.store.duplicate_element(id))
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    pub fn bring_to_front(&mut self) -> bool {
        self.with_selected(CanvasStore::bring_to_front)
    }

    pub fn send_to_back(&mut self) -> bool {
        self.with_selected(CanvasStore::send_to_back)
    }

    pub fn bring_forward(&mut self) -> bool {
        self.with_selected(CanvasStore::bring_forward)
    }

    pub fn send_backward(&mut self) -> bool {
        self.with_selected(CanvasStore::send_backward)
    }

    // ─── Pages ───────────────────────────────────────────────────────────

    /// Returns the new page's id.
    pub fn add_page(&mut self) -> String {
        self.store.add_page().to_string()
    }

    pub fn remove_page(&mut self, id: &str) -> bool {
        let removed = self.store.remove_page(PageId::intern(id));
        if removed {
            self.drag.cancel();
        }
        removed
    }

    pub fn rename_page(&mut self, id: &str, label: &str) -> bool {
        self.store.rename_page(PageId::intern(id), label)
    }

    pub fn switch_page(&mut self, id: &str) -> bool {
        let switched = self.store.switch_page(PageId::intern(id));
        if switched {
            self.drag.cancel();
        }
        switched
    }

    pub fn set_page_background(&mut self, id: &str, color: &str) -> bool {
        match studio_core::Color::from_hex(color) {
            Some(c) => self.store.set_page_background(PageId::intern(id), c),
            None => {
                log::warn!("set_page_background: invalid color '{color}'");
                false
            }
        }
    }

    // ─── Document & view ─────────────────────────────────────────────────

    pub fn set_document_size(&mut self, width: f32, height: f32) -> bool {
        self.store.set_document_size(width, height)
    }

    pub fn set_zoom(&mut self, factor: f32) -> bool {
        self.store.set_zoom(factor)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.store.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.store.zoom_out()
    }

    /// Start a blank design. Unknown tones fall back to the default tone.
    pub fn select_category(&mut self, name: &str, tone: &str) -> bool {
        let tone = Tone::from_str(tone).unwrap_or_else(|e| {
            log::warn!("{e}");
            Tone::default()
        });
        self.drag.cancel();
        self.store.select_category_by_name(name, tone)
    }

    pub fn load_template(&mut self, id: &str) -> bool {
        self.drag.cancel();
        self.store.load_template_by_id(TemplateCatalog::builtin(), id)
    }

    // ─── Property panel ──────────────────────────────────────────────────

    pub fn panel_json(&self) -> String {
        to_json(&PropertyPanel::read(&self.store), "{}")
    }

    /// Write raw form input into a panel field (`x`, `fontSize`,
    /// `documentWidth`, `pageBackground`, ...).
    pub fn set_panel_field(&mut self, key: &str, raw: &str) -> bool {
        PropertyPanel::write_key(&mut self.store, key, raw)
    }

    // ─── My Designs ──────────────────────────────────────────────────────

    /// Begin saving under `title`. Completion is reported by `poll_save`.
    pub fn save(&mut self, title: &str, now_ms: f64) -> bool {
        self.library
            .begin_save(&mut self.store, title, now_ms.max(0.0) as u64)
    }

    pub fn is_saving(&self) -> bool {
        self.library.is_saving()
    }

    /// Returns the saved design's id once the pending save lands, or an
    /// empty string.
    pub fn poll_save(&mut self, now_ms: f64) -> String {
        self.library
            .poll(&mut self.store, now_ms.max(0.0) as u64)
            .unwrap_or_default()
    }

    /// Reopen a saved design. Returns `{"ok":true}` or
    /// `{"ok":false,"error":"..."}`.
    pub fn open_design(&mut self, id: &str) -> String {
        self.drag.cancel();
        match self.library.open(id, &mut self.store) {
            Ok(()) => r#"{"ok":true}"#.to_string(),
            Err(e) => {
                log::warn!("open_design: {e}");
                error_json(&e)
            }
        }
    }

    pub fn remove_design(&mut self, id: &str) -> bool {
        self.library.remove(id)
    }

    pub fn list_designs(&self) -> String {
        to_json(self.library.list(), "[]")
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// SVG of a page (the current page when `page_id` is `None`). Unknown
    /// ids export an empty string.
    pub fn export_svg(&self, page_id: Option<String>) -> String {
        let doc = self.store.document();
        let page = match page_id {
            Some(id) => doc.page(PageId::intern(&id)),
            None => Some(doc.current_page()),
        };
        page.map(|p| render_page_svg(doc, p)).unwrap_or_default()
    }

    /// Pending notifications as a JSON array; the queue is emptied.
    pub fn drain_notifications(&mut self) -> String {
        to_json(&self.store.drain_notifications(), "[]")
    }
}

impl StudioCanvas {
    fn drive(&mut self, event: InputEvent) -> bool {
        let mutations = self.drag.handle(&event, &self.store);
        self.store.apply_all(mutations)
    }

    fn with_selected(&mut self, op: fn(&mut CanvasStore, ElementId) -> bool) -> bool {
        match self.store.selected_id() {
            Some(id) => op(&mut self.store, id),
            None => false,
        }
    }
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "ok": false, "error": message }).to_string()
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("serialization failed: {e}");
        fallback.to_string()
    })
}

// ─── Console logging & panic hook ────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg: JsValue = format!("[{}] {}", record.target(), record.args()).into();
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

fn console_logger_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        static LOGGER: ConsoleLogger = ConsoleLogger;
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Design Studio WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone listings (no canvas needed) ──────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToneEntry {
    name: &'static str,
    background_color: String,
    text_color: String,
    font_family: &'static str,
}

/// Tones with their palettes as JSON.
#[wasm_bindgen]
pub fn list_tones() -> String {
    let tones: Vec<ToneEntry> = Tone::ALL
        .iter()
        .map(|tone| {
            let preset = tone.preset();
            ToneEntry {
                name: tone.as_str(),
                background_color: preset.background_color.to_hex(),
                text_color: preset.text_color.to_hex(),
                font_family: preset.font_family,
            }
        })
        .collect();
    to_json(&tones, "[]")
}

/// Design categories with their default sizes as JSON.
#[wasm_bindgen]
pub fn list_categories() -> String {
    to_json(CATEGORIES, "[]")
}

/// Validate a host-supplied template catalog. Returns `{"ok":true}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_catalog(json: &str) -> String {
    match TemplateCatalog::from_json(json) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => error_json(&e),
    }
}

/// Built-in template summaries as JSON.
#[wasm_bindgen]
pub fn list_templates() -> String {
    to_json(&TemplateCatalog::builtin().summaries(), "[]")
}
