//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s, and actions to
//! canvas mutations. The map lives in Rust so the web front-end and tests
//! share one definition.

use crate::input::Modifiers;
use crate::store::{CanvasMutation, CanvasStore};

/// Nudge distance for arrow keys, in artboard pixels.
pub const NUDGE: f32 = 1.0;
/// Nudge distance for Shift + arrow keys.
pub const NUDGE_LARGE: f32 = 10.0;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortcutAction {
    // ── Edit ──
    Delete,
    Duplicate,
    Deselect,
    Nudge { dx: f32, dy: f32 },

    // ── Z-order ──
    BringForward,
    SendBackward,
    BringToFront,
    SendToBack,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ZoomReset,

    // ── Pages ──
    NextPage,
    PreviousPage,
}

impl ShortcutAction {
    pub fn name(&self) -> &'static str {
        match self {
            ShortcutAction::Delete => "delete",
            ShortcutAction::Duplicate => "duplicate",
            ShortcutAction::Deselect => "deselect",
            ShortcutAction::Nudge { .. } => "nudge",
            ShortcutAction::BringForward => "bringForward",
            ShortcutAction::SendBackward => "sendBackward",
            ShortcutAction::BringToFront => "bringToFront",
            ShortcutAction::SendToBack => "sendToBack",
            ShortcutAction::ZoomIn => "zoomIn",
            ShortcutAction::ZoomOut => "zoomOut",
            ShortcutAction::ZoomReset => "zoomReset",
            ShortcutAction::NextPage => "nextPage",
            ShortcutAction::PreviousPage => "previousPage",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"d"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.command();

        if cmd && modifiers.shift {
            return match key {
                "]" | "}" => Some(ShortcutAction::BringToFront),
                "[" | "{" => Some(ShortcutAction::SendToBack),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "]" => Some(ShortcutAction::BringForward),
                "[" => Some(ShortcutAction::SendBackward),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ZoomReset),
                _ => None,
            };
        }

        let step = if modifiers.shift { NUDGE_LARGE } else { NUDGE };
        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            "ArrowLeft" => Some(ShortcutAction::Nudge { dx: -step, dy: 0.0 }),
            "ArrowRight" => Some(ShortcutAction::Nudge { dx: step, dy: 0.0 }),
            "ArrowUp" => Some(ShortcutAction::Nudge { dx: 0.0, dy: -step }),
            "ArrowDown" => Some(ShortcutAction::Nudge { dx: 0.0, dy: step }),
            "PageDown" => Some(ShortcutAction::NextPage),
            "PageUp" => Some(ShortcutAction::PreviousPage),
            _ => None,
        }
    }

    /// Apply an action to the store. Element actions target the selection
    /// and do nothing without one. Returns `true` if the document changed.
    pub fn dispatch(action: ShortcutAction, store: &mut CanvasStore) -> bool {
        let selected = store.selected_id();
        let mutation = match (action, selected) {
            (ShortcutAction::Delete, Some(id)) => CanvasMutation::DeleteElement { id },
            (ShortcutAction::Duplicate, Some(id)) => CanvasMutation::DuplicateElement { id },
            (ShortcutAction::Nudge { dx, dy }, Some(id)) => {
                CanvasMutation::MoveElementBy { id, dx, dy }
            }
            (ShortcutAction::BringForward, Some(id)) => CanvasMutation::BringForward { id },
            (ShortcutAction::SendBackward, Some(id)) => CanvasMutation::SendBackward { id },
            (ShortcutAction::BringToFront, Some(id)) => CanvasMutation::BringToFront { id },
            (ShortcutAction::SendToBack, Some(id)) => CanvasMutation::SendToBack { id },
            (ShortcutAction::Deselect, _) => CanvasMutation::Select { id: None },
            (ShortcutAction::ZoomIn, _) => return store.zoom_in(),
            (ShortcutAction::ZoomOut, _) => return store.zoom_out(),
            (ShortcutAction::ZoomReset, _) => return store.reset_zoom(),
            (ShortcutAction::NextPage, _) => return store.next_page(),
            (ShortcutAction::PreviousPage, _) => return store.previous_page(),
            (_, None) => return false,
        };
        store.apply_mutation(mutation)
    }
}
