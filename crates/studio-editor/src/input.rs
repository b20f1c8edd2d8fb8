//! Input abstraction layer.
//!
//! Normalizes pointer and keyboard events from the host into `InputEvent`s
//! consumed by the drag controller and the shortcut map. Pointer
//! coordinates are screen pixels relative to the canvas viewport; the
//! element under the pointer is resolved by the host (DOM target), so
//! pointer-down carries it instead of the engine hit-testing.

use studio_core::ElementId;

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed. `target` is the element under the pointer, or
    /// `None` for empty canvas.
    PointerDown {
        x: f32,
        y: f32,
        target: Option<ElementId>,
        modifiers: Modifiers,
    },

    /// Pointer moved anywhere in the document.
    PointerMove {
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    /// Pointer released anywhere in the document.
    PointerUp { x: f32, y: f32 },

    /// Key pressed. `key` is the `KeyboardEvent.key` value.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32, target: Option<ElementId>) -> Self {
        Self::PointerDown {
            x,
            y,
            target,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }
}
