//! Design Studio editor engine: the canvas store, element and page
//! operations, template loading, pointer drag, keyboard shortcuts, the
//! property panel binding and the saved-design library.

pub mod drag;
pub mod elements;
pub mod input;
pub mod library;
pub mod loader;
pub mod notify;
pub mod pages;
pub mod panel;
pub mod patch;
pub mod shortcuts;
pub mod store;

pub use drag::{DragController, DragSession, DragState};
pub use input::{InputEvent, Modifiers};
pub use library::{DesignLibrary, SAVE_LATENCY_MS, SavedDesign};
pub use notify::{Notification, NotificationKind};
pub use panel::{PanelField, PanelView, PropertyPanel};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use store::{CanvasMutation, CanvasStore, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
