//! Pointer drag of elements.
//!
//! A drag is an explicit session: pointer-down on an element snapshots the
//! pointer position, the element position and the zoom factor; every
//! pointer-move computes the new position from that snapshot,
//!
//! ```text
//! x = start_x + (pointer_x - start_pointer_x) / scale
//! ```
//!
//! so the result does not depend on how many move events arrived. Moves and
//! the release are accepted anywhere in the document, and pointer-up always
//! ends the session. The session is bound to the page it started on: once
//! the current page changes, the next move ends it without moving anything.
//!
//! | Modifier | Effect |
//! |----------|--------|
//! | **Shift** | Constrain to the dominant axis |

use crate::input::InputEvent;
use crate::store::{CanvasMutation, CanvasStore};
use studio_core::{ElementId, PageId};

/// Snapshot taken when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub target: ElementId,
    /// Element ids are only unique within a page.
    pub target_page: PageId,
    pub start_pointer: (f32, f32),
    pub start_position: (f32, f32),
    pub scale: f32,
}

impl DragSession {
    /// Start dragging `target` from pointer `(px, py)`. `None` if the
    /// element is not on the current page.
    pub fn begin(store: &CanvasStore, target: ElementId, px: f32, py: f32) -> Option<Self> {
        let el = store.current_page().element(target)?;
        Some(Self {
            target,
            target_page: store.current_page_id(),
            start_pointer: (px, py),
            start_position: (el.x, el.y),
            scale: store.scale(),
        })
    }

    /// Element position for the pointer at `(px, py)`.
    pub fn position_at(&self, px: f32, py: f32, constrain: bool) -> (f32, f32) {
        let mut dx = (px - self.start_pointer.0) / self.scale;
        let mut dy = (py - self.start_pointer.1) / self.scale;
        if constrain {
            if dx.abs() > dy.abs() {
                dy = 0.0;
            } else {
                dx = 0.0;
            }
        }
        (self.start_position.0 + dx, self.start_position.1 + dy)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Translates pointer events into canvas mutations.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Drop any active session without producing mutations.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Handle an input event, returning zero or more mutations for the store.
    pub fn handle(&mut self, event: &InputEvent, store: &CanvasStore) -> Vec<CanvasMutation> {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                target: Some(id),
                ..
            } => {
                self.state = match DragSession::begin(store, *id, *x, *y) {
                    Some(session) => {
                        log::trace!("drag start {id} at ({x}, {y})");
                        DragState::Dragging(session)
                    }
                    None => DragState::Idle,
                };
                vec![CanvasMutation::Select { id: Some(*id) }]
            }
            InputEvent::PointerDown { target: None, .. } => {
                // Click on empty canvas.
                self.state = DragState::Idle;
                vec![CanvasMutation::Select { id: None }]
            }
            InputEvent::PointerMove { x, y, modifiers } => match self.state {
                DragState::Dragging(session) if session.target_page != store.current_page_id() => {
                    log::debug!(
                        "drag of {} ended: page {} is no longer current",
                        session.target,
                        session.target_page
                    );
                    self.state = DragState::Idle;
                    vec![]
                }
                DragState::Dragging(session) => {
                    let (nx, ny) = session.position_at(*x, *y, modifiers.shift);
                    vec![CanvasMutation::MoveElementTo {
                        id: session.target,
                        x: nx,
                        y: ny,
                    }]
                }
                DragState::Idle => vec![],
            },
            InputEvent::PointerUp { .. } => {
                if let DragState::Dragging(session) = self.state {
                    log::trace!("drag end {}", session.target);
                }
                self.state = DragState::Idle;
                vec![]
            }
            InputEvent::Key { .. } => vec![],
        }
    }
}
