//! The desktop's single active-gesture slot.
//!
//! A gesture spans pointer-down through pointer-up on one window. Only one
//! can be active: beginning a new one releases whatever was installed before,
//! so a missed pointer-up never leaves two windows tracking the pointer.

use crate::window::WindowId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureKind {
    /// Title-bar drag. `offset_*` is the pointer position relative to the
    /// window's top-left corner when the drag began.
    Drag { offset_x: i32, offset_y: i32 },
    /// Resize-handle drag from the recorded start size and pointer.
    Resize {
        start_width: i32,
        start_height: i32,
        start_x: i32,
        start_y: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gesture {
    pub window: WindowId,
    pub kind: GestureKind,
}

impl Gesture {
    pub fn drag(window: WindowId, offset_x: i32, offset_y: i32) -> Self {
        Self {
            window,
            kind: GestureKind::Drag { offset_x, offset_y },
        }
    }

    pub fn resize(
        window: WindowId,
        start_width: i32,
        start_height: i32,
        start_x: i32,
        start_y: i32,
    ) -> Self {
        Self {
            window,
            kind: GestureKind::Resize {
                start_width,
                start_height,
                start_x,
                start_y,
            },
        }
    }

    pub fn is_drag(&self) -> bool {
        matches!(self.kind, GestureKind::Drag { .. })
    }

    pub fn is_resize(&self) -> bool {
        matches!(self.kind, GestureKind::Resize { .. })
    }
}

/// Handle to an installed gesture. Only the handle returned by the most
/// recent `begin` can release the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureToken(u64);

#[derive(Debug, Default)]
pub struct GestureSlot {
    active: Option<(GestureToken, Gesture)>,
    generation: u64,
}

impl GestureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Gesture> {
        self.active.as_ref().map(|(_, gesture)| gesture)
    }

    pub fn token(&self) -> Option<GestureToken> {
        self.active.as_ref().map(|(token, _)| *token)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Install `gesture`, releasing any gesture still held. Returns the
    /// superseded gesture alongside the new token.
    pub fn begin(&mut self, gesture: Gesture) -> (GestureToken, Option<Gesture>) {
        self.generation = self.generation.wrapping_add(1);
        let token = GestureToken(self.generation);
        tracing::debug!(window_id = %gesture.window, kind = ?gesture.kind, "gesture begin");
        let superseded = self.active.replace((token, gesture)).map(|(_, old)| old);
        if let Some(old) = &superseded {
            tracing::debug!(window_id = %old.window, "gesture superseded");
        }
        (token, superseded)
    }

    /// Release the slot if `token` still owns it.
    pub fn end(&mut self, token: GestureToken) -> Option<Gesture> {
        if self.token() != Some(token) {
            return None;
        }
        let (_, gesture) = self.active.take()?;
        tracing::debug!(window_id = %gesture.window, "gesture end");
        Some(gesture)
    }

    /// Release whatever gesture is active.
    pub fn cancel(&mut self) -> Option<Gesture> {
        let token = self.token()?;
        self.end(token)
    }

    /// Release the active gesture when it targets `window`.
    pub fn cancel_for(&mut self, window: &WindowId) -> Option<Gesture> {
        if self.active().is_some_and(|gesture| &gesture.window == window) {
            return self.cancel();
        }
        None
    }
}
