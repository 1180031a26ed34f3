//! The window-manager context shared by every floating window.
//!
//! `Desktop` owns the stacking counter, the single gesture slot and the
//! viewport, and routes terminal mouse events to the window under the
//! pointer.

mod z_order;

pub use z_order::ZOrderCounter;

use std::collections::BTreeMap;
use std::sync::Arc;

use crossterm::event::{MouseEvent, MouseEventKind};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use ratatui::layout::Rect;

use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, SPAWN_RANGE_COLUMNS, SPAWN_RANGE_ROWS,
};
use crate::error::DeskError;
use crate::gesture::{Gesture, GestureKind, GestureSlot, GestureToken};
use crate::view::WindowView;
use crate::window::decorator::{BoxDecorator, ChromeHit, WindowDecorator};
use crate::window::{FloatingWindow, WindowGeometry, WindowId};

pub struct Desktop {
    windows: BTreeMap<WindowId, FloatingWindow>,
    z_order: ZOrderCounter,
    gestures: GestureSlot,
    viewport: Rect,
    decorator: Arc<dyn WindowDecorator>,
    rng: Pcg64Mcg,
    next_label: usize,
    /// Gesture started by the pointer press currently held down.
    pointer_token: Option<GestureToken>,
}

impl std::fmt::Debug for Desktop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("windows", &self.windows.len())
            .field("z_order", &self.z_order.current())
            .field("gesture", &self.gestures.active())
            .field("viewport", &self.viewport)
            .finish()
    }
}

impl Desktop {
    /// Empty desktop whose spawn positions are drawn from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            windows: BTreeMap::new(),
            z_order: ZOrderCounter::new(),
            gestures: GestureSlot::new(),
            viewport: Rect::default(),
            decorator: Arc::new(BoxDecorator),
            rng: Pcg64Mcg::seed_from_u64(seed),
            next_label: 1,
            pointer_token: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn decorator(&self) -> Arc<dyn WindowDecorator> {
        Arc::clone(&self.decorator)
    }

    pub fn z_order(&self) -> &ZOrderCounter {
        &self.z_order
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.windows.contains_key(id)
    }

    pub fn window(&self, id: &WindowId) -> Option<&FloatingWindow> {
        self.windows.get(id)
    }

    fn window_mut(&mut self, id: &WindowId) -> Result<&mut FloatingWindow, DeskError> {
        self.windows
            .get_mut(id)
            .ok_or_else(|| DeskError::UnknownWindow(id.clone()))
    }

    /// Window ids from bottom to top of the stack.
    pub fn stacking_order(&self) -> Vec<WindowId> {
        let mut windows: Vec<&FloatingWindow> = self.windows.values().collect();
        windows.sort_by_key(|window| window.z_index());
        windows.into_iter().map(|window| window.id().clone()).collect()
    }

    /// The topmost window, which is the one last created or focused.
    pub fn focused(&self) -> Option<&WindowId> {
        self.windows
            .values()
            .max_by_key(|window| window.z_index())
            .map(FloatingWindow::id)
    }

    fn spawn_geometry(&mut self) -> WindowGeometry {
        let span = |range: i32, available: u16, size: i32| {
            if available == 0 {
                range
            } else {
                range.min(available as i32 - size).max(1)
            }
        };
        let span_x = span(SPAWN_RANGE_COLUMNS, self.viewport.width, DEFAULT_WINDOW_WIDTH);
        let span_y = span(SPAWN_RANGE_ROWS, self.viewport.height, DEFAULT_WINDOW_HEIGHT);
        WindowGeometry::new(
            self.viewport.x as i32 + self.rng.random_range(0..span_x),
            self.viewport.y as i32 + self.rng.random_range(0..span_y),
            DEFAULT_WINDOW_WIDTH,
            DEFAULT_WINDOW_HEIGHT,
        )
    }

    /// Build a window at a pseudo-random position and put it on top.
    pub fn open(
        &mut self,
        id: impl Into<WindowId>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<&FloatingWindow, DeskError> {
        let id = id.into();
        if self.windows.contains_key(&id) {
            return Err(DeskError::DuplicateWindow(id));
        }
        let geometry = self.spawn_geometry();
        let window = FloatingWindow::new(id.clone(), title, content, geometry, &self.z_order);
        tracing::debug!(
            window_id = %id,
            z_index = window.z_index(),
            ?geometry,
            "opened window"
        );
        Ok(self.windows.entry(id).or_insert(window))
    }

    /// The payload-free "create" trigger: opens the next auto-labelled
    /// canvas window.
    pub fn create_window(&mut self) -> Result<WindowId, DeskError> {
        let mut label = self.next_label;
        while self.contains(&WindowId::new(format!("window{label}"))) {
            label += 1;
        }
        self.next_label = label + 1;
        let window = self.open(
            format!("window{label}"),
            format!("Canvas {label}"),
            format!("<p>This is canvas window {label}.</p>"),
        )?;
        Ok(window.id().clone())
    }

    /// Bring a window to the front by giving it the next stacking value.
    pub fn focus(&mut self, id: &WindowId) -> Result<(), DeskError> {
        let z_order = &self.z_order;
        let window = self
            .windows
            .get_mut(id)
            .ok_or_else(|| DeskError::UnknownWindow(id.clone()))?;
        window.raise(z_order);
        Ok(())
    }

    /// Raise the bottom-most window, cycling through the stack.
    pub fn cycle_focus(&mut self) -> Result<(), DeskError> {
        match self.stacking_order().first() {
            Some(bottom) => self.focus(bottom),
            None => Ok(()),
        }
    }

    pub fn toggle_minimize(&mut self, id: &WindowId) -> Result<(), DeskError> {
        self.window_mut(id)?.toggle_minimize();
        Ok(())
    }

    pub fn toggle_maximize(&mut self, id: &WindowId) -> Result<(), DeskError> {
        let viewport = self.viewport;
        self.window_mut(id)?.toggle_maximize(viewport);
        Ok(())
    }

    /// Remove the window for good. A gesture tracking it is released.
    pub fn close(&mut self, id: &WindowId) -> Result<FloatingWindow, DeskError> {
        let window = self
            .windows
            .remove(id)
            .ok_or_else(|| DeskError::UnknownWindow(id.clone()))?;
        self.gestures.cancel_for(id);
        tracing::debug!(window_id = %id, "closed window");
        Ok(window)
    }

    /// Record the desktop area. When its size changes, maximized windows
    /// are resized to match. Returns whether the viewport changed.
    pub fn set_viewport(&mut self, viewport: Rect) -> bool {
        if self.viewport == viewport {
            return false;
        }
        self.viewport = viewport;
        let mut synced = 0usize;
        for window in self.windows.values_mut() {
            if window.sync_viewport(viewport) {
                synced += 1;
            }
        }
        tracing::debug!(?viewport, synced, "viewport changed");
        true
    }

    pub fn active_gesture(&self) -> Option<&Gesture> {
        self.gestures.active()
    }

    /// Start dragging `id` by its title bar with the pointer at
    /// (`column`, `row`).
    pub fn begin_drag(
        &mut self,
        id: &WindowId,
        column: i32,
        row: i32,
    ) -> Result<GestureToken, DeskError> {
        let geometry = self.window_mut(id)?.geometry();
        let gesture = Gesture::drag(id.clone(), column - geometry.left, row - geometry.top);
        Ok(self.gestures.begin(gesture).0)
    }

    /// Start resizing `id` from its handle with the pointer at
    /// (`column`, `row`).
    pub fn begin_resize(
        &mut self,
        id: &WindowId,
        column: i32,
        row: i32,
    ) -> Result<GestureToken, DeskError> {
        let geometry = self.window_mut(id)?.geometry();
        let gesture = Gesture::resize(id.clone(), geometry.width, geometry.height, column, row);
        Ok(self.gestures.begin(gesture).0)
    }

    /// Feed a pointer position to the active gesture. Returns whether a
    /// gesture consumed it.
    pub fn pointer_move(&mut self, column: i32, row: i32) -> bool {
        let Some(gesture) = self.gestures.active().cloned() else {
            return false;
        };
        let Some(window) = self.windows.get_mut(&gesture.window) else {
            self.gestures.cancel();
            return false;
        };
        match gesture.kind {
            GestureKind::Drag { offset_x, offset_y } => {
                window.move_to(column - offset_x, row - offset_y);
            }
            GestureKind::Resize {
                start_width,
                start_height,
                start_x,
                start_y,
            } => {
                window.resize_to(start_width + (column - start_x), start_height + (row - start_y));
            }
        }
        true
    }

    /// Release the gesture the held pointer press started. A no-op when
    /// that gesture was already superseded or cancelled.
    pub fn pointer_up(&mut self) -> Option<Gesture> {
        let token = self.pointer_token.take()?;
        self.end_gesture(token)
    }

    /// Drop whatever gesture is active, however it was started.
    pub fn cancel_gesture(&mut self) -> Option<Gesture> {
        self.pointer_token = None;
        self.gestures.cancel()
    }

    /// End a specific gesture; a no-op once another gesture took the slot.
    pub fn end_gesture(&mut self, token: GestureToken) -> Option<Gesture> {
        self.gestures.end(token)
    }

    /// Topmost window whose on-screen frame contains the point. Parts of a
    /// window outside the viewport are not drawn and cannot be hit.
    pub fn window_at(&self, column: i32, row: i32) -> Option<&WindowId> {
        if !WindowGeometry::covering(self.viewport).contains(column, row) {
            return None;
        }
        self.windows
            .values()
            .filter(|window| window.frame().contains(column, row))
            .max_by_key(|window| window.z_index())
            .map(FloatingWindow::id)
    }

    /// Route a terminal mouse event. Returns whether the desktop consumed it.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> Result<bool, DeskError> {
        let column = mouse.column as i32;
        let row = mouse.row as i32;
        match mouse.kind {
            MouseEventKind::Down(_) => {
                let Some(id) = self.window_at(column, row).cloned() else {
                    return Ok(false);
                };
                self.focus(&id)?;
                let frame = self.window_mut(&id)?.frame();
                match self.decorator.hit_test(frame, column, row) {
                    Some(ChromeHit::Minimize) => self.toggle_minimize(&id)?,
                    Some(ChromeHit::Maximize) => self.toggle_maximize(&id)?,
                    Some(ChromeHit::Close) => {
                        self.close(&id)?;
                    }
                    Some(ChromeHit::TitleBar) => {
                        self.pointer_token = Some(self.begin_drag(&id, column, row)?);
                    }
                    Some(ChromeHit::ResizeHandle) => {
                        self.pointer_token = Some(self.begin_resize(&id, column, row)?);
                    }
                    Some(ChromeHit::Body) | None => {}
                }
                Ok(true)
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => Ok(self.pointer_move(column, row)),
            MouseEventKind::Up(_) => Ok(self.pointer_up().is_some()),
            _ => Ok(false),
        }
    }

    /// View-models for every window, bottom to top.
    pub fn views(&self) -> Vec<WindowView> {
        let focused = self.focused().cloned();
        let mut views: Vec<WindowView> = self
            .windows
            .values()
            .map(|window| WindowView::from_window(window, Some(window.id()) == focused.as_ref()))
            .collect();
        views.sort_by_key(|view| view.z_index);
        views
    }
}
