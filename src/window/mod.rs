pub mod decorator;

use std::fmt;

use ratatui::layout::Rect;

use crate::constants::MINIMIZED_HEIGHT;
use crate::desktop::ZOrderCounter;

/// Caller-supplied identity of a window, unique within a desktop.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WindowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Signed position and size of a window, in terminal cells.
///
/// Sizes are signed on purpose: a resize gesture may drive them below zero
/// and the value is kept as-is. Such a window simply has no visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowGeometry {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowGeometry {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Geometry covering `area` exactly.
    pub fn covering(area: Rect) -> Self {
        Self {
            left: area.x as i32,
            top: area.y as i32,
            width: area.width as i32,
            height: area.height as i32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, column: i32, row: i32) -> bool {
        !self.is_empty()
            && column >= self.left
            && column < self.left + self.width
            && row >= self.top
            && row < self.top + self.height
    }

    /// Visible part of this geometry inside `bounds`, or `None` when nothing
    /// of it is on screen.
    pub fn clip_to(&self, bounds: Rect) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        let x0 = self.left.max(bounds.x as i32);
        let y0 = self.top.max(bounds.y as i32);
        let x1 = (self.left + self.width).min(bounds.x as i32 + bounds.width as i32);
        let y1 = (self.top + self.height).min(bounds.y as i32 + bounds.height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

/// One floating panel: identity, content, geometry and window-state flags.
///
/// Gesture bookkeeping lives in the desktop's gesture slot, not here.
#[derive(Debug, Clone)]
pub struct FloatingWindow {
    id: WindowId,
    title: String,
    content: String,
    geometry: WindowGeometry,
    original_size: Option<WindowGeometry>,
    minimized: bool,
    maximized: bool,
    z_index: u64,
}

impl FloatingWindow {
    pub fn new(
        id: WindowId,
        title: impl Into<String>,
        content: impl Into<String>,
        geometry: WindowGeometry,
        z_order: &ZOrderCounter,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            geometry,
            original_size: None,
            minimized: false,
            maximized: false,
            z_index: z_order.next_value(),
        }
    }

    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    pub fn original_size(&self) -> Option<WindowGeometry> {
        self.original_size
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    /// The area the window occupies on screen. A minimized window collapses
    /// to its title bar strip; its stored geometry is untouched.
    pub fn frame(&self) -> WindowGeometry {
        if self.minimized {
            WindowGeometry {
                height: self.geometry.height.min(MINIMIZED_HEIGHT),
                ..self.geometry
            }
        } else {
            self.geometry
        }
    }

    pub fn raise(&mut self, z_order: &ZOrderCounter) {
        self.z_index = z_order.next_value();
    }

    pub fn toggle_minimize(&mut self) {
        self.minimized = !self.minimized;
        tracing::debug!(window_id = %self.id, minimized = self.minimized, "toggled minimize");
    }

    pub fn toggle_maximize(&mut self, viewport: Rect) {
        if self.maximized {
            self.restore();
        } else {
            self.maximize(viewport);
        }
    }

    fn maximize(&mut self, viewport: Rect) {
        self.original_size = Some(self.geometry);
        self.geometry = WindowGeometry::covering(viewport);
        self.maximized = true;
        tracing::debug!(window_id = %self.id, ?viewport, "maximized window");
    }

    /// Write the pre-maximize snapshot back. No-op unless maximized.
    pub fn restore(&mut self) {
        if !self.maximized {
            return;
        }
        if let Some(original) = self.original_size.take() {
            self.geometry = original;
        }
        self.maximized = false;
        tracing::debug!(window_id = %self.id, geometry = ?self.geometry, "restored window");
    }

    /// Keep a maximized window's size matched to the viewport. Returns
    /// whether anything changed.
    pub fn sync_viewport(&mut self, viewport: Rect) -> bool {
        if !self.maximized {
            return false;
        }
        let width = viewport.width as i32;
        let height = viewport.height as i32;
        if self.geometry.width == width && self.geometry.height == height {
            return false;
        }
        self.geometry.width = width;
        self.geometry.height = height;
        true
    }

    /// Move the top-left corner. Suppressed while maximized; returns whether
    /// the window moved.
    pub fn move_to(&mut self, left: i32, top: i32) -> bool {
        if self.maximized {
            return false;
        }
        self.geometry.left = left;
        self.geometry.top = top;
        true
    }

    pub fn resize_to(&mut self, width: i32, height: i32) {
        self.geometry.width = width;
        self.geometry.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: u16, height: u16) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    fn window_at(geometry: WindowGeometry) -> (FloatingWindow, ZOrderCounter) {
        let z = ZOrderCounter::new();
        let window = FloatingWindow::new(
            WindowId::new("window1"),
            "Canvas 1",
            "<p>hello</p>",
            geometry,
            &z,
        );
        (window, z)
    }

    #[test]
    fn new_window_starts_normal() {
        let (window, z) = window_at(WindowGeometry::new(1, 2, 30, 10));
        assert_eq!(window.z_index(), 1);
        assert_eq!(z.current(), 1);
        assert!(!window.is_minimized());
        assert!(!window.is_maximized());
        assert!(window.original_size().is_none());
    }

    #[test]
    fn maximize_then_restore_round_trips() {
        let start = WindowGeometry::new(60, 50, 300, 200);
        let (mut window, _z) = window_at(start);

        window.toggle_maximize(viewport(1024, 768));
        assert!(window.is_maximized());
        assert_eq!(window.geometry(), WindowGeometry::new(0, 0, 1024, 768));
        assert_eq!(window.original_size(), Some(start));

        window.toggle_maximize(viewport(1024, 768));
        assert!(!window.is_maximized());
        assert_eq!(window.geometry(), start);
        // snapshot is consumed
        assert!(window.original_size().is_none());
    }

    #[test]
    fn restore_without_maximize_is_noop() {
        let start = WindowGeometry::new(3, 4, 20, 8);
        let (mut window, _z) = window_at(start);
        window.restore();
        assert_eq!(window.geometry(), start);
        assert!(!window.is_maximized());
    }

    #[test]
    fn double_minimize_restores_visibility() {
        let start = WindowGeometry::new(0, 0, 20, 8);
        let (mut window, _z) = window_at(start);
        window.toggle_minimize();
        assert!(window.is_minimized());
        assert_eq!(window.frame().height, MINIMIZED_HEIGHT);
        assert_eq!(window.geometry(), start);
        window.toggle_minimize();
        assert!(!window.is_minimized());
        assert_eq!(window.frame(), start);
    }

    #[test]
    fn move_is_suppressed_while_maximized() {
        let (mut window, _z) = window_at(WindowGeometry::new(5, 5, 20, 8));
        window.toggle_maximize(viewport(80, 24));
        assert!(!window.move_to(10, 10));
        assert_eq!(window.geometry().left, 0);
        assert_eq!(window.geometry().top, 0);
    }

    #[test]
    fn sync_viewport_only_applies_when_maximized() {
        let start = WindowGeometry::new(5, 5, 20, 8);
        let (mut window, _z) = window_at(start);
        assert!(!window.sync_viewport(viewport(100, 40)));
        assert_eq!(window.geometry(), start);

        window.toggle_maximize(viewport(80, 24));
        assert!(window.sync_viewport(viewport(100, 40)));
        assert_eq!(window.geometry().width, 100);
        assert_eq!(window.geometry().height, 40);
        // unchanged viewport reports no change
        assert!(!window.sync_viewport(viewport(100, 40)));

        window.toggle_maximize(viewport(100, 40));
        assert_eq!(window.geometry(), start);
    }

    #[test]
    fn negative_size_is_accepted_and_invisible() {
        let (mut window, _z) = window_at(WindowGeometry::new(5, 5, 20, 8));
        window.resize_to(-3, 2);
        assert_eq!(window.geometry().width, -3);
        assert!(window.geometry().is_empty());
        assert!(window.geometry().clip_to(viewport(80, 24)).is_none());
        assert!(!window.geometry().contains(5, 5));
    }

    #[test]
    fn clip_to_trims_offscreen_parts() {
        let geometry = WindowGeometry::new(-4, 2, 10, 5);
        let clipped = geometry.clip_to(viewport(80, 24)).expect("visible");
        assert_eq!(
            clipped,
            Rect {
                x: 0,
                y: 2,
                width: 6,
                height: 5
            }
        );
    }
}
