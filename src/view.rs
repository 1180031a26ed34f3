//! Declarative view-model of the desktop and the layer that draws it.
//!
//! [`WindowView`] is a snapshot of what one window should look like; it is
//! derived from window state on every frame and never mutated by drawing.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Clear, Paragraph, Widget, Wrap};

use crate::markup::fragment_lines;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::decorator::WindowDecorator;
use crate::window::{FloatingWindow, WindowGeometry, WindowId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowView {
    pub id: WindowId,
    pub title: String,
    /// Area drawn on screen; collapsed to the title bar when minimized.
    pub frame: WindowGeometry,
    pub content: Vec<String>,
    pub content_visible: bool,
    pub focused: bool,
    pub z_index: u64,
}

impl WindowView {
    pub fn from_window(window: &FloatingWindow, focused: bool) -> Self {
        Self {
            id: window.id().clone(),
            title: window.title().to_string(),
            frame: window.frame(),
            content: fragment_lines(window.content()),
            content_visible: !window.is_minimized(),
            focused,
            z_index: window.z_index(),
        }
    }
}

/// Draw `views` bottom to top. Later views simply paint over earlier ones.
pub fn render_desktop(
    frame: &mut UiFrame<'_>,
    decorator: &dyn WindowDecorator,
    views: &[WindowView],
) {
    let desktop = frame.area();
    frame.fill(desktop, Style::default().bg(theme::desktop_bg()));
    for view in views {
        render_window(frame, decorator, view);
    }
}

pub fn render_window(frame: &mut UiFrame<'_>, decorator: &dyn WindowDecorator, view: &WindowView) {
    let Some(visible) = view.frame.clip_to(frame.area()) else {
        return;
    };
    frame.render_widget(Clear, visible);
    decorator.render_chrome(frame, view);

    if !view.content_visible {
        return;
    }
    let content = decorator.content_area(view.frame);
    if content.is_empty() {
        return;
    }
    let Some(visible_content) = content.clip_to(frame.area()) else {
        return;
    };
    // Lay the text out at the window's full content width, then copy it in
    // place so parts hanging off an edge are cut rather than reflowed.
    let rows_needed = (visible_content.y as i32 - content.top) + visible_content.height as i32;
    let layout = Rect {
        x: 0,
        y: 0,
        width: content.width.min(u16::MAX as i32) as u16,
        height: rows_needed.min(u16::MAX as i32) as u16,
    };
    let mut scratch = Buffer::empty(layout);
    let lines: Vec<Line> = view.content.iter().map(|l| Line::raw(l.as_str())).collect();
    Paragraph::new(Text::from(lines))
        .style(Style::default().fg(theme::content_fg()))
        .wrap(Wrap { trim: true })
        .render(layout, &mut scratch);
    frame.blit(&scratch, content.left, content.top);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::ZOrderCounter;
    use crate::window::decorator::BoxDecorator;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect()
    }

    fn sample_window(minimized: bool) -> FloatingWindow {
        let z = ZOrderCounter::new();
        let mut window = FloatingWindow::new(
            WindowId::new("window1"),
            "Canvas 1",
            "<p>This is canvas window 1.</p>",
            WindowGeometry::new(1, 0, 30, 6),
            &z,
        );
        if minimized {
            window.toggle_minimize();
        }
        window
    }

    #[test]
    fn view_reflects_window_state() {
        let view = WindowView::from_window(&sample_window(true), true);
        assert!(!view.content_visible);
        assert_eq!(view.frame.height, 3);
        assert_eq!(view.content, vec!["This is canvas window 1."]);
        assert_eq!(view.z_index, 1);
    }

    #[test]
    fn renders_title_controls_and_content() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 8,
        };
        let mut buf = Buffer::empty(area);
        let view = WindowView::from_window(&sample_window(false), true);
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            render_desktop(&mut frame, &BoxDecorator, &[view]);
        }
        assert!(row_text(&buf, 1).contains("Canvas 1"));
        assert!(row_text(&buf, 1).contains("[−][□][X]"));
        assert!(row_text(&buf, 2).contains("This is canvas window 1."));
        assert!(row_text(&buf, 5).contains('◢'));
    }

    #[test]
    fn content_hanging_off_the_left_edge_is_cut_not_reflowed() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 8,
        };
        let mut buf = Buffer::empty(area);
        let mut window = sample_window(false);
        window.move_to(-4, 0);
        let view = WindowView::from_window(&window, true);
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            render_desktop(&mut frame, &BoxDecorator, &[view]);
        }
        // content starts at column -3, so the first three characters are gone
        assert!(row_text(&buf, 2).starts_with("s is canvas window 1."));
    }

    #[test]
    fn minimized_window_hides_content() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 8,
        };
        let mut buf = Buffer::empty(area);
        let view = WindowView::from_window(&sample_window(true), false);
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            render_desktop(&mut frame, &BoxDecorator, &[view]);
        }
        assert!(row_text(&buf, 1).contains("Canvas 1"));
        assert!(!row_text(&buf, 2).contains("canvas window"));
        assert!(row_text(&buf, 3).trim().is_empty());
    }
}
