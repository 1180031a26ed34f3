use ratatui::style::{Modifier, Style};

use super::WindowGeometry;
use crate::theme;
use crate::ui::UiFrame;
use crate::view::WindowView;

pub const MINIMIZE_LABEL: &str = "[−]";
pub const MAXIMIZE_LABEL: &str = "[□]";
pub const CLOSE_LABEL: &str = "[X]";
pub const RESIZE_HANDLE_SYMBOL: &str = "◢";

const CONTROL_WIDTH: i32 = 3;
const CONTROLS_WIDTH: i32 = CONTROL_WIDTH * 3;

/// What a pointer-down on a window's chrome lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeHit {
    Minimize,
    Maximize,
    Close,
    TitleBar,
    ResizeHandle,
    Body,
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Classify a point inside `frame`; `None` when the point is outside.
    fn hit_test(&self, frame: WindowGeometry, column: i32, row: i32) -> Option<ChromeHit>;

    /// Cells available to the content area, in absolute coordinates.
    fn content_area(&self, frame: WindowGeometry) -> WindowGeometry;

    fn render_chrome(&self, frame: &mut UiFrame<'_>, view: &WindowView);
}

/// Box border, a one-row title bar under the top edge holding the title and
/// the `[−][□][X]` controls, and a resize grip in the bottom-right corner.
#[derive(Debug, Default)]
pub struct BoxDecorator;

impl BoxDecorator {
    fn title_row(frame: WindowGeometry) -> i32 {
        frame.top + 1
    }

    fn inner_right(frame: WindowGeometry) -> i32 {
        frame.left + frame.width - 2
    }

    fn shows_controls(frame: WindowGeometry) -> bool {
        frame.width - 2 >= CONTROLS_WIDTH && frame.height >= 3
    }

    /// Leftmost column of each control, in display order.
    fn control_columns(frame: WindowGeometry) -> [(ChromeHit, i32); 3] {
        let close = Self::inner_right(frame) - (CONTROL_WIDTH - 1);
        [
            (ChromeHit::Minimize, close - 2 * CONTROL_WIDTH),
            (ChromeHit::Maximize, close - CONTROL_WIDTH),
            (ChromeHit::Close, close),
        ]
    }

    fn resize_handle(frame: WindowGeometry) -> (i32, i32) {
        (frame.left + frame.width - 1, frame.top + frame.height - 1)
    }
}

impl WindowDecorator for BoxDecorator {
    fn hit_test(&self, frame: WindowGeometry, column: i32, row: i32) -> Option<ChromeHit> {
        if !frame.contains(column, row) {
            return None;
        }
        if (column, row) == Self::resize_handle(frame) {
            return Some(ChromeHit::ResizeHandle);
        }
        let title_row = Self::title_row(frame);
        if row == title_row && Self::shows_controls(frame) {
            for (hit, start) in Self::control_columns(frame) {
                if column >= start && column < start + CONTROL_WIDTH {
                    return Some(hit);
                }
            }
        }
        if row == frame.top || row == title_row {
            return Some(ChromeHit::TitleBar);
        }
        Some(ChromeHit::Body)
    }

    fn content_area(&self, frame: WindowGeometry) -> WindowGeometry {
        WindowGeometry {
            left: frame.left + 1,
            top: frame.top + 2,
            width: frame.width - 2,
            height: frame.height - 3,
        }
    }

    fn render_chrome(&self, frame: &mut UiFrame<'_>, view: &WindowView) {
        let geometry = view.frame;
        if geometry.width < 2 || geometry.height < 2 {
            return;
        }
        let header_style = if view.focused {
            Style::default()
                .bg(theme::decorator_header_bg())
                .fg(theme::decorator_header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(theme::decorator_header_inactive_bg())
                .fg(theme::decorator_header_fg())
        };
        let border_style = Style::default().fg(theme::decorator_border());

        let left = geometry.left;
        let top = geometry.top;
        let right = geometry.left + geometry.width - 1;
        let bottom = geometry.top + geometry.height - 1;

        // Borders
        for x in left..=right {
            let (top_sym, bottom_sym) = if x == left {
                ("┌", "└")
            } else if x == right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            frame.put_symbol(x, top, top_sym, border_style);
            frame.put_symbol(x, bottom, bottom_sym, border_style);
        }
        for y in top + 1..bottom {
            frame.put_symbol(left, y, "│", border_style);
            frame.put_symbol(right, y, "│", border_style);
        }

        // Title bar
        let title_row = Self::title_row(geometry);
        if title_row < bottom {
            for x in left + 1..right {
                frame.put_symbol(x, title_row, " ", header_style);
            }
            let controls_start = if Self::shows_controls(geometry) {
                Self::control_columns(geometry)[0].1
            } else {
                right
            };
            let title_room = (controls_start - (left + 2)).max(0) as usize;
            let title: String = view.title.chars().take(title_room).collect();
            frame.put_str(left + 2, title_row, &title, header_style);
            if Self::shows_controls(geometry) {
                let labels = [MINIMIZE_LABEL, MAXIMIZE_LABEL, CLOSE_LABEL];
                for ((_, start), label) in Self::control_columns(geometry).into_iter().zip(labels)
                {
                    frame.put_str(start, title_row, label, header_style);
                }
            }
        }

        let (hx, hy) = Self::resize_handle(geometry);
        frame.put_symbol(
            hx,
            hy,
            RESIZE_HANDLE_SYMBOL,
            Style::default().fg(theme::resize_handle()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: WindowGeometry = WindowGeometry::new(10, 5, 20, 8);

    #[test]
    fn hit_test_classifies_chrome() {
        let deco = BoxDecorator;
        // inner right edge is column 28; close occupies 26..=28
        assert_eq!(deco.hit_test(FRAME, 28, 6), Some(ChromeHit::Close));
        assert_eq!(deco.hit_test(FRAME, 26, 6), Some(ChromeHit::Close));
        assert_eq!(deco.hit_test(FRAME, 25, 6), Some(ChromeHit::Maximize));
        assert_eq!(deco.hit_test(FRAME, 20, 6), Some(ChromeHit::Minimize));
        assert_eq!(deco.hit_test(FRAME, 19, 6), Some(ChromeHit::TitleBar));
        assert_eq!(deco.hit_test(FRAME, 12, 5), Some(ChromeHit::TitleBar));
        assert_eq!(deco.hit_test(FRAME, 29, 12), Some(ChromeHit::ResizeHandle));
        assert_eq!(deco.hit_test(FRAME, 15, 9), Some(ChromeHit::Body));
        assert_eq!(deco.hit_test(FRAME, 30, 9), None);
    }

    #[test]
    fn narrow_window_has_no_controls() {
        let deco = BoxDecorator;
        let narrow = WindowGeometry::new(0, 0, 8, 5);
        assert_eq!(deco.hit_test(narrow, 6, 1), Some(ChromeHit::TitleBar));
    }

    #[test]
    fn content_area_sits_inside_the_border() {
        let deco = BoxDecorator;
        assert_eq!(deco.content_area(FRAME), WindowGeometry::new(11, 7, 18, 5));
    }
}
