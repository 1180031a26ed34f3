//! One-row bar under the desktop: the "new window" trigger, key hints and
//! the most recent log line.

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::theme;
use crate::ui::UiFrame;

pub const NEW_WINDOW_LABEL: &str = "[+ New window]";

const HINT_SEPARATOR: &str = "  ";

/// Columns kept free for the log line before any hint is placed.
const LOG_MIN_WIDTH: i32 = 20;

#[derive(Debug, Default)]
pub struct StatusBar {
    button_rect: Option<Rect>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen rect of the new-window button as of the last render.
    pub fn button_rect(&self) -> Option<Rect> {
        self.button_rect
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        hints: &[String],
        log_line: Option<&str>,
    ) {
        self.button_rect = None;
        let area = area.intersection(frame.area());
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = Style::default()
            .fg(theme::status_fg())
            .bg(theme::status_bg());
        frame.fill(area, style);

        let x = area.x as i32;
        let y = area.y as i32;
        let right_edge = x + area.width as i32;
        let button_width = NEW_WINDOW_LABEL.chars().count() as u16;
        self.button_rect = Some(Rect {
            x: area.x,
            y: area.y,
            width: button_width.min(area.width),
            height: 1,
        });
        let button_style = Style::default()
            .fg(theme::status_button_fg())
            .bg(theme::status_button_bg());
        frame.put_str(x, y, NEW_WINDOW_LABEL, button_style);

        let log_line = log_line.filter(|line| !line.is_empty());
        let hint_limit = match log_line {
            Some(_) => right_edge - LOG_MIN_WIDTH - 2,
            None => right_edge,
        };
        // hints are dropped whole once the next one would not fit
        let mut used = x + button_width as i32;
        for hint in hints {
            let start = used + HINT_SEPARATOR.len() as i32;
            let end = start + hint.chars().count() as i32;
            if end > hint_limit {
                break;
            }
            frame.put_str(start, y, hint, style);
            used = end;
        }

        // the log line is right-aligned in whatever room is left
        let Some(line) = log_line else {
            return;
        };
        let room = right_edge - used - 2;
        if room <= 0 {
            return;
        }
        let text: String = line.chars().take(room as usize).collect();
        let start = right_edge - text.chars().count() as i32;
        frame.put_str(
            start,
            y,
            &text,
            Style::default()
                .fg(theme::status_log_fg())
                .bg(theme::status_bg()),
        );
    }

    /// True for a left press on the new-window button.
    pub fn hit_test_new_window(&self, event: &Event) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return false;
        }
        self.button_rect.is_some_and(|rect| {
            mouse.column >= rect.x
                && mouse.column < rect.x.saturating_add(rect.width)
                && mouse.row >= rect.y
                && mouse.row < rect.y.saturating_add(rect.height)
        })
    }
}
