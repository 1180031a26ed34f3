//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! Window geometry is signed and windows are free to hang off any edge of the
//! desktop, so every draw call coming from the chrome or the content layer is
//! clipped here instead of at each call site. Writing out of bounds into the
//! underlying `Buffer` would otherwise panic.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// Wrapper around `ratatui::Frame` that clips drawing to `area`.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` over part of a buffer. Drawing outside `area`
    /// is dropped even when the buffer itself is larger.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        let area = area.intersection(buffer.area);
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Narrow drawing to `area` for the lifetime of the returned frame.
    pub fn clipped(&mut self, area: Rect) -> UiFrame<'_> {
        UiFrame {
            area: self.area.intersection(area),
            buffer: &mut *self.buffer,
        }
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        let left = self.area.x as i32;
        let top = self.area.y as i32;
        x >= left
            && y >= top
            && x < left + self.area.width as i32
            && y < top + self.area.height as i32
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    pub fn fill(&mut self, area: Rect, style: Style) {
        let Some(area) = self.clip_rect(area) else {
            return;
        };
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Set a single cell at signed coordinates; dropped when off-screen.
    pub fn put_symbol(&mut self, x: i32, y: i32, symbol: &str, style: Style) {
        if !self.in_bounds(x, y) {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((x as u16, y as u16)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    /// Copy every cell of `source` so its top-left lands at signed
    /// `(x, y)`. Cells falling outside the frame are dropped.
    pub fn blit(&mut self, source: &Buffer, x: i32, y: i32) {
        let src = source.area;
        for row in src.y..src.y.saturating_add(src.height) {
            for col in src.x..src.x.saturating_add(src.width) {
                let tx = x + (col - src.x) as i32;
                let ty = y + (row - src.y) as i32;
                if !self.in_bounds(tx, ty) {
                    continue;
                }
                if let (Some(from), Some(to)) =
                    (source.cell((col, row)), self.buffer.cell_mut((tx as u16, ty as u16)))
                {
                    *to = from.clone();
                }
            }
        }
    }

    /// Write `text` one char per cell starting at signed coordinates,
    /// dropping whatever falls outside the frame.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: Style) {
        let mut buf = [0u8; 4];
        for (idx, ch) in text.chars().enumerate() {
            self.put_symbol(x + idx as i32, y, ch.encode_utf8(&mut buf), style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u16, height: u16) -> Buffer {
        Buffer::empty(Rect {
            x: 0,
            y: 0,
            width,
            height,
        })
    }

    #[test]
    fn put_str_clips_negative_origin() {
        let mut buf = buffer(5, 1);
        let area = buf.area;
        let mut frame = UiFrame::from_parts(area, &mut buf);
        frame.put_str(-2, 0, "abcdefg", Style::default());
        let line: String = (0..5)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect();
        assert_eq!(line, "cdefg");
    }

    #[test]
    fn clipped_frame_drops_outside_writes() {
        let mut buf = buffer(6, 2);
        let area = buf.area;
        let mut frame = UiFrame::from_parts(area, &mut buf);
        {
            let mut inner = frame.clipped(Rect {
                x: 1,
                y: 0,
                width: 2,
                height: 1,
            });
            inner.put_str(0, 0, "xyzw", Style::default());
        }
        assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some(" "));
        assert_eq!(buf.cell((1, 0)).map(|c| c.symbol()), Some("y"));
        assert_eq!(buf.cell((2, 0)).map(|c| c.symbol()), Some("z"));
        assert_eq!(buf.cell((3, 0)).map(|c| c.symbol()), Some(" "));
    }

    #[test]
    fn blit_shifts_and_clips_source() {
        let mut source = buffer(4, 2);
        source.set_string(0, 0, "abcd", Style::default());
        source.set_string(0, 1, "efgh", Style::default());
        let mut buf = buffer(3, 1);
        let area = buf.area;
        let mut frame = UiFrame::from_parts(area, &mut buf);
        frame.blit(&source, -1, -1);
        let line: String = (0..3)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect();
        assert_eq!(line, "fgh");
    }
}
