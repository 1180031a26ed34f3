use ratatui::style::Color;

// Centralized theme colors, kept as small helpers so call sites read by role.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

pub fn accent() -> Color {
    Color::Rgb(ACCENT_RGB.0, ACCENT_RGB.1, ACCENT_RGB.2)
}

// Desktop
pub fn desktop_bg() -> Color {
    Color::Reset
}

// Status bar
pub fn status_bg() -> Color {
    Color::DarkGray
}
pub fn status_fg() -> Color {
    Color::White
}
pub fn status_button_bg() -> Color {
    Color::Gray
}
pub fn status_button_fg() -> Color {
    Color::Black
}
pub fn status_log_fg() -> Color {
    Color::Gray
}

// Decorator
pub fn decorator_header_bg() -> Color {
    Color::Blue
}
pub fn decorator_header_inactive_bg() -> Color {
    Color::DarkGray
}
pub fn decorator_header_fg() -> Color {
    Color::White
}
pub fn decorator_border() -> Color {
    Color::DarkGray
}
pub fn resize_handle() -> Color {
    accent()
}

// Content
pub fn content_fg() -> Color {
    Color::Reset
}
