//! Shared crate-wide constants.

/// Width (in terminal columns) of a freshly created window.
pub const DEFAULT_WINDOW_WIDTH: i32 = 32;

/// Height (in terminal rows) of a freshly created window.
pub const DEFAULT_WINDOW_HEIGHT: i32 = 10;

/// Exclusive upper bound of the random left offset for new windows.
///
/// Windows are spawned at `left` in `0..SPAWN_RANGE_COLUMNS`, relative to the
/// desktop origin. The range is bounded by the viewport when that is smaller.
pub const SPAWN_RANGE_COLUMNS: i32 = 60;

/// Exclusive upper bound of the random top offset for new windows.
pub const SPAWN_RANGE_ROWS: i32 = 20;

/// Rows occupied by a minimized window: top border, title bar, bottom border.
pub const MINIMIZED_HEIGHT: i32 = 3;

/// Rows reserved at the bottom of the terminal for the status bar.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Maximum number of windows `--windows` may open at startup.
pub const MAX_STARTUP_WINDOWS: usize = 64;

/// Lines retained by the in-memory log buffer.
pub const LOG_BUFFER_LINES: usize = 200;
