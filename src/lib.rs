//! Floating windows on a terminal desktop.
//!
//! [`desktop::Desktop`] owns the shared window-manager state (stacking
//! counter, the single active gesture, the viewport) and the open
//! [`window::FloatingWindow`]s. The [`runner`] drives it from terminal input
//! and draws the [`view::WindowView`] model every frame.

pub mod actions;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod gesture;
pub mod keybindings;
pub mod log_buffer;
pub mod markup;
pub mod runner;
pub mod status_bar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod view;
pub mod window;

pub use error::DeskError;
