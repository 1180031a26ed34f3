use std::io;

use thiserror::Error;

use crate::window::WindowId;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("terminal i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no open window with id `{0}`")]
    UnknownWindow(WindowId),
    #[error("a window with id `{0}` is already open")]
    DuplicateWindow(WindowId),
    #[error("render failed: {0}")]
    Render(String),
}
