//! `tracing` output for the desktop. While the terminal is in raw mode,
//! formatted events go into a [`LogHandle`] and surface in the status bar.

use std::io;

use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;

use crate::log_buffer::{LogHandle, LogWriter};

impl<'a> MakeWriter<'a> for LogHandle {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer()
    }
}

/// Plain one-line-per-event subscriber writing into `log`.
pub fn buffered_subscriber(max_level: Level, log: LogHandle) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(log)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .finish()
}

/// Install the global subscriber: into `log` when given, otherwise to
/// stderr. Calling it again is a no-op.
pub fn init(max_level: Level, log: Option<LogHandle>) {
    match log {
        Some(log) => {
            let _ = tracing::subscriber::set_global_default(buffered_subscriber(max_level, log));
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_max_level(max_level)
                .with_writer(io::stderr)
                .with_target(false)
                .try_init();
        }
    }
}
