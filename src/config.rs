use std::time::Duration;

use clap::Parser;
use indoc::indoc;
use tracing::Level;

use crate::constants::MAX_STARTUP_WINDOWS;
use crate::error::DeskError;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "term-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Floating, draggable and resizable windows in your terminal",
    after_help = indoc! {"
        Mouse:
          drag a title bar to move a window, drag the ◢ corner to resize it
          [−] minimizes, [□] maximizes or restores, [X] closes
          [+ New window] in the status bar opens another window

        Keys:
          n new window, m minimize, x maximize, w close
          Tab raise the bottom window, Esc cancel a drag, q or Ctrl+Q quit
    "}
)]
pub struct Cli {
    /// Seed for window placement. Random when omitted.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Number of windows to open at startup.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 1)]
    pub windows: usize,

    /// Input poll interval; the desktop redraws whenever it elapses.
    #[arg(long = "poll-ms", value_name = "MS", default_value_t = 16)]
    pub poll_ms: u64,

    /// Most verbose log level kept in the status bar log.
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "debug")]
    pub log_level: Level,
}

/// Validated runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopConfig {
    pub seed: u64,
    pub startup_windows: usize,
    pub poll_interval: Duration,
    pub log_level: Level,
}

impl TryFrom<&Cli> for DesktopConfig {
    type Error = DeskError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.windows > MAX_STARTUP_WINDOWS {
            return Err(DeskError::InvalidConfig(format!(
                "windows must be at most {MAX_STARTUP_WINDOWS}"
            )));
        }
        if !(1..=1000).contains(&cli.poll_ms) {
            return Err(DeskError::InvalidConfig(
                "poll-ms must be between 1 and 1000".to_string(),
            ));
        }
        Ok(Self {
            seed: cli.seed.unwrap_or_else(rand::random),
            startup_windows: cli.windows,
            poll_interval: Duration::from_millis(cli.poll_ms),
            log_level: cli.log_level,
        })
    }
}
