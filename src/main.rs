use clap::Parser;
use ratatui::layout::Rect;

use term_desk::DeskError;
use term_desk::config::{Cli, DesktopConfig};
use term_desk::desktop::Desktop;
use term_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_desk::log_buffer::LogHandle;
use term_desk::runner::{DeskApp, run_desktop, split_area};
use term_desk::tracing_sub;

fn main() -> Result<(), DeskError> {
    let cli = Cli::parse();
    let config = DesktopConfig::try_from(&cli)?;

    let log = LogHandle::default();
    tracing_sub::init(config.log_level, Some(log.clone()));
    tracing::info!(
        seed = config.seed,
        windows = config.startup_windows,
        "starting desktop"
    );

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let size = output.terminal_mut().size()?;
    let (viewport, _) = split_area(Rect::new(0, 0, size.width, size.height));

    let mut desktop = Desktop::new(config.seed).with_viewport(viewport);
    for _ in 0..config.startup_windows {
        desktop.create_window()?;
    }
    let mut app = DeskApp::new(desktop).with_log(log);

    let result = run_desktop(
        output.terminal_mut(),
        ConsoleInputDriver::new(),
        &mut app,
        config.poll_interval,
    );
    let restored = output.exit();
    result?;
    restored?;
    Ok(())
}
