use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::InputDriver;
use super::keyboard::KeyboardNormalizer;

pub struct ConsoleInputDriver {
    normalizer: KeyboardNormalizer,
    /// Event already taken off the terminal by `poll`.
    ready: Option<Event>,
}

impl Default for ConsoleInputDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self {
            normalizer: KeyboardNormalizer::new(),
            ready: None,
        }
    }

    /// Pull from `next` until an event survives normalization or the source
    /// runs dry.
    fn poll_from<F>(&mut self, mut next: F) -> io::Result<bool>
    where
        F: FnMut() -> io::Result<Option<Event>>,
    {
        if self.ready.is_some() {
            return Ok(true);
        }
        while let Some(evt) = next()? {
            if let Some(evt) = self.normalizer.normalize(evt) {
                self.ready = Some(evt);
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl InputDriver for ConsoleInputDriver {
    /// Only events that survive normalization count as input, so a lone key
    /// release never makes `read` block.
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        self.poll_from(|| {
            if crossterm::event::poll(timeout)? {
                crossterm::event::read().map(Some)
            } else {
                Ok(None)
            }
        })
    }

    fn read(&mut self) -> io::Result<Event> {
        if let Some(evt) = self.ready.take() {
            return Ok(evt);
        }
        loop {
            if let Some(evt) = self.normalizer.normalize(crossterm::event::read()?) {
                return Ok(evt);
            }
        }
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

/// Owns the real terminal: alternate screen, raw mode and mouse capture.
/// Leaving is idempotent and also runs on drop.
pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            entered: false,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    pub fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture
        )?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
