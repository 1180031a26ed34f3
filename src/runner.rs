use std::time::Duration;

use crossterm::event::{Event, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;

use crate::actions::Action;
use crate::constants::STATUS_BAR_HEIGHT;
use crate::desktop::Desktop;
use crate::drivers::InputDriver;
use crate::error::DeskError;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::keybindings::KeyBindings;
use crate::log_buffer::LogHandle;
use crate::status_bar::StatusBar;
use crate::ui::UiFrame;
use crate::view::render_desktop;

const STATUS_HINTS: [Action; 5] = [
    Action::NewWindow,
    Action::MinimizeFocused,
    Action::MaximizeFocused,
    Action::CloseFocused,
    Action::Quit,
];

/// Split the terminal into the desktop and the status bar below it.
pub fn split_area(area: Rect) -> (Rect, Rect) {
    let bar_height = STATUS_BAR_HEIGHT.min(area.height);
    let desktop = Rect {
        height: area.height - bar_height,
        ..area
    };
    let bar = Rect {
        y: area.y + desktop.height,
        height: bar_height,
        ..area
    };
    (desktop, bar)
}

/// Host shell around a `Desktop`: key bindings, the status bar and the
/// quit flag.
#[derive(Debug)]
pub struct DeskApp {
    desktop: Desktop,
    bindings: KeyBindings,
    status_bar: StatusBar,
    log: Option<LogHandle>,
    quit: bool,
}

impl DeskApp {
    pub fn new(desktop: Desktop) -> Self {
        Self {
            desktop,
            bindings: KeyBindings::default(),
            status_bar: StatusBar::new(),
            log: None,
            quit: false,
        }
    }

    /// Show the newest line of `log` in the status bar.
    pub fn with_log(mut self, log: LogHandle) -> Self {
        self.log = Some(log);
        self
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn perform(&mut self, action: Action) -> Result<(), DeskError> {
        tracing::trace!(%action, "perform");
        let focused = self.desktop.focused().cloned();
        match action {
            Action::Quit => self.quit = true,
            Action::NewWindow => {
                self.desktop.create_window()?;
            }
            Action::MinimizeFocused => {
                if let Some(id) = focused {
                    self.desktop.toggle_minimize(&id)?;
                }
            }
            Action::MaximizeFocused => {
                if let Some(id) = focused {
                    self.desktop.toggle_maximize(&id)?;
                }
            }
            Action::CloseFocused => {
                if let Some(id) = focused {
                    self.desktop.close(&id)?;
                }
            }
            Action::CycleFocus => self.desktop.cycle_focus()?,
            Action::CancelGesture => {
                self.desktop.cancel_gesture();
            }
        }
        Ok(())
    }

    /// Route one terminal event. Returns whether anything changed.
    pub fn handle_event(&mut self, event: &Event) -> Result<bool, DeskError> {
        match event {
            Event::Mouse(mouse) => {
                if self.status_bar.hit_test_new_window(event) {
                    self.perform(Action::NewWindow)?;
                    return Ok(true);
                }
                self.desktop.handle_mouse(mouse)
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match self.bindings.action_for_key(key) {
                    Some(action) => {
                        self.perform(action)?;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            Event::Resize(width, height) => {
                let (desktop, _) = split_area(Rect::new(0, 0, *width, *height));
                Ok(self.desktop.set_viewport(desktop))
            }
            _ => Ok(false),
        }
    }

    /// Lay out and paint one frame.
    pub fn draw(&mut self, frame: &mut UiFrame<'_>) {
        let (desktop_area, bar_area) = split_area(frame.area());
        self.desktop.set_viewport(desktop_area);
        let decorator = self.desktop.decorator();
        let views = self.desktop.views();
        {
            let mut desktop_frame = frame.clipped(desktop_area);
            render_desktop(&mut desktop_frame, decorator.as_ref(), &views);
        }
        let hints: Vec<String> = STATUS_HINTS
            .iter()
            .filter_map(|action| self.bindings.hint(*action))
            .collect();
        let log_line = self.log.as_ref().and_then(LogHandle::last_line);
        self.status_bar.render(frame, bar_area, &hints, log_line.as_deref());
    }
}

/// Drive `app` until it quits or the driver fails.
pub fn run_desktop<B, D>(
    terminal: &mut Terminal<B>,
    driver: D,
    app: &mut DeskApp,
    poll_interval: Duration,
) -> Result<(), DeskError>
where
    B: Backend,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    event_loop.run(|_, event| {
        match event {
            Some(evt) => {
                app.handle_event(&evt)?;
            }
            None => {
                terminal
                    .draw(|frame| {
                        let mut ui = UiFrame::new(frame);
                        app.draw(&mut ui);
                    })
                    .map_err(|err| DeskError::Render(err.to_string()))?;
            }
        }
        Ok(if app.should_quit() {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::buffer::Buffer;

    fn app() -> DeskApp {
        DeskApp::new(Desktop::new(7).with_viewport(Rect::new(0, 0, 80, 23)))
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn split_area_reserves_bottom_row() {
        let (desktop, bar) = split_area(Rect::new(0, 0, 80, 24));
        assert_eq!(desktop, Rect::new(0, 0, 80, 23));
        assert_eq!(bar, Rect::new(0, 23, 80, 1));
        let (desktop, bar) = split_area(Rect::new(0, 0, 10, 0));
        assert_eq!(desktop.height, 0);
        assert_eq!(bar.height, 0);
    }

    #[test]
    fn keys_drive_focused_window() {
        let mut app = app();
        assert!(app.handle_event(&key('n')).unwrap());
        let id = app.desktop().focused().cloned().unwrap();
        app.handle_event(&key('x')).unwrap();
        assert!(app.desktop().window(&id).unwrap().is_maximized());
        app.handle_event(&key('m')).unwrap();
        assert!(app.desktop().window(&id).unwrap().is_minimized());
        app.handle_event(&key('w')).unwrap();
        assert!(app.desktop().is_empty());
        assert!(!app.handle_event(&key('z')).unwrap());
        app.handle_event(&key('q')).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn tab_raises_the_bottom_window() {
        let mut app = app();
        app.handle_event(&key('n')).unwrap();
        app.handle_event(&key('n')).unwrap();
        let stack = app.desktop().stacking_order();
        let tab = Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        assert!(app.handle_event(&tab).unwrap());
        assert_eq!(app.desktop().focused(), Some(&stack[0]));
        assert!(app.handle_event(&tab).unwrap());
        assert_eq!(app.desktop().focused(), Some(&stack[1]));
    }

    #[test]
    fn esc_cancels_a_held_drag() {
        let mut app = app();
        app.handle_event(&key('n')).unwrap();
        let id = app.desktop().focused().cloned().unwrap();
        let g = app.desktop().window(&id).unwrap().geometry();
        let press = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: (g.left + 2) as u16,
            row: (g.top + 1) as u16,
            modifiers: KeyModifiers::NONE,
        });
        app.handle_event(&press).unwrap();
        assert!(app.desktop().active_gesture().is_some());

        let esc = Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.handle_event(&esc).unwrap());
        assert!(app.desktop().active_gesture().is_none());
        // motion after the cancel leaves the window where it was
        let moved = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert!(!app.handle_event(&moved).unwrap());
        assert_eq!(app.desktop().window(&id).unwrap().geometry(), g);
    }

    #[test]
    fn log_line_shows_at_eighty_columns() {
        let log = LogHandle::new(4);
        log.push("opened window window1");
        let mut app = app().with_log(log);
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        {
            let mut frame = UiFrame::from_parts(buf.area, &mut buf);
            app.draw(&mut frame);
        }
        let bar: String = (0..80).map(|x| buf[(x, 23)].symbol().to_string()).collect();
        assert!(bar.starts_with("[+ New window]  n new  m min  x max  w close  q quit"));
        assert!(bar.ends_with("opened window window1"), "status bar: {bar:?}");
    }

    #[test]
    fn focused_actions_on_empty_desktop_are_noops() {
        let mut app = app();
        app.perform(Action::MinimizeFocused).unwrap();
        app.perform(Action::CloseFocused).unwrap();
        app.perform(Action::CycleFocus).unwrap();
        assert!(app.desktop().is_empty());
    }

    #[test]
    fn status_button_creates_window_after_draw() {
        let mut app = app();
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        {
            let mut frame = UiFrame::from_parts(buf.area, &mut buf);
            app.draw(&mut frame);
        }
        let press = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 23,
            modifiers: KeyModifiers::NONE,
        });
        assert!(app.handle_event(&press).unwrap());
        assert_eq!(app.desktop().len(), 1);
    }

    #[test]
    fn resize_event_updates_viewport() {
        let mut app = app();
        assert!(app.handle_event(&Event::Resize(100, 30)).unwrap());
        assert_eq!(app.desktop().viewport(), Rect::new(0, 0, 100, 29));
    }
}
