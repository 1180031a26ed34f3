use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Message pump for the desktop.
///
/// The handler is called with `None` once per turn, before waiting for
/// input, which is where the desktop redraws. Each burst of pending events
/// is then drained with `Some(event)` so fast pointer drags never queue up
/// behind frames.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F, E>(&mut self, mut handler: F) -> Result<(), E>
    where
        F: FnMut(&mut D, Option<Event>) -> Result<ControlFlow, E>,
        E: From<io::Error>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                return Ok(());
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct Scripted(VecDeque<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn drains_events_between_idle_ticks() {
        let driver = Scripted(VecDeque::from([key('a'), key('b'), key('q')]));
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(1));
        let mut seen = Vec::new();
        let result: io::Result<()> = event_loop.run(|_, event| {
            let Some(Event::Key(key)) = event else {
                seen.push('.');
                return Ok(ControlFlow::Continue);
            };
            let KeyCode::Char(c) = key.code else {
                return Ok(ControlFlow::Continue);
            };
            seen.push(c);
            Ok(if c == 'q' {
                ControlFlow::Quit
            } else {
                ControlFlow::Continue
            })
        });
        assert!(result.is_ok());
        assert_eq!(seen, vec!['.', 'a', 'b', 'q']);
    }

    #[test]
    fn idle_quit_stops_before_reading() {
        let driver = Scripted(VecDeque::from([key('a')]));
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(1));
        let result: io::Result<()> = event_loop.run(|_, _| Ok(ControlFlow::Quit));
        assert!(result.is_ok());
        assert_eq!(event_loop.driver().0.len(), 1);
    }
}
