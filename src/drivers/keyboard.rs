use crossterm::event::{Event, KeyCode, KeyEventKind};

/// Drops key releases and repeats so each physical press reaches the
/// desktop once. Windows consoles report all three kinds; other platforms
/// only report releases when the enhancement flags are on.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(key) => {
                match key.kind {
                    KeyEventKind::Release => {
                        if key.code == KeyCode::Esc {
                            self.esc_down = false;
                        }
                        return None;
                    }
                    KeyEventKind::Repeat => return None,
                    KeyEventKind::Press => {}
                }
                // a held Esc would otherwise cancel every gesture started after it
                if key.code == KeyCode::Esc {
                    if self.esc_down && cfg!(windows) {
                        return None;
                    }
                    self.esc_down = true;
                } else {
                    self.esc_down = false;
                }
                Some(Event::Key(key))
            }
            other => Some(other),
        }
    }
}
