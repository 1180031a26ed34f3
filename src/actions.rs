use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NewWindow,
    // Focused-window controls
    MinimizeFocused,
    MaximizeFocused,
    CloseFocused,
    CycleFocus,
    // Gestures
    CancelGesture,
}

impl Action {
    /// One-word label for the status bar hints.
    pub fn short_label(&self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::NewWindow => "new",
            Action::MinimizeFocused => "min",
            Action::MaximizeFocused => "max",
            Action::CloseFocused => "close",
            Action::CycleFocus => "next",
            Action::CancelGesture => "cancel",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::NewWindow => "New window",
            Action::MinimizeFocused => "Minimize / unminimize",
            Action::MaximizeFocused => "Maximize / restore",
            Action::CloseFocused => "Close window",
            Action::CycleFocus => "Raise next window",
            Action::CancelGesture => "Cancel drag / resize",
        };
        write!(f, "{}", s)
    }
}
