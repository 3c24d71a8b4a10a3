//! Enumerations for TUI state management.

/// Input mode of the task list screen.
///
/// `Composing` and `Editing` only return to `Browsing` by submitting with
/// Enter; there is no cancel key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Moving around the list; single-letter commands are active.
    #[default]
    Browsing,
    /// Typing a new task.
    Composing,
    /// Rewriting the description of the selected task.
    Editing,
}

impl Mode {
    /// Whether keys go to the text editor rather than the list.
    pub fn is_typing(self) -> bool {
        matches!(self, Mode::Composing | Mode::Editing)
    }

    /// Prompt shown above the text editor.
    pub fn prompt(self) -> &'static str {
        match self {
            Mode::Browsing => "",
            Mode::Composing => "Enter new task:",
            Mode::Editing => "Edit task:",
        }
    }
}

/// What the event loop should do after an event has been handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}
