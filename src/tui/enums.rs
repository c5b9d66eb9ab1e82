//! Enumerations for TUI state management.

/// Pane that receives keyboard input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Tasks,
    NewTask,
    Search,
    /// Modal list picker for choosing which task list to load.
    Picker,
}

impl Focus {
    /// Next pane in Tab order. The picker is modal and is never reached by Tab.
    pub fn next(self) -> Self {
        match self {
            Focus::Tasks => Focus::NewTask,
            Focus::NewTask => Focus::Search,
            Focus::Search => Focus::Tasks,
            Focus::Picker => Focus::Picker,
        }
    }
}
