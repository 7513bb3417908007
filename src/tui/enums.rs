//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Dashboard,
    TaskDetail,
    ResourceGuide,
    AddTask,
    Help,
}

/// Input mode for text entry fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    None,
    Text,
}
