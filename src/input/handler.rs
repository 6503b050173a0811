use crate::config::KeybindingsConfig;
use crossterm::event::KeyCode;

/// What a key press means in the current UI context. Bindings are
/// configurable, so the mapping happens here rather than in the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Execute,
    Complete,
    HistoryPrev,
    HistoryNext,
    ScrollUp,
    ScrollDown,
    Quit,
    CloseHelp,
    Edit(KeyCode),
}

pub fn map_key(key: KeyCode, binds: &KeybindingsConfig, help_open: bool) -> InputAction {
    if help_open {
        // The overlay swallows everything; scrolling keys scroll it, any
        // other key closes it.
        return match key {
            k if k == binds.scroll_up || k == KeyCode::Up => InputAction::ScrollUp,
            k if k == binds.scroll_down || k == KeyCode::Down => InputAction::ScrollDown,
            _ => InputAction::CloseHelp,
        };
    }
    match key {
        k if k == binds.execute => InputAction::Execute,
        k if k == binds.complete => InputAction::Complete,
        k if k == binds.history_prev => InputAction::HistoryPrev,
        k if k == binds.history_next => InputAction::HistoryNext,
        k if k == binds.scroll_up => InputAction::ScrollUp,
        k if k == binds.scroll_down => InputAction::ScrollDown,
        k if k == binds.quit => InputAction::Quit,
        other => InputAction::Edit(other),
    }
}
