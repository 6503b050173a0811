use crossterm::event::KeyCode;

pub fn execute() -> KeyCode {
    KeyCode::Enter
}

pub fn complete() -> KeyCode {
    KeyCode::Tab
}

pub fn history_prev() -> KeyCode {
    KeyCode::Up
}

pub fn history_next() -> KeyCode {
    KeyCode::Down
}

pub fn scroll_up() -> KeyCode {
    KeyCode::PageUp
}

pub fn scroll_down() -> KeyCode {
    KeyCode::PageDown
}

pub fn quit() -> KeyCode {
    KeyCode::Esc
}
