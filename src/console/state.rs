use crate::constants::{MAX_HISTORY_LINES, MAX_OUTPUT_LINES};

/// One line in the console output log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub is_error: bool,
}

#[derive(Default)]
pub struct ConsoleState {
    pub input_buffer: String,
    pub cursor_position: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
    pub suggestions: Vec<String>,
    pub output: Vec<OutputLine>,
    pub output_scroll: usize,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, c: char) {
        self.input_buffer.insert(self.cursor_position, c);
        self.cursor_position += 1;
        self.suggestions.clear();
    }

    pub fn delete(&mut self) {
        if self.cursor_position < self.input_buffer.len() {
            self.input_buffer.remove(self.cursor_position);
            self.suggestions.clear();
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.input_buffer.remove(self.cursor_position);
            self.suggestions.clear();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.len();
    }

    pub fn move_cursor_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
        self.history_index = None;
        self.suggestions.clear();
    }

    pub fn add_to_history(&mut self) {
        if !self.input_buffer.is_empty() {
            self.history.push(self.input_buffer.clone());
            self.history_index = None;
            if self.history.len() > MAX_HISTORY_LINES {
                self.history.remove(0);
            }
        }
    }

    pub fn previous_history(&mut self) {
        if let Some(index) = self.history_index {
            if index > 0 {
                self.history_index = Some(index - 1);
                self.input_buffer = self.history[index - 1].clone();
                self.cursor_position = self.input_buffer.len();
            }
        } else if !self.history.is_empty() {
            self.history_index = Some(self.history.len() - 1);
            self.input_buffer = self.history[self.history.len() - 1].clone();
            self.cursor_position = self.input_buffer.len();
        }
    }

    pub fn next_history(&mut self) {
        if let Some(index) = self.history_index {
            if index < self.history.len() - 1 {
                self.history_index = Some(index + 1);
                self.input_buffer = self.history[index + 1].clone();
                self.cursor_position = self.input_buffer.len();
            } else {
                self.history_index = None;
                self.input_buffer.clear();
                self.cursor_position = 0;
            }
        } else if !self.history.is_empty() {
            self.history_index = Some(0);
            self.input_buffer = self.history[0].clone();
            self.cursor_position = self.input_buffer.len();
        }
    }

    pub fn push_output(&mut self, text: impl Into<String>, is_error: bool) {
        for line in text.into().lines() {
            self.output.push(OutputLine {
                text: line.to_string(),
                is_error,
            });
        }
        if self.output.len() > MAX_OUTPUT_LINES {
            let excess = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(..excess);
        }
        // New output snaps the view back to the bottom.
        self.output_scroll = 0;
    }

    pub fn scroll_output_up(&mut self, lines: usize) {
        let max = self.output.len().saturating_sub(1);
        self.output_scroll = (self.output_scroll + lines).min(max);
    }

    pub fn scroll_output_down(&mut self, lines: usize) {
        self.output_scroll = self.output_scroll.saturating_sub(lines);
    }

    /// Replaces the token being completed with `completion`. If the buffer
    /// ends in whitespace (or is empty) the completion starts a new token.
    pub fn replace_last_token(&mut self, completion: &str, append_space: bool) {
        let start = if self.input_buffer.is_empty()
            || self.input_buffer.ends_with(char::is_whitespace)
        {
            self.input_buffer.len()
        } else {
            match self.input_buffer.rfind(char::is_whitespace) {
                Some(i) => {
                    let ws = self.input_buffer[i..].chars().next().map_or(1, char::len_utf8);
                    i + ws
                }
                None => 0,
            }
        };
        self.input_buffer.truncate(start);
        self.input_buffer.push_str(completion);
        if append_space {
            self.input_buffer.push(' ');
        }
        self.cursor_position = self.input_buffer.len();
    }
}
