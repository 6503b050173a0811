pub const PROMPT: &str = "> ";
pub const MAX_OUTPUT_LINES: usize = 500;
pub const MAX_HISTORY_LINES: usize = 200;
