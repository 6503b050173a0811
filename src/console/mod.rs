pub mod state;

use crate::constants::PROMPT;
use crate::router::{DispatchError, Dispatcher, Sender};
use crossterm::event::KeyCode;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use state::ConsoleState;

pub trait ConsoleStateAccess {
    fn console_state(&self) -> &ConsoleState;
    fn console_state_mut(&mut self) -> &mut ConsoleState;
}

/// The interactive command line: feeds keystrokes into the console state and
/// lines into the dispatcher, and turns dispatch outcomes into output log
/// entries.
pub struct Console<S> {
    dispatcher: Dispatcher<S>,
    matcher: SkimMatcherV2,
}

impl<S> Console<S>
where
    S: ConsoleStateAccess,
{
    pub fn new(dispatcher: Dispatcher<S>) -> Self {
        Self {
            dispatcher,
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }

    /// Plain editing keys. Execute, completion and history navigation are
    /// routed separately because their bindings are configurable.
    pub fn handle_key(&self, key: KeyCode, app_state: &mut S) {
        let console = app_state.console_state_mut();
        match key {
            KeyCode::Left => console.move_cursor_left(),
            KeyCode::Right => console.move_cursor_right(),
            KeyCode::Home => console.move_cursor_start(),
            KeyCode::End => console.move_cursor_end(),
            KeyCode::Backspace => console.backspace(),
            KeyCode::Delete => console.delete(),
            KeyCode::Char(c) => console.insert(c),
            _ => {}
        }
    }

    /// Executes the current input line. Returns whether anything ran.
    pub fn execute(&self, app_state: &mut S, sender: &dyn Sender) -> bool {
        let line = app_state.console_state().input_buffer.clone();
        if line.trim().is_empty() {
            return false;
        }

        let console = app_state.console_state_mut();
        console.add_to_history();
        console.push_output(format!("{}{}", PROMPT, line), false);
        console.clear_input();

        match self.dispatcher.try_execute(&line, sender, app_state) {
            Ok(result) => {
                let is_error = !result.is_success();
                app_state
                    .console_state_mut()
                    .push_output(result.message(), is_error);
            }
            Err(DispatchError::UnknownCommand(name)) => {
                let mut message = DispatchError::UnknownCommand(name.clone()).to_string();
                if let Some(suggestion) = self.closest_command(&name) {
                    message.push_str(&format!(" (did you mean '{}'?)", suggestion));
                }
                app_state.console_state_mut().push_output(message, true);
            }
            Err(error) => {
                app_state
                    .console_state_mut()
                    .push_output(error.to_string(), true);
            }
        }
        true
    }

    /// Tab completion: one candidate fills in directly, several extend to
    /// their common prefix and show as suggestions.
    pub fn complete(&self, app_state: &mut S, sender: &dyn Sender) {
        let line = app_state.console_state().input_buffer.clone();
        let candidates = self.dispatcher.complete(&line, sender);
        let partial = line.rsplit(char::is_whitespace).next().unwrap_or("");

        let console = app_state.console_state_mut();
        console.move_cursor_end();
        match candidates.len() {
            0 => console.suggestions.clear(),
            1 => {
                console.replace_last_token(&candidates[0], true);
                console.suggestions.clear();
            }
            _ => {
                let prefix = common_prefix(&candidates);
                if prefix.len() > partial.len() {
                    console.replace_last_token(&prefix, false);
                }
                console.suggestions = candidates;
            }
        }
    }

    /// Best fuzzy match among registered names, for "did you mean".
    fn closest_command(&self, input: &str) -> Option<String> {
        let mut best: Option<(i64, &str)> = None;
        for name in self.dispatcher.registry().names() {
            if let Some(score) = self.matcher.fuzzy_match(name, input) {
                if best.map_or(true, |(top, _)| score > top) {
                    best = Some((score, name));
                }
            }
        }
        best.map(|(_, name)| name.to_string())
    }
}

// Case-insensitive common prefix, spelled with the first candidate's casing.
fn common_prefix(candidates: &[String]) -> String {
    let mut prefix = candidates[0].clone();
    for candidate in &candidates[1..] {
        let common = prefix
            .chars()
            .zip(candidate.chars())
            .take_while(|(a, b)| a.eq_ignore_ascii_case(b))
            .map(|(a, _)| a.len_utf8())
            .sum::<usize>();
        prefix.truncate(common);
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::context::test_support::TestSender;
    use crate::router::{CommandBuilder, CommandRegistry, CommandResult};

    // The state that wraps console state and is used in the top-level
    // ratatui application
    struct TestAppState {
        console_state: ConsoleState,
        greeted: Vec<String>,
    }

    impl TestAppState {
        fn new() -> Self {
            Self {
                console_state: ConsoleState::new(),
                greeted: Vec::new(),
            }
        }
    }

    impl ConsoleStateAccess for TestAppState {
        fn console_state(&self) -> &ConsoleState {
            &self.console_state
        }

        fn console_state_mut(&mut self) -> &mut ConsoleState {
            &mut self.console_state
        }
    }

    fn console() -> Console<TestAppState> {
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandBuilder::new("greet", "Greets a person", |state: &mut TestAppState, _, args| {
                    let Some(name) = args.str("name") else {
                        return CommandResult::failure("missing argument: name");
                    };
                    state.greeted.push(name.to_string());
                    CommandResult::success(format!("Hello, {}!", name))
                })
                .pattern("{name}")
                .completer("name", |_, _| {
                    vec!["Alice".to_string(), "Alfred".to_string(), "Bob".to_string()]
                })
                .alias("hello")
                .build(),
            )
            .unwrap();
        registry
            .register(
                CommandBuilder::new("greet", "Greets the world", |_, _, _| {
                    CommandResult::success("Hello, world!")
                })
                .build(),
            )
            .unwrap();
        Console::new(Dispatcher::new(registry))
    }

    fn type_line(console: &Console<TestAppState>, state: &mut TestAppState, line: &str) {
        for c in line.chars() {
            console.handle_key(KeyCode::Char(c), state);
        }
    }

    #[test]
    fn test_execute_writes_echo_and_result_to_output() {
        let console = console();
        let mut state = TestAppState::new();

        type_line(&console, &mut state, "greet Alice");
        assert!(console.execute(&mut state, &TestSender::open()));

        assert_eq!(state.greeted, vec!["Alice".to_string()]);
        let output = &state.console_state.output;
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].text, "> greet Alice");
        assert_eq!(output[1].text, "Hello, Alice!");
        assert!(!output[1].is_error);
        assert!(state.console_state.input_buffer.is_empty());
        assert_eq!(state.console_state.history, vec!["greet Alice".to_string()]);
    }

    #[test]
    fn test_execute_via_alias() {
        let console = console();
        let mut state = TestAppState::new();

        type_line(&console, &mut state, "hello Bob");
        console.execute(&mut state, &TestSender::open());
        assert_eq!(state.greeted, vec!["Bob".to_string()]);
    }

    #[test]
    fn test_execute_empty_line_is_a_no_op() {
        let console = console();
        let mut state = TestAppState::new();
        assert!(!console.execute(&mut state, &TestSender::open()));
        assert!(state.console_state.output.is_empty());
    }

    #[test]
    fn test_unknown_command_gets_a_suggestion() {
        let console = console();
        let mut state = TestAppState::new();

        type_line(&console, &mut state, "gret Alice");
        console.execute(&mut state, &TestSender::open());

        let last = state.console_state.output.last().unwrap();
        assert!(last.is_error);
        assert_eq!(last.text, "unknown command 'gret' (did you mean 'greet'?)");
    }

    #[test]
    fn test_complete_single_candidate_fills_input() {
        let console = console();
        let mut state = TestAppState::new();

        type_line(&console, &mut state, "greet B");
        console.complete(&mut state, &TestSender::open());

        assert_eq!(state.console_state.input_buffer, "greet Bob ");
        assert!(state.console_state.suggestions.is_empty());
    }

    #[test]
    fn test_complete_many_candidates_extends_to_common_prefix() {
        let console = console();
        let mut state = TestAppState::new();

        type_line(&console, &mut state, "greet A");
        console.complete(&mut state, &TestSender::open());

        assert_eq!(state.console_state.input_buffer, "greet Al");
        assert_eq!(
            state.console_state.suggestions,
            vec!["Alice".to_string(), "Alfred".to_string()]
        );
    }

    #[test]
    fn test_complete_command_name_position() {
        let console = console();
        let mut state = TestAppState::new();

        type_line(&console, &mut state, "gr");
        console.complete(&mut state, &TestSender::open());
        assert_eq!(state.console_state.input_buffer, "greet ");
    }

    #[test]
    fn test_common_prefix() {
        let candidates = vec!["Alice".to_string(), "Alfred".to_string()];
        assert_eq!(common_prefix(&candidates), "Al");
        let exact = vec!["bbb".to_string()];
        assert_eq!(common_prefix(&exact), "bbb");
    }
}
