use super::bind::BindingError;
use super::complete::{complete_command_names, complete_entry};
use super::context::{CommandResult, InvocationContext, Sender};
use super::registry::{CommandRegistry, MatchPolicy};
use thiserror::Error;
use tracing::debug;

/// Why a dispatch stopped before the handler ran. Every variant is
/// per-invocation and recoverable; [`Dispatcher::execute`] folds them into
/// failure results so nothing propagates past the boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no command given")]
    EmptyInput,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("no matching form of '{0}'")]
    NoMatch(String),
    #[error("not authorized to run '{0}'")]
    Unauthorized(String),
    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// Resolves one line of input to a handler invocation:
/// tokenize, match, authorize, bind, invoke.
///
/// Stateless apart from the frozen registry and policy it was built with;
/// safe to call reentrantly.
pub struct Dispatcher<S> {
    registry: CommandRegistry<S>,
    policy: MatchPolicy,
    max_suggestions: usize,
}

impl<S> Dispatcher<S> {
    pub fn new(registry: CommandRegistry<S>) -> Self {
        Self {
            registry,
            policy: MatchPolicy::default(),
            max_suggestions: 32,
        }
    }

    pub fn policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_suggestions(mut self, limit: usize) -> Self {
        self.max_suggestions = limit;
        self
    }

    pub fn registry(&self) -> &CommandRegistry<S> {
        &self.registry
    }

    /// Runs one line of input, reporting every outcome as a
    /// [`CommandResult`].
    pub fn execute(&self, line: &str, sender: &dyn Sender, state: &mut S) -> CommandResult {
        match self.try_execute(line, sender, state) {
            Ok(result) => result,
            Err(error) => CommandResult::failure(error.to_string()),
        }
    }

    /// Like [`Dispatcher::execute`], but keeps the dispatch stage visible to
    /// callers that present errors differently.
    pub fn try_execute(
        &self,
        line: &str,
        sender: &dyn Sender,
        state: &mut S,
    ) -> Result<CommandResult, DispatchError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = tokens.split_first() else {
            return Err(DispatchError::EmptyInput);
        };
        let entry = self
            .registry
            .resolve(name, self.policy)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;
        let decl = entry
            .find_match(args, self.policy)
            .ok_or_else(|| DispatchError::NoMatch(entry.name().to_string()))?;

        // Strictly after matching: an unauthorized caller of a valid form
        // learns it was denied, not that the form does not exist.
        if !decl.authorized(sender) {
            debug!(
                command = entry.name(),
                sender = sender.name(),
                "permission denied"
            );
            return Err(DispatchError::Unauthorized(entry.name().to_string()));
        }

        let ctx = InvocationContext::new(sender, args);
        let bindings = decl.bind(args, &ctx)?;
        debug!(
            command = entry.name(),
            pattern = decl.pattern().text(),
            "dispatching"
        );
        Ok(decl.invoke(state, &ctx, &bindings))
    }

    /// Completes the token currently being typed. A line ending in
    /// whitespace (or an empty line) is completing a fresh, empty token.
    pub fn complete(&self, line: &str, sender: &dyn Sender) -> Vec<String> {
        let mut tokens: Vec<&str> = line.split_whitespace().collect();
        if line.is_empty() || line.ends_with(char::is_whitespace) {
            tokens.push("");
        }
        if tokens.len() == 1 {
            return complete_command_names(&self.registry, tokens[0], self.max_suggestions);
        }
        let Some(entry) = self.registry.resolve(tokens[0], self.policy) else {
            return Vec::new();
        };
        let args = &tokens[1..];
        let ctx = InvocationContext::new(sender, args);
        complete_entry(entry, args, &ctx, self.policy, self.max_suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::bind::ArgType;
    use crate::router::builder::CommandBuilder;
    use crate::router::context::test_support::TestSender;

    #[derive(Default)]
    struct State {
        reloads: Vec<String>,
    }

    fn dispatcher() -> Dispatcher<State> {
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandBuilder::new("reload", "Reload everything", |state: &mut State, _, _| {
                    state.reloads.push("all".to_string());
                    CommandResult::success("reloaded")
                })
                .build(),
            )
            .unwrap();
        registry
            .register(
                CommandBuilder::new(
                    "reload",
                    "Reload one module",
                    |state: &mut State, _, args| {
                        let Some(id) = args.str("id") else {
                            return CommandResult::failure("missing argument: id");
                        };
                        state.reloads.push(id.to_string());
                        CommandResult::success(format!("reloaded: {}", id))
                    },
                )
                .pattern("{id}")
                .completer("id", |_, _| vec!["aaa".to_string(), "bbb".to_string()])
                .build(),
            )
            .unwrap();
        registry
            .register(
                CommandBuilder::new("sum", "Add two integers", |_, _, args| {
                    match (args.int("a"), args.int("b")) {
                        (Some(a), Some(b)) => CommandResult::success(format!("sum: {}", a + b)),
                        _ => CommandResult::failure("missing arguments"),
                    }
                })
                .pattern("{a} {b}")
                .arg("a", ArgType::Int)
                .arg("b", ArgType::Int)
                .permission("console.math")
                .build(),
            )
            .unwrap();
        registry
            .register(
                CommandBuilder::new("fail", "Always fails", |_, _, _| {
                    CommandResult::failure("handler says no")
                })
                .build(),
            )
            .unwrap();
        Dispatcher::new(registry)
    }

    #[test]
    fn test_bare_form_matches_empty_token_sequence() {
        let dispatcher = dispatcher();
        let sender = TestSender::open();
        let mut state = State::default();

        let result = dispatcher.execute("reload", &sender, &mut state);
        assert!(result.is_success());
        assert_eq!(result.message(), "reloaded");
        assert_eq!(state.reloads, vec!["all".to_string()]);
    }

    #[test]
    fn test_placeholder_form_binds_token() {
        let dispatcher = dispatcher();
        let sender = TestSender::open();
        let mut state = State::default();

        let result = dispatcher.execute("reload bbb", &sender, &mut state);
        assert!(result.is_success());
        assert_eq!(result.message(), "reloaded: bbb");
        assert_eq!(state.reloads, vec!["bbb".to_string()]);
    }

    #[test]
    fn test_unknown_command_distinct_from_no_match() {
        let dispatcher = dispatcher();
        let sender = TestSender::open();
        let mut state = State::default();

        let unknown = dispatcher.try_execute("restart", &sender, &mut state);
        assert_eq!(
            unknown.unwrap_err(),
            DispatchError::UnknownCommand("restart".to_string())
        );

        let no_match = dispatcher.try_execute("reload a b c", &sender, &mut state);
        assert_eq!(
            no_match.unwrap_err(),
            DispatchError::NoMatch("reload".to_string())
        );
    }

    #[test]
    fn test_unauthorized_is_not_no_match() {
        let dispatcher = dispatcher();
        let mut state = State::default();

        let denied = TestSender::open();
        let result = dispatcher.try_execute("sum 1 2", &denied, &mut state);
        assert_eq!(
            result.unwrap_err(),
            DispatchError::Unauthorized("sum".to_string())
        );

        let granted = TestSender::with(&["console.math"]);
        let result = dispatcher.execute("sum 1 2", &granted, &mut state);
        assert!(result.is_success());
        assert_eq!(result.message(), "sum: 3");

        let admin = TestSender::administrator();
        let result = dispatcher.execute("sum 20 22", &admin, &mut state);
        assert_eq!(result.message(), "sum: 42");
    }

    #[test]
    fn test_binding_failure_stops_invocation() {
        let dispatcher = dispatcher();
        let sender = TestSender::administrator();
        let mut state = State::default();

        let result = dispatcher.try_execute("sum 1 two", &sender, &mut state);
        match result.unwrap_err() {
            DispatchError::Binding(error) => {
                assert_eq!(
                    error.to_string(),
                    "argument 'b': 'two' is not an integer".to_string()
                );
            }
            other => panic!("expected a binding error, got {:?}", other),
        }
        assert!(state.reloads.is_empty());

        // The same line through execute() is a plain failure result.
        let result = dispatcher.execute("sum 1 two", &sender, &mut state);
        assert!(!result.is_success());
        assert_eq!(result.message(), "argument 'b': 'two' is not an integer");
    }

    #[test]
    fn test_handler_failure_passes_through_verbatim() {
        let dispatcher = dispatcher();
        let sender = TestSender::open();
        let mut state = State::default();

        let result = dispatcher.execute("fail", &sender, &mut state);
        assert!(!result.is_success());
        assert_eq!(result.message(), "handler says no");
    }

    #[test]
    fn test_empty_input() {
        let dispatcher = dispatcher();
        let sender = TestSender::open();
        let mut state = State::default();

        assert_eq!(
            dispatcher.try_execute("   ", &sender, &mut state),
            Err(DispatchError::EmptyInput)
        );
    }

    #[test]
    fn test_execute_is_deterministic() {
        let dispatcher = dispatcher();
        let sender = TestSender::open();
        let mut state = State::default();

        let first = dispatcher.execute("reload aaa", &sender, &mut state);
        let second = dispatcher.execute("reload aaa", &sender, &mut state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_complete_argument_position() {
        let dispatcher = dispatcher();
        let sender = TestSender::open();

        assert_eq!(
            dispatcher.complete("reload ", &sender),
            vec!["aaa", "bbb"]
        );
        assert_eq!(dispatcher.complete("reload b", &sender), vec!["bbb"]);
        assert_eq!(
            dispatcher.complete("reload xx", &sender),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_complete_command_name_position() {
        let dispatcher = dispatcher();
        let sender = TestSender::open();

        assert_eq!(dispatcher.complete("rel", &sender), vec!["reload"]);
        assert_eq!(
            dispatcher.complete("", &sender),
            vec!["reload", "sum", "fail"]
        );
        assert_eq!(
            dispatcher.complete("xyz", &sender),
            Vec::<String>::new()
        );
    }
}
