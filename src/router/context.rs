/// The identity and capabilities of whoever submitted a command.
///
/// The core only ever asks three questions of a sender; everything else
/// (display, sessions, remote identities) lives outside the router.
pub trait Sender {
    fn name(&self) -> &str;

    /// Administrators bypass permission checks entirely.
    fn is_administrator(&self) -> bool {
        false
    }

    fn has_permission(&self, node: &str) -> bool;
}

/// Per-invocation read-only context handed to matching, binding, completion
/// and the handler itself. Never mutated by the router.
pub struct InvocationContext<'a> {
    sender: &'a dyn Sender,
    tokens: &'a [&'a str],
}

impl<'a> InvocationContext<'a> {
    pub fn new(sender: &'a dyn Sender, tokens: &'a [&'a str]) -> Self {
        Self { sender, tokens }
    }

    pub fn sender(&self) -> &dyn Sender {
        self.sender
    }

    /// The argument tokens of the current invocation, command name stripped.
    pub fn tokens(&self) -> &[&str] {
        self.tokens
    }
}

/// Terminal value of every dispatch: a success/failure flag plus a message
/// for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    success: bool,
    message: String,
}

impl CommandResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
