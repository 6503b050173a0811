use crate::console::{state::ConsoleState, ConsoleStateAccess};
use crate::router::Sender;
use std::collections::BTreeSet;

/// What the console sender is currently allowed to do. Seeded from the
/// `[permissions]` config section; mutated at runtime by the `perm` command.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    pub administrator: bool,
    granted: BTreeSet<String>,
}

impl PermissionSet {
    pub fn new(administrator: bool, granted: impl IntoIterator<Item = String>) -> Self {
        Self {
            administrator,
            granted: granted.into_iter().collect(),
        }
    }

    pub fn has(&self, node: &str) -> bool {
        self.granted.contains(node)
    }

    /// Returns false if the node was already granted.
    pub fn grant(&mut self, node: &str) -> bool {
        self.granted.insert(node.to_string())
    }

    /// Returns false if the node was not granted.
    pub fn revoke(&mut self, node: &str) -> bool {
        self.granted.remove(node)
    }

    pub fn granted(&self) -> impl Iterator<Item = &str> {
        self.granted.iter().map(|n| n.as_str())
    }
}

/// Per-invocation snapshot of the local operator's permissions. Cloning the
/// set keeps the sender borrow-independent of the mutable app state handlers
/// receive.
pub struct ConsoleSender {
    permissions: PermissionSet,
}

impl ConsoleSender {
    pub fn snapshot(permissions: &PermissionSet) -> Self {
        Self {
            permissions: permissions.clone(),
        }
    }
}

impl Sender for ConsoleSender {
    fn name(&self) -> &str {
        "console"
    }

    fn is_administrator(&self) -> bool {
        self.permissions.administrator
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.has(node)
    }
}

/// One registered command form as shown by `help`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub usage: String,
    pub description: String,
}

#[derive(Default)]
pub struct AppState {
    /// Flag indicating whether the application should exit.
    pub exit: bool,

    /// Flag indicating that the help overlay is currently being displayed.
    pub show_help: bool,

    /// Current scroll position in the help overlay.
    pub help_scroll: usize,

    /// Live permissions of the console sender.
    pub permissions: PermissionSet,

    /// Usage/description pairs for every registered form, filled in once
    /// after registration so handlers and the help overlay can list them
    /// without holding a registry reference.
    pub help_entries: Vec<HelpEntry>,

    /// State of the console line. Accessed via ConsoleStateAccess, so it is
    /// not public.
    console_state: ConsoleState,
}

// Access console state in the overall app state via a trait implementation
impl ConsoleStateAccess for AppState {
    fn console_state(&self) -> &ConsoleState {
        &self.console_state
    }

    fn console_state_mut(&mut self) -> &mut ConsoleState {
        &mut self.console_state
    }
}

impl AppState {
    pub fn new(permissions: PermissionSet) -> Self {
        AppState {
            permissions,
            ..AppState::default()
        }
    }
}
