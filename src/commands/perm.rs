use crate::router::{CommandBuilder, CommandDecl, CommandResult};
use crate::state::AppState;

// Nodes the built-in commands actually check; the completer offers these,
// but grant/revoke accept any node.
const KNOWN_NODES: &[&str] = &[super::sum::PERMISSION];

fn known_nodes() -> Vec<String> {
    KNOWN_NODES.iter().map(|n| n.to_string()).collect()
}

pub fn create() -> Vec<CommandDecl<AppState>> {
    vec![
        CommandBuilder::new(
            "perm",
            "List the console's permissions",
            |state: &mut AppState, _, _| {
                let mut lines = vec![format!(
                    "administrator: {}",
                    state.permissions.administrator
                )];
                let granted: Vec<&str> = state.permissions.granted().collect();
                if granted.is_empty() {
                    lines.push("granted: (none)".to_string());
                } else {
                    lines.push(format!("granted: {}", granted.join(", ")));
                }
                CommandResult::success(lines.join("\n"))
            },
        )
        .pattern("list")
        .build(),
        CommandBuilder::new(
            "perm",
            "Grant a permission node to the console",
            |state: &mut AppState, _, args| {
                let Some(node) = args.str("node") else {
                    return CommandResult::failure("missing argument: node");
                };
                if state.permissions.grant(node) {
                    CommandResult::success(format!("granted '{}'", node))
                } else {
                    CommandResult::failure(format!("'{}' is already granted", node))
                }
            },
        )
        .pattern("grant {node}")
        .completer("node", |_, _| known_nodes())
        .build(),
        CommandBuilder::new(
            "perm",
            "Revoke a permission node from the console",
            |state: &mut AppState, _, args| {
                let Some(node) = args.str("node") else {
                    return CommandResult::failure("missing argument: node");
                };
                if state.permissions.revoke(node) {
                    CommandResult::success(format!("revoked '{}'", node))
                } else {
                    CommandResult::failure(format!("'{}' is not granted", node))
                }
            },
        )
        .pattern("revoke {node}")
        .completer("node", |_, _| known_nodes())
        .build(),
    ]
}
