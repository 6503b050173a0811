use crate::router::{ArgType, CommandBuilder, CommandDecl, CommandResult};
use crate::state::AppState;

pub const PERMISSION: &str = "console.math";

pub fn create() -> Vec<CommandDecl<AppState>> {
    vec![
        CommandBuilder::new(
            "sum",
            "Add two integers",
            |_state: &mut AppState, _, args| {
                let (Some(a), Some(b)) = (args.int("a"), args.int("b")) else {
                    return CommandResult::failure("missing arguments");
                };
                CommandResult::success(format!("sum: {}", a + b))
            },
        )
        .pattern("{a} {b}")
        .arg("a", ArgType::Int)
        .arg("b", ArgType::Int)
        .permission(PERMISSION)
        .build(),
        CommandBuilder::new(
            "sum",
            "Add three integers",
            |_state: &mut AppState, _, args| {
                let (Some(a), Some(b), Some(c)) = (args.int("a"), args.int("b"), args.int("c"))
                else {
                    return CommandResult::failure("missing arguments");
                };
                CommandResult::success(format!("sum: {}", a + b + c))
            },
        )
        .pattern("{a} {b} {c}")
        .arg("a", ArgType::Int)
        .arg("b", ArgType::Int)
        .arg("c", ArgType::Int)
        .permission(PERMISSION)
        .build(),
    ]
}
