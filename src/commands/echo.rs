use crate::router::{ArgType, CommandBuilder, CommandDecl, CommandResult};
use crate::state::AppState;

pub fn create() -> Vec<CommandDecl<AppState>> {
    vec![
        CommandBuilder::new(
            "echo",
            "Echo one word back",
            |_state: &mut AppState, _, args| {
                let Some(text) = args.str("text") else {
                    return CommandResult::failure("missing argument: text");
                };
                CommandResult::success(text)
            },
        )
        .pattern("{text}")
        .build(),
        CommandBuilder::new(
            "echo",
            "Echo one word back, repeated",
            |_state: &mut AppState, _, args| {
                let (Some(text), Some(times)) = (args.str("text"), args.int("times")) else {
                    return CommandResult::failure("missing arguments");
                };
                if !(1..=20).contains(&times) {
                    return CommandResult::failure("times must be between 1 and 20");
                }
                let repeated = vec![text; times as usize].join(" ");
                CommandResult::success(repeated)
            },
        )
        .pattern("{text} {times}")
        .arg("times", ArgType::Int)
        .build(),
    ]
}
