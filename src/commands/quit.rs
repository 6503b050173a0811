use crate::router::{CommandBuilder, CommandDecl, CommandResult};
use crate::state::AppState;

pub fn create() -> Vec<CommandDecl<AppState>> {
    vec![CommandBuilder::new(
        "quit",
        "Quit quarterdeck",
        |state: &mut AppState, _, _| {
            state.exit = true;
            CommandResult::success("Exiting quarterdeck...")
        },
    )
    .alias("q")
    .build()]
}
