use crate::router::{CommandBuilder, CommandDecl, CommandResult};
use crate::state::AppState;

pub fn create() -> Vec<CommandDecl<AppState>> {
    vec![
        CommandBuilder::new(
            "help",
            "Show the help overlay",
            |state: &mut AppState, _, _| {
                state.show_help = true;
                state.help_scroll = 0;
                CommandResult::success("help (Esc to close)")
            },
        )
        .alias("h")
        .build(),
        CommandBuilder::new(
            "help",
            "Show the forms of one command",
            |state: &mut AppState, _, args| {
                let Some(command) = args.str("command") else {
                    return CommandResult::failure("missing argument: command");
                };
                let wanted = command.to_ascii_lowercase();
                let forms: Vec<String> = state
                    .help_entries
                    .iter()
                    .filter(|entry| {
                        let name = entry.usage.split_whitespace().next().unwrap_or("");
                        name.eq_ignore_ascii_case(&wanted)
                    })
                    .map(|entry| format!("{:<24} {}", entry.usage, entry.description))
                    .collect();
                if forms.is_empty() {
                    return CommandResult::failure(format!("unknown command '{}'", command));
                }
                CommandResult::success(forms.join("\n"))
            },
        )
        .pattern("{command}")
        .build(),
    ]
}
