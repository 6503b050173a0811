use crate::config;
use crate::router::{ArgType, CommandBuilder, CommandDecl, CommandResult};
use crate::state::AppState;

fn source_of(loaded: &config::AppConfig) -> String {
    match &loaded.config_path {
        Some(path) if path.exists() => format!("from {}", path.display()),
        _ => "(built-in defaults)".to_string(),
    }
}

pub fn create() -> Vec<CommandDecl<AppState>> {
    vec![
        CommandBuilder::new(
            "reload",
            "Reload the configuration file",
            |_state: &mut AppState, _, _| match config::reload_config() {
                Ok(loaded) => {
                    CommandResult::success(format!("configuration reloaded {}", source_of(&loaded)))
                }
                Err(error) => CommandResult::failure(error),
            },
        )
        .build(),
        CommandBuilder::new(
            "reload",
            "Reload one config section, keeping the rest",
            |_state: &mut AppState, _, args| {
                let Some(section) = args.str("section") else {
                    return CommandResult::failure("missing argument: section");
                };
                match config::reload_section(section) {
                    Ok(loaded) => CommandResult::success(format!(
                        "section '{}' reloaded {}",
                        section,
                        source_of(&loaded)
                    )),
                    Err(error) => CommandResult::failure(error),
                }
            },
        )
        .pattern("{section}")
        .arg("section", ArgType::choice(config::SECTIONS.iter().copied()))
        .completer("section", |_, _| {
            config::SECTIONS.iter().map(|s| s.to_string()).collect()
        })
        .build(),
    ]
}
