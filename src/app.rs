use crate::commands::register_all_commands;
use crate::config;
use crate::console::{Console, ConsoleStateAccess};
use crate::input::handler::{map_key, InputAction};
use crate::router::{CommandRegistry, Dispatcher, MatchPolicy, RegistrationError};
use crate::state::{AppState, ConsoleSender, HelpEntry, PermissionSet};
use crate::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io;
use std::time::Duration;

pub struct App {
    pub state: AppState,
    console: Console<AppState>,
}

impl App {
    /// Builds the registry, freezes it into a dispatcher configured from the
    /// global config, and seeds the app state. Registration failures are
    /// returned for the caller to report; the surviving commands still work.
    pub fn new() -> (Self, Vec<RegistrationError>) {
        let config = config::read_config();

        let mut registry = CommandRegistry::new();
        let errors = register_all_commands(&mut registry);

        let help_entries: Vec<HelpEntry> = registry
            .entries()
            .flat_map(|entry| {
                entry.patterns().iter().map(|decl| HelpEntry {
                    usage: entry.usage(decl),
                    description: decl.description().to_string(),
                })
            })
            .collect();

        let dispatcher = Dispatcher::new(registry)
            .policy(MatchPolicy {
                case_insensitive: config.matching.case_insensitive,
            })
            .max_suggestions(config.completion.max_suggestions);

        let mut state = AppState::new(PermissionSet::new(
            config.permissions.administrator,
            config.permissions.granted.clone(),
        ));
        state.help_entries = help_entries;

        (
            Self {
                state,
                console: Console::new(dispatcher),
            },
            errors,
        )
    }

    pub fn run(mut self, mut terminal: ratatui::DefaultTerminal) -> io::Result<()> {
        while !self.state.exit {
            terminal.draw(|frame| ui::draw(frame, &mut self.state))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Release {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        let binds = config::read_config().keybindings;
        match map_key(key, &binds, self.state.show_help) {
            InputAction::CloseHelp => self.state.show_help = false,
            InputAction::Quit => self.state.exit = true,
            InputAction::Execute => {
                let sender = ConsoleSender::snapshot(&self.state.permissions);
                self.console.execute(&mut self.state, &sender);
            }
            InputAction::Complete => {
                let sender = ConsoleSender::snapshot(&self.state.permissions);
                self.console.complete(&mut self.state, &sender);
            }
            InputAction::HistoryPrev => self.state.console_state_mut().previous_history(),
            InputAction::HistoryNext => self.state.console_state_mut().next_history(),
            InputAction::ScrollUp => {
                if self.state.show_help {
                    self.state.help_scroll = self.state.help_scroll.saturating_add(1);
                } else {
                    self.state.console_state_mut().scroll_output_up(5);
                }
            }
            InputAction::ScrollDown => {
                if self.state.show_help {
                    self.state.help_scroll = self.state.help_scroll.saturating_sub(1);
                } else {
                    self.state.console_state_mut().scroll_output_down(5);
                }
            }
            InputAction::Edit(code) => self.console.handle_key(code, &mut self.state),
        }
    }
}
