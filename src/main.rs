mod app;
mod cli;
mod commands;
mod config;
mod console;
mod constants;
mod input;
mod router;
mod state;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{error::Error, fs::File, io, sync::Arc};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();
    config::load_config(args.config_file)?;
    init_tracing(args.log_file.as_deref())?;

    let (app, errors) = App::new();
    for error in &errors {
        tracing::warn!(%error, "command registration failed");
        eprintln!("Command registration failed: {}", error);
    }

    // Terminal setup
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = ratatui::init();

    let app_result = app.run(terminal);
    ratatui::restore();

    // Terminal cleanup
    disable_raw_mode()?;
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
        println!("{:?}", err)
    }

    Ok(app_result?)
}

fn init_tracing(log_file: Option<&str>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quarterdeck=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
