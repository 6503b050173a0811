use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Override the default config file path
    #[arg(short = 'c', long = "config")]
    pub config_file: Option<String>,

    /// Write debug logs to this file (the terminal itself is owned by the UI)
    #[arg(short = 'l', long = "log-file")]
    pub log_file: Option<String>,
}
