// Sherman TUI
// Interactive preview of the status display

#[path = "../tui/mod.rs"]
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sherman_core::config::Config;

#[derive(Parser, Debug)]
#[command(name = "sherman-tui", version, about = "Preview the Sherman status display")]
struct Args {
    /// Config file (defaults to ~/.config/sherman/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    // log lines would tear the alternate screen, so stay quiet unless asked
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_default().context("failed to load default config")?,
    };

    tui::run(&config).context("terminal UI failed")
}
