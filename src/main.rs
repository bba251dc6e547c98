mod config;
mod error;
mod form;
mod logging;
mod models;
mod preview;
mod replay;
mod state;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use state::ResumeState;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-builder")]
#[command(about = "Fill in a resume form and edit the rendered resume in place")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive builder (default)
    Tui,

    /// Apply a JSON list of actions and print the resulting resume
    Replay {
        /// Path to the action script
        script: PathBuf,

        /// Print the final state as JSON instead of the rendered resume
        #[arg(long)]
        json: bool,

        /// Wrap width for skill badges
        #[arg(short, long, default_value = "80")]
        width: usize,
    },

    /// Show the config file location and effective settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    if let Err(e) = logging::init(&config) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let mut state = ResumeState::new(config.seed_edits);
            tui::run(&mut state)?;
        }

        Commands::Replay {
            script,
            json,
            width,
        } => {
            let state = replay::replay_file(&script, config.seed_edits)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                match &state.snapshot {
                    Some(snapshot) => print!("{}", preview::render_plain(snapshot, width)),
                    None => println!("No resume submitted yet."),
                }
            }
        }

        Commands::Config => {
            let path = cli.config.unwrap_or_else(Config::default_path);
            println!("Config file: {}", path.display());
            println!("Log file:    {}", config.log_path().display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
