//! Terminal host for a live raffle session.
//!
//! Spawns one SessionActor, imports participants from CSV and either runs
//! a fixed number of rounds or takes operator commands from stdin.

mod commands;
mod config;
mod logging;
mod renderer;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Error;
use ctrlc::set_handler;
use log::{error, info, warn};
use pico_args::Arguments;
use raffle::{
    import::load_csv,
    pool::Participant,
    session::{SessionError, SessionHandle, draw_with},
};
use tokio::io::{AsyncBufReadExt, BufReader};

use commands::{Command, INTERACTIVE_HELP};
use config::{CliOverrides, HostConfig};
use renderer::TerminalRenderer;

const HELP: &str = "\
Run a live raffle drawing session in the terminal

USAGE:
  raffle_host [OPTIONS]

OPTIONS:
  --csv        PATH        Participant CSV to import  [default: env RAFFLE_CSV]
  --rounds     N           Rounds to draw when not interactive  [default: 1]
  --spin-ms    MS          Reel animation length  [default: env SPIN_DURATION_MS or 8000]

FLAGS:
  --interactive            Read operator commands from stdin
  -h, --help               Print help information

ENVIRONMENT:
  RAFFLE_NAME              Session name shown in logs
  REEL_REPETITIONS         Times the pool is repeated on the reel
  REEL_ROW_HEIGHT          Row height in pixels
  REEL_VIEWPORT_ROWS       Visible rows (odd)
  SESSION_INBOX_CAPACITY   Actor inbox size
  (See .env file for all configuration options)
";

struct Args {
    csv: Option<PathBuf>,
    rounds: usize,
    spin_ms: Option<u64>,
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        csv: pargs.opt_value_from_str("--csv")?,
        rounds: pargs.opt_value_from_str("--rounds")?.unwrap_or(1),
        spin_ms: pargs.opt_value_from_str("--spin-ms")?,
        interactive: pargs.contains("--interactive"),
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = HostConfig::from_env(CliOverrides {
        csv: args.csv,
        spin_ms: args.spin_ms,
    })?;
    config.validate()?;

    info!(
        "Starting raffle '{}' (reel x{}, {} ms spin)",
        config.session.name,
        config.session.reel.repetitions,
        config.session.reel.spin_duration.as_millis()
    );

    let (session_task, handle) = raffle::session::SessionActor::spawn(config.to_session_config());

    let (_subscriber_id, mut notices) = handle.subscribe().await?;
    let notifier = tokio::spawn(async move {
        while let Some(event) = notices.recv().await {
            logging::log_draw_event(&event);
        }
    });

    if let Some(path) = &config.csv_path {
        import_file(&handle, path).await?;
    }

    let renderer = TerminalRenderer::new();
    if args.interactive {
        run_interactive(&handle, &renderer).await?;
    } else {
        run_rounds(&handle, &renderer, args.rounds).await?;
    }

    let snapshot = handle.snapshot().await?;
    info!(
        "Closing raffle '{}' after {} draw(s)",
        snapshot.name,
        snapshot.draws_completed
    );

    handle.close().await?;
    session_task.await?;
    notifier.await?;

    Ok(())
}

/// Import a CSV file; a bad file is reported, not fatal
async fn import_file(handle: &SessionHandle, path: &Path) -> Result<(), SessionError> {
    match load_csv(path).await {
        Ok(batch) => {
            info!("Importing {} row(s) from {}", batch.len(), path.display());
            handle.merge(batch).await?;
        }
        Err(e) => error!("Failed to import {}: {}", path.display(), e),
    }
    Ok(())
}

/// Draw one winner; user-facing rejections are logged and yield `None`
async fn draw_once(
    handle: &SessionHandle,
    renderer: &TerminalRenderer,
) -> Result<Option<Arc<Participant>>, SessionError> {
    match draw_with(handle, renderer).await {
        Ok(winner) => {
            println!("Congratulations {}!", winner.full_name());
            Ok(Some(winner))
        }
        Err(SessionError::Draw(e)) if e.is_user_rejection() => {
            warn!("{}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

async fn run_rounds(
    handle: &SessionHandle,
    renderer: &TerminalRenderer,
    rounds: usize,
) -> Result<(), SessionError> {
    for round in 1..=rounds {
        info!("Round {}/{}", round, rounds);
        if draw_once(handle, renderer).await?.is_none() {
            break;
        }
        handle.next_round().await?;
    }
    Ok(())
}

async fn run_interactive(handle: &SessionHandle, renderer: &TerminalRenderer) -> Result<(), Error> {
    print!("{INTERACTIVE_HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Draw => {
                draw_once(handle, renderer).await?;
            }
            Command::Next => match handle.next_round().await {
                Ok(winner) => info!("{} removed from the pool", winner.display_name),
                Err(SessionError::Draw(e)) if e.is_user_rejection() => warn!("{}", e),
                Err(e) => return Err(e.into()),
            },
            Command::Add {
                first_name,
                last_name,
            } => match Participant::register(&first_name, &last_name) {
                Ok(participant) => {
                    handle.merge(vec![participant]).await?;
                }
                Err(e) => println!("{e}"),
            },
            Command::Import(path) => import_file(handle, &path).await?,
            Command::Reset => {
                handle.reset_pool().await?;
            }
            Command::Status => {
                let snapshot = handle.snapshot().await?;
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
            Command::Help => print!("{INTERACTIVE_HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}
