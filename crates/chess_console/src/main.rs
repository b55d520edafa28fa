//! Terminal front end for the chess rules engine.
//!
//! Reads one command per line from stdin and answers on stdout; logs go to
//! stderr. Type `help` for the command list.

mod config;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::ConsoleConfig;
use session::{Command, Session};

fn print_usage() {
    println!("chess_console - play a two-player game in the terminal");
    println!();
    println!("Usage:");
    println!("  chess_console [--config <file>]");
    println!();
    println!("Without --config, ./{} is read if present.", config::DEFAULT_CONFIG_FILE);
}

fn init_logging(config: &ConsoleConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> Result<Option<PathBuf>> {
    let mut config_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args
                    .get(i + 1)
                    .context("--config needs a file argument")?;
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }
    Ok(config_path)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let config_path = parse_args(&args)?;
    let config = ConsoleConfig::load(config_path.as_deref())?;
    init_logging(&config);
    info!(?config, "console starting");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Session::new(config);

    writeln!(stdout, "{}", session.game().board())?;
    writeln!(stdout, "white to move; type `help` for commands")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                warn!(input = %line.trim(), "bad command");
                writeln!(stdout, "error: {e}")?;
                stdout.flush()?;
                continue;
            }
        };
        let keep_going = session.execute(cmd, &mut stdout)?;
        stdout.flush()?;
        if !keep_going {
            break;
        }
    }
    Ok(())
}
