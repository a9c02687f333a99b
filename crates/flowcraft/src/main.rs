//! flowcraft - interactive sprint and issue tracker.
//!
//! One process is one session: all state lives in memory and is gone
//! when the session ends.

mod app;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::app::App;

/// Interactive sprint and issue tracker for a single session.
#[derive(Debug, Parser)]
#[command(name = "flowcraft", version, about)]
struct Cli {
    /// Log filter, e.g. "debug" or "flowcraft_core=debug"
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log)),
        )
        .with_writer(io::stderr)
        .init();

    let mut app = App::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("flowcraft - type \"help\" for commands");
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let reply = app.execute(&line);
        if !reply.text.is_empty() {
            println!("{}", reply.text);
        }
        if reply.quit {
            break;
        }
    }

    Ok(())
}
