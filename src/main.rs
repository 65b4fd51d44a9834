use clap::Parser;
use std::fs::OpenOptions;
use std::process;
use tracing_subscriber::EnvFilter;

use leafbase::repl;
use leafbase::session::Session;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A persistent single-table storage engine with a line-oriented shell.
#[derive(Parser)]
#[command(name = "leafbase", version = VERSION)]
struct Cli {
    /// Path to the database file.
    filename: String,
}

fn main() {
    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("leafbase.log")
        .expect("failed to open log file");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let cli = Cli::parse();

    match Session::open(&cli.filename) {
        Ok(session) => repl::run(session),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
