//! # aisle CLI entry point
//!
//! Parses command-line arguments and dispatches to command handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aisle_cli::serve::{run_serve, ServeArgs};

/// aisle — wedding planning service.
///
/// Serves the JSON API over the hosted identity and record store
/// services, or fully in-memory with `serve --demo`.
#[derive(Parser, Debug)]
#[command(name = "aisle", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the API server.
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => run_serve(&args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_serve_defaults() {
        let cli = Cli::try_parse_from(["aisle", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command;
        assert_eq!(args.bind.to_string(), "127.0.0.1:8080");
        assert!(!args.demo);
        assert!(args.config.is_none());
    }

    #[test]
    fn cli_parses_demo_and_bind() {
        let cli = Cli::try_parse_from(["aisle", "-vv", "serve", "--demo", "--bind", "0.0.0.0:9000"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Serve(args) = cli.command;
        assert!(args.demo);
        assert_eq!(args.bind.to_string(), "0.0.0.0:9000");
    }
}
