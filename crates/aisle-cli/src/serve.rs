//! # Serve Command
//!
//! Binds the API router and runs it until interrupted. Service
//! configuration comes from a YAML file when `--config` is given,
//! otherwise from the `AISLE_*` environment variables. `--demo` skips the
//! hosted services entirely and serves against in-memory stubs with a
//! seeded demo account, which is enough to exercise every page locally.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use aisle_api::state::AppState;
use aisle_client::{
    ClientConfig, HttpIdentityClient, HttpRecordStore, StubIdentityService, StubRecordStore,
};

/// Demo-mode credentials, printed at startup.
const DEMO_EMAIL: &str = "demo@aisle.app";
const DEMO_PASSWORD: &str = "demo-password";

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Path to a YAML service configuration file. Without it the
    /// configuration is read from `AISLE_*` environment variables.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Serve against in-memory stubs with a seeded demo account instead
    /// of the hosted services.
    #[arg(long)]
    pub demo: bool,
}

/// Run the server until the process is stopped.
pub async fn run_serve(args: &ServeArgs) -> anyhow::Result<()> {
    let state = if args.demo {
        demo_state()
    } else {
        connected_state(args)?
    };

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tracing::info!(addr = %args.bind, demo = args.demo, "aisle listening");

    axum::serve(listener, aisle_api::app(state))
        .await
        .context("server terminated")?;
    Ok(())
}

/// Load the service configuration for `--config` / environment mode.
pub fn load_config(args: &ServeArgs) -> anyhow::Result<ClientConfig> {
    match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_yaml::from_str(&raw)
                .with_context(|| format!("invalid configuration in {}", path.display()))
        }
        None => ClientConfig::from_env().context("incomplete AISLE_* environment"),
    }
}

fn connected_state(args: &ServeArgs) -> anyhow::Result<AppState> {
    let config = load_config(args)?;
    let identity =
        Arc::new(HttpIdentityClient::new(&config).context("identity client setup failed")?);
    let store = Arc::new(HttpRecordStore::new(&config).context("record store setup failed")?);
    Ok(AppState::new(identity, store))
}

fn demo_state() -> AppState {
    let identity = Arc::new(StubIdentityService::new());
    let (user_id, _token) = identity.seed_confirmed_user(DEMO_EMAIL, DEMO_PASSWORD);
    tracing::info!(
        %user_id,
        email = DEMO_EMAIL,
        password = DEMO_PASSWORD,
        "demo account seeded"
    );
    AppState::new(identity, Arc::new(StubRecordStore::new()))
}
