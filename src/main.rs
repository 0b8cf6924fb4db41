//! attempt-throttle command line.
//!
//! # Architecture Overview
//!
//! ```text
//!     CLI args ──▶ config loader ──▶ AccessGate
//!                                      │
//!                    ┌─────────────────┼──────────────────┐
//!                    ▼                 ▼                  ▼
//!              credentials       AttemptThrottle    StaticAllowList
//!               checks                 │              (oracle)
//!                                      ▼
//!                                  FileStore
//!                           (JSON slots on disk)
//! ```
//!
//! Every invocation is one "page load": state lives only in the store file,
//! so consecutive runs behave like reloads of the same browser tab.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use attempt_throttle::config::load_or_default;
use attempt_throttle::observability::logging::init_logging;
use attempt_throttle::portal::{AccessGate, AccessOutcome, AccessRequest, GateStatus, StaticAllowList};
use attempt_throttle::store::FileStore;

#[derive(Parser)]
#[command(name = "attempt-throttle")]
#[command(about = "Inspect and drive the portal attempt throttle", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Storage file, overriding `storage.path`.
    #[arg(short, long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current throttle state
    Status {
        #[arg(long)]
        subject: Option<String>,
    },
    /// Record one failed verification
    Fail {
        #[arg(long)]
        subject: Option<String>,
    },
    /// Reset the throttle (demo only)
    Reset {
        #[arg(long)]
        subject: Option<String>,
    },
    /// Submit account credentials through the access form flow
    Verify {
        #[arg(long)]
        account: String,
        #[arg(long)]
        invoice: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        business: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability);

    let store_path = cli
        .store
        .unwrap_or_else(|| PathBuf::from(&config.storage.path));
    tracing::debug!(
        store = ?store_path,
        max_attempts = config.throttle.max_attempts,
        key_scope = ?config.throttle.key_scope,
        "Configuration loaded"
    );

    let oracle = StaticAllowList::new(config.accounts.clone());
    let gate = AccessGate::new(&config, FileStore::new(store_path), oracle);

    let output = match cli.command {
        Commands::Status { subject } => status_json(&gate.status(subject.as_deref())),
        Commands::Fail { subject } => status_json(&gate.record_failure(subject.as_deref())),
        Commands::Reset { subject } => status_json(&gate.manual_reset(subject.as_deref())?),
        Commands::Verify {
            account,
            invoice,
            email,
            business,
        } => {
            let request = AccessRequest {
                account_number: account,
                invoice_number: invoice,
                email,
                business_id: business,
            };
            outcome_json(&gate.submit(&request), config.throttle.lock_duration())
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn status_json(status: &GateStatus) -> Value {
    json!({
        "key": status.key,
        "state": status.state,
        "attempts_remaining": status.attempts_remaining,
        "banner": status.banner,
    })
}

fn outcome_json(outcome: &AccessOutcome, lock_duration: std::time::Duration) -> Value {
    match outcome {
        AccessOutcome::Verified => json!({ "outcome": "verified" }),
        AccessOutcome::Rejected { state, warning } => json!({
            "outcome": "rejected",
            "state": state,
            "warning": warning.map(|w| json!({
                "title": w.title(),
                "message": w.message(lock_duration),
            })),
        }),
        AccessOutcome::Locked { state } => json!({
            "outcome": "locked",
            "state": state,
        }),
        AccessOutcome::Invalid(e) => json!({
            "outcome": "invalid",
            "error": e.to_string(),
        }),
    }
}
