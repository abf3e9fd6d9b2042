//! gate: authentication-gated reverse proxy (configuration front end)
//!
//! # Architecture Overview
//!
//! ```text
//!     config.yml ──▶ ┌────────┐    ┌────────────┐
//!                    │ loader │───▶│ validation │──▶ Config
//!                    └────────┘    └────────────┘      │
//!                                                      ▼
//!                        ┌──────────────┬──────────────┬──────────────┐
//!                        │  RouteTable  │ AccessPolicy │  AuthPaths   │
//!                        │ (forwarding) │ (identities) │ (oauth2 flow)│
//!                        └──────────────┴──────────────┴──────────────┘
//! ```
//!
//! The binary loads and checks a configuration and answers dry-run queries
//! against it. Any load or validation error exits non-zero before anything else
//! happens.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use gate::lifecycle::{bootstrap, Gate};
use gate::observability::logging;

#[derive(Parser)]
#[command(name = "gate")]
#[command(about = "Authentication-gated reverse proxy", long_about = None)]
struct Cli {
    /// Configuration file (YAML, or TOML with a .toml extension)
    #[arg(short, long, default_value = "config.yml")]
    conf: PathBuf,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print a summary
    Check {
        /// Print the validated configuration as JSON (secrets masked)
        #[arg(long)]
        json: bool,
    },
    /// Show which proxy route a request would take
    Route {
        /// Host header value
        host: String,
        /// Request path, optionally with a query string
        path: String,
    },
    /// Check an identity against the restrictions
    Allow {
        /// Authenticated identity, usually an email address
        identity: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let gate = match bootstrap(&cli.conf) {
        Ok(gate) => gate,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(&gate, cli.command.unwrap_or(Commands::Check { json: false })) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(gate: &Gate, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Check { json: true } => {
            println!("{}", serde_json::to_string_pretty(&*gate.config)?);
        }
        Commands::Check { json: false } => {
            let config = &gate.config;
            println!("address:      {}", config.addr);
            println!("service:      {}", config.auth.info.service);
            println!("htdocs:       {}", config.htdocs.display());
            println!(
                "restrictions: {}",
                if gate.access.is_restricted() {
                    config.restrictions.join(", ")
                } else {
                    "(none)".to_string()
                }
            );
            println!("auth paths:   {}", serde_json::to_string(&*gate.auth_paths)?);
            for (i, route) in gate.routes.iter().enumerate() {
                println!(
                    "route[{}]:     {}{} -> {}{}",
                    i,
                    route.host.as_deref().unwrap_or("*"),
                    route.path,
                    route.dest,
                    if route.strip_path { " (strip)" } else { "" }
                );
            }
        }
        Commands::Route { host, path } => {
            let (path, query) = match path.split_once('?') {
                Some((path, query)) => (path.to_string(), Some(query.to_string())),
                None => (path.clone(), None),
            };

            if gate.auth_paths.is_auth_path(&path) {
                println!("auth endpoint {}", path);
            } else {
                match gate.routes.find(&host, &path) {
                    Some(m) => println!(
                        "route[{}] {} -> {}",
                        m.index,
                        m.forward_path,
                        m.route.upstream_url(&m.forward_path, query.as_deref())
                    ),
                    None => println!(
                        "no route; served from {}",
                        gate.config.htdocs.display()
                    ),
                }
            }
        }
        Commands::Allow { identity } => {
            let verdict = if gate.access.is_allowed(&identity) {
                "allowed"
            } else {
                "denied"
            };
            println!("{} {}", identity, verdict);
        }
    }

    Ok(())
}
