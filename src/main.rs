// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pkgstate::query;
use pkgstate::{Config, PackageState, StateRegistry};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pkgstate")]
#[command(author, version, about = "Package installation state registry", long_about = None)]
struct Cli {
    /// Root directory holding the registry
    #[arg(short, long, default_value = "/", global = true)]
    root: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new state for a package
    SetState {
        /// Package name
        pkgname: String,
        /// New state (unpacked, installed, broken, config-files, not-installed, half-unpacked)
        state: String,
        /// Package version, stored only for packages new to the registry
        #[arg(long)]
        pkg_version: Option<String>,
        /// Canonical name-version string (defaults to <pkgname>-<version>)
        #[arg(long)]
        pkgver: Option<String>,
    },
    /// Show the state of an installed package
    State {
        /// Package name
        pkgname: String,
    },
    /// List all tracked packages and their states
    List,
}

fn run(cli: Cli) -> Result<()> {
    let registry = StateRegistry::new(Config::new(&cli.root));

    match cli.command {
        Commands::SetState {
            pkgname,
            state,
            pkg_version,
            pkgver,
        } => {
            let state: PackageState = state.parse()?;
            let pkgver =
                pkgver.or_else(|| pkg_version.as_ref().map(|v| format!("{}-{}", pkgname, v)));

            info!("Setting {} to {} under {}", pkgname, state, cli.root);
            registry
                .apply(&pkgname, pkg_version.as_deref(), pkgver.as_deref(), state)
                .with_context(|| format!("Failed to set state of {}", pkgname))?;

            println!("{}: {}", pkgname, state);
            Ok(())
        }
        Commands::State { pkgname } => {
            let state = query::lookup_installed_state(&registry, &pkgname)?;
            println!("{}", state);
            Ok(())
        }
        Commands::List => {
            let packages = query::list_installed(&registry)?;
            if packages.is_empty() {
                println!("No packages tracked under {}", cli.root);
                return Ok(());
            }

            for pkg in packages {
                println!(
                    "{:<14} {}",
                    pkg.state.to_string(),
                    pkg.pkgver.as_deref().unwrap_or(&pkg.pkgname)
                );
            }
            Ok(())
        }
    }
}

/// Exit status for a failed command: the errno of the underlying registry
/// error when there is one, 1 otherwise
fn exit_code(err: &anyhow::Error) -> ExitCode {
    let code = err
        .downcast_ref::<pkgstate::Error>()
        .map(|e| e.errno())
        .unwrap_or(1);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn main() -> ExitCode {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            exit_code(&e)
        }
    }
}
