//! Ferrule CLI - Command line interface.

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zeroize::Zeroizing;

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "ferrule")]
#[command(about = "Ferrule - Seal and open integration credentials")]
#[command(version)]
struct Cli {
    /// Secret key (64 hex digits, optional 0x prefix)
    #[arg(long, env = "FERRULE_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Log filter (e.g. "debug", "ferrule=trace")
    #[arg(long, default_value = "warn", env = "FERRULE_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new secret key
    Keygen,
    /// Check that a key is usable (exit status 1 if not)
    CheckKey {
        /// Key to check (defaults to --secret-key)
        key: Option<String>,
    },
    /// Encrypt a plaintext into an envelope
    Encrypt {
        /// Plaintext (read from stdin if not provided)
        plaintext: Option<String>,
    },
    /// Decrypt an envelope
    Decrypt {
        /// Envelope (read from stdin if not provided)
        envelope: Option<String>,
    },
}

// ============================================================================
// Helpers
// ============================================================================

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn require_key(key: Option<&str>) -> Result<&str> {
    key.context("No secret key given. Pass --secret-key or set FERRULE_SECRET_KEY")
}

/// Returns the argument, or stdin with one trailing newline removed.
fn arg_or_stdin(arg: Option<String>, what: &str) -> Result<Zeroizing<String>> {
    if let Some(value) = arg {
        return Ok(Zeroizing::new(value));
    }

    if io::stdin().is_terminal() {
        bail!("No {} given. Pass it as an argument or pipe it on stdin", what);
    }

    let mut input = Zeroizing::new(String::new());
    io::stdin()
        .read_to_string(&mut input)
        .with_context(|| format!("Failed to read {} from stdin", what))?;

    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }

    Ok(input)
}

// ============================================================================
// Main
// ============================================================================

fn run(cli: Cli) -> Result<ExitCode> {
    let key = cli.secret_key.as_deref();

    match cli.command {
        Commands::Keygen => {
            println!("{}", ferrule_cipher::generate_key());
            tracing::info!("Generated new secret key");
        },
        Commands::CheckKey { key: candidate } => {
            let candidate = candidate.as_deref().or(key);
            let valid = candidate.is_some_and(ferrule_cipher::test_key);

            tracing::debug!(valid, "Checked secret key");
            if valid {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Encrypt { plaintext } => {
            let plaintext = arg_or_stdin(plaintext, "plaintext")?;
            let envelope = ferrule_cipher::encrypt(&plaintext, require_key(key)?)
                .context("Encryption failed")?;
            println!("{}", envelope);
        },
        Commands::Decrypt { envelope } => {
            let envelope = arg_or_stdin(envelope, "envelope")?;
            let plaintext = ferrule_cipher::decrypt(envelope.trim(), require_key(key)?)
                .context("Decryption failed")?;
            println!("{}", plaintext.as_str());
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        },
    }
}
