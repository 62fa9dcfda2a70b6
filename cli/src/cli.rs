//! # CLI Interface
//!
//! Defines the command-line argument structure for `didseed` using `clap`
//! derive. Supports four subcommands: `create`, `document`, `seed`, and
//! `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::logging::LogFormat;

/// Deterministic DIDs from Ed25519 seeds.
///
/// Derives `did:key` and `did:sov` identifiers (and their DID documents)
/// from a 32-byte seed. Results are printed as JSON on stdout; logs go to
/// stderr.
#[derive(Parser, Debug)]
#[command(
    name = "didseed",
    about = "Derive did:key and did:sov identifiers from Ed25519 seeds",
    version,
    propagate_version = true
)]
pub struct DidSeedCli {
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "DIDSEED_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "DIDSEED_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a DID and print its record.
    Create(CreateArgs),
    /// Print the DID document for a derived DID or an existing `did:key`.
    Document(DocumentArgs),
    /// Generate a fresh random seed.
    Seed(SeedArgs),
    /// Print version information and exit.
    Version,
}

/// Inputs shared by every command that derives a DID.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// DID method: `key` or `sov`.
    #[arg(long, short = 'm', default_value = "key")]
    pub method: String,

    /// Key type: `ed25519`, `x25519` or `bls12381g2`.
    #[arg(long, short = 'k', default_value = "ed25519")]
    pub key_type: String,

    /// Seed: 32 ASCII characters, or base64 (anything containing `=`).
    ///
    /// A random seed is used when omitted.
    #[arg(long, short = 's', env = "DIDSEED_SEED", hide_env_values = true)]
    pub seed: Option<String>,

    /// Explicit DID to use instead of the derived one (`sov` only).
    #[arg(long)]
    pub did: Option<String>,
}

/// Arguments for the `create` subcommand.
#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub derive: DeriveArgs,

    /// Metadata entry as `key=value`. Values that parse as JSON are stored
    /// as JSON, anything else as a string. Repeatable.
    #[arg(long = "meta", value_parser = parse_meta)]
    pub metadata: Vec<(String, Value)>,

    /// Include the seed and private key in the output.
    #[arg(long)]
    pub show_secret: bool,
}

/// Arguments for the `document` subcommand.
#[derive(Args, Debug)]
pub struct DocumentArgs {
    #[command(flatten)]
    pub derive: DeriveArgs,

    /// Build the document for this `did:key` instead of deriving one.
    #[arg(long, conflicts_with_all = ["seed", "did"])]
    pub from_did: Option<String>,
}

/// Encoding for generated seeds.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    /// Padded standard base64, accepted back by `--seed`.
    Base64,
    Hex,
}

/// Arguments for the `seed` subcommand.
#[derive(Args, Debug)]
pub struct SeedArgs {
    #[arg(long, short = 'f', value_enum, default_value_t = SeedFormat::Base64)]
    pub format: SeedFormat,
}

fn parse_meta(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty metadata key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
