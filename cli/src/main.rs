// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # didseed
//!
//! Entry point for the `didseed` binary. Parses CLI arguments, initializes
//! logging, runs one derivation and prints the result as JSON.
//!
//! The binary supports four subcommands:
//!
//! - `create`: derive a DID and print its record
//! - `document`: print the DID document for a derived DID or a `did:key`
//! - `seed`: generate a random seed
//! - `version`: print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};

use didseed::encoding::bytes_to_base64;
use didseed::{
    DidDocument, DidInfo, DidKey, DidMethod, KeyType, LocalDid, Metadata, PublicKey, Seed,
};

use cli::{Commands, DidSeedCli, SeedFormat};

fn main() -> Result<()> {
    let cli = DidSeedCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format)?;

    match cli.command {
        Commands::Create(args) => create(args),
        Commands::Document(args) => document(args),
        Commands::Seed(args) => seed(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Derives a DID from the shared derivation flags.
fn derive(args: &cli::DeriveArgs, metadata: Metadata) -> Result<DidInfo> {
    let method: DidMethod = args
        .method
        .parse()
        .with_context(|| format!("invalid --method '{}'", args.method))?;
    let key_type: KeyType = args
        .key_type
        .parse()
        .with_context(|| format!("invalid --key-type '{}'", args.key_type))?;

    let mut builder = LocalDid::new(method, key_type).metadata(metadata);
    if let Some(seed) = &args.seed {
        builder = builder.seed(seed.as_str());
    }
    if let Some(did) = &args.did {
        builder = builder.did(did.as_str());
    }

    let info = builder
        .create()
        .with_context(|| format!("failed to create {method} DID"))?;
    tracing::info!(did = %info.did(), seeded = args.seed.is_some(), "DID derived");
    Ok(info)
}

fn create(args: cli::CreateArgs) -> Result<()> {
    let metadata: Metadata = args.metadata.into_iter().collect();
    let info = derive(&args.derive, metadata)?;

    let mut out = json!({
        "did": info.did(),
        "qualifiedDid": info.qualified_did(),
        "method": info.method(),
        "keyType": info.key_type(),
        "verkey": info.verkey(),
        "metadata": info.metadata(),
    });
    if args.show_secret {
        tracing::warn!("printing secret key material");
        out["seed"] = Value::String(info.seed().to_hex());
        out["secret"] = Value::String(info.secret().to_hex());
    }
    print_json(&out)
}

fn document(args: cli::DocumentArgs) -> Result<()> {
    let doc = match &args.from_did {
        Some(did) => document_for_did_key(did)?,
        None => derive(&args.derive, Metadata::new())?
            .to_document()
            .context("failed to build DID document")?,
    };
    doc.validate().context("generated DID document is invalid")?;
    println!("{}", doc.to_json()?);
    Ok(())
}

fn document_for_did_key(did: &str) -> Result<DidDocument> {
    let did_key = DidKey::from_did(did).with_context(|| format!("invalid did:key '{did}'"))?;
    let public_key = PublicKey::try_from_slice(did_key.public_key())
        .with_context(|| format!("'{did}' does not carry a 32-byte key"))?;
    Ok(DidDocument::build(&did_key.did(), &public_key, did_key.key_type())?)
}

fn seed(args: cli::SeedArgs) -> Result<()> {
    let seed = Seed::random();
    let encoded = match args.format {
        SeedFormat::Base64 => bytes_to_base64(seed.as_bytes(), false, true),
        SeedFormat::Hex => seed.to_hex(),
    };
    println!("{encoded}");
    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("didseed {}", env!("CARGO_PKG_VERSION"));
    println!("rustc   {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
