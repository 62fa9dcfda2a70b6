//! Derives the well-known test identities and prints their key material.
//!
//! Useful for cross-checking against other agents: the same seeds must
//! produce the same verkeys and DIDs everywhere.
//!
//! Run with:
//!   cargo run --example demo

use didseed::{create_local_did, DidMethod, KeyType, SeedInput, WalletError};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";

const IDENTITIES: [(&str, &str); 3] = [
    ("Government", "000000000000000000000000Trustee1"),
    ("Faber", "00000000000000000000000Endorser1"),
    ("Alice", "00000000000000000000000000Alice1"),
];

fn row(label: &str, value: &str) {
    println!("  {DIM}{label:<10}{RESET} {YELLOW}{value}{RESET}");
}

fn show(name: &str, seed: &str) -> Result<(), WalletError> {
    let input = SeedInput::from(seed);
    let key = create_local_did(DidMethod::Key, KeyType::Ed25519, Some(&input), None, None)?;
    let sov = create_local_did(DidMethod::Sov, KeyType::Ed25519, Some(&input), None, None)?;

    println!();
    println!("{BOLD}{CYAN}{name}{RESET}");
    println!("{BOLD}{}{RESET}", key.did());
    row("seed:", seed);
    row("sov:", &sov.qualified_did());
    row("verkey58:", key.verkey());
    row("verkeyHex:", &key.public_key().to_hex());
    row("seedHex:", &key.seed().to_hex());
    row("secretHex:", &key.secret().to_hex());
    Ok(())
}

fn main() -> Result<(), WalletError> {
    for (name, seed) in IDENTITIES {
        show(name, seed)?;
    }
    Ok(())
}
