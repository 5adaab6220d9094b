//! Offline helpers: prefix validation, WebAuthn options, key files

use std::io::Read;
use std::path::{Path, PathBuf};

use aliasdash_core::pgp_key::{is_pgp_key_file, key_prefix, MAX_KEY_BYTES};
use aliasdash_core::validation::check_alias_prefix_input;
use aliasdash_core::webauthn::{
    transform_credential_create_options, transform_credential_request_options,
    hex_encode, CredentialCreateOptionsWire, CredentialDescriptor, CredentialRequestOptionsWire,
};
use anyhow::{bail, Context as _, Result};
use clap::Subcommand;
use serde_json::{Map, Value};

/// WebAuthn option decoding
#[derive(Subcommand)]
pub enum WebauthnCommand {
    /// Decode assertion options (`navigator.credentials.get`)
    Request {
        /// JSON file, `-` for stdin
        file: PathBuf,
    },
    /// Decode registration options (`navigator.credentials.create`)
    Create {
        /// JSON file, `-` for stdin
        file: PathBuf,
    },
}

/// Print the normalized prefix and whether it can be used.
pub fn validate_prefix(input: &str) -> Result<()> {
    let check = check_alias_prefix_input(input);
    if check.valid {
        println!("{} is a valid prefix", check.normalized);
        return Ok(());
    }
    match check.error {
        Some(hint) => bail!("{}: {hint}", check.normalized),
        None => bail!("prefix is empty"),
    }
}

/// Handle WebAuthn commands
pub fn handle_webauthn_command(cmd: WebauthnCommand) -> Result<()> {
    match cmd {
        WebauthnCommand::Request { file } => {
            let wire: CredentialRequestOptionsWire = serde_json::from_str(&read_input(&file)?)
                .context("Malformed assertion options")?;
            let options = transform_credential_request_options(wire)?;
            println!("challenge: {}", hex_encode(&options.challenge));
            print_descriptors("allowCredentials", &options.allow_credentials);
            print_rest(&options.rest)?;
        }
        WebauthnCommand::Create { file } => {
            let wire: CredentialCreateOptionsWire = serde_json::from_str(&read_input(&file)?)
                .context("Malformed registration options")?;
            let options = transform_credential_create_options(wire)?;
            println!("challenge: {}", hex_encode(&options.challenge));
            println!("user.id: {}", hex_encode(&options.user.id));
            print_descriptors("excludeCredentials", &options.exclude_credentials);
            print_rest(&options.rest)?;
        }
    }
    Ok(())
}

/// Check a key file and print what would go into the key field.
pub fn pgp_key(path: &Path) -> Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !is_pgp_key_file(&name, None) {
        bail!("{name} does not look like a public key (.asc, .pub, .pgp or .key)");
    }
    let contents =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if contents.len() > MAX_KEY_BYTES {
        tracing::warn!(
            size = contents.len(),
            "key file truncated to {} bytes",
            MAX_KEY_BYTES
        );
    }
    print!("{}", key_prefix(&contents));
    Ok(())
}

fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn print_descriptors(label: &str, descriptors: &[CredentialDescriptor]) {
    for descriptor in descriptors {
        println!("{label}: {}", hex_encode(&descriptor.id));
    }
}

fn print_rest(rest: &Map<String, Value>) -> Result<()> {
    if !rest.is_empty() {
        println!("{}", serde_json::to_string_pretty(rest)?);
    }
    Ok(())
}
