//! keyseg: split key blobs into zero-copy field windows and inspect key pairs.

mod blob;
mod cli;
mod encoding;
mod inspect;
mod keys;

use std::{
    fs,
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use keyseg_core::FieldLayout;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use crate::cli::{Cli, Command};
use crate::encoding::Encoding;
use crate::keys::KeyReport;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("keyseg v{}", env!("CARGO_PKG_VERSION"));

    match run(cli, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Dispatch one parsed command, writing its report to `out`.
fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let Cli {
        encoding, json, command, ..
    } = cli;
    match command {
        Command::Split {
            blob,
            layout,
            layout_file,
        } => {
            let layout = match (layout, layout_file) {
                (Some(layout), _) => layout,
                (None, Some(path)) => load_layout_file(&path)?,
                (None, None) => anyhow::bail!("either --layout or --layout-file is required"),
            };
            let bytes = blob::read_blob(&blob, encoding)?;
            let report = inspect::split(&layout, &bytes, encoding)?;
            emit(out, &report, json)
        }
        Command::Window { blob, seeks, read } => {
            let bytes = blob::read_blob(&blob, encoding)?;
            let report = inspect::window(&bytes, &seeks, read, encoding)?;
            emit(out, &report, json)
        }
        Command::Keypair { blob, layout, check } => {
            let bytes = Zeroizing::new(blob::read_blob(&blob, encoding)?);
            let pair = keys::load_keypair(&bytes, layout.as_ref())?;
            let report = KeyReport::new(&pair, encoding, check)?;
            emit(out, &report, json)?;
            if report.seed_matches == Some(false) {
                anyhow::bail!("private key does not derive the stored public key");
            }
            Ok(())
        }
        Command::Keygen { out_dir } => keygen(out, out_dir.as_deref(), encoding, json),
    }
}

fn load_layout_file(path: &Path) -> anyhow::Result<FieldLayout> {
    let raw = fs::read(path).with_context(|| format!("read layout {}", path.display()))?;
    let layout: FieldLayout = serde_json::from_slice(&raw)
        .with_context(|| format!("parse layout {}", path.display()))?;
    tracing::info!(path = %path.display(), "layout loaded");
    Ok(layout)
}

fn emit<T: Serialize + std::fmt::Display>(
    out: &mut impl Write,
    report: &T,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
    } else {
        write!(out, "{report}")?;
    }
    Ok(())
}

fn keygen(
    out: &mut impl Write,
    out_dir: Option<&Path>,
    encoding: Encoding,
    json: bool,
) -> anyhow::Result<()> {
    let pair = keys::generate_keypair()?;
    let report = KeyReport::new(&pair, encoding, false)?;
    let private = Zeroizing::new(encoding.encode(&pair.private_key()));

    if let Some(dir) = out_dir {
        let ext = match encoding {
            Encoding::Base64 => "b64",
            Encoding::Hex | Encoding::Raw => "hex",
        };
        blob::write_text(&dir.join(format!("pk.{ext}")), &report.public_key)?;
        blob::write_text(&dir.join(format!("sk.{ext}")), &private)?;
        tracing::info!(dir = %dir.display(), "key pair written");
        writeln!(out, "keypair written → {}", dir.display())?;
        return Ok(());
    }

    if json {
        let pair_json = serde_json::json!({
            "public_key": report.public_key,
            "private_key": private.as_str(),
            "fingerprint": report.fingerprint,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&pair_json)?)?;
    } else {
        write!(out, "{report}")?;
        writeln!(out, "private seed: {}", private.as_str())?;
    }
    Ok(())
}
