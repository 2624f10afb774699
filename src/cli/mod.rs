//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keyseg_core::FieldLayout;

use crate::encoding::Encoding;
use crate::inspect::SeekArg;

/// Zero-copy field windows over key blobs.
#[derive(Parser, Debug)]
#[command(name = "keyseg")]
#[command(about = "Split key blobs into fields and inspect key pairs")]
#[command(version)]
pub struct Cli {
    /// Blob encoding for input and output (hex, base64, raw).
    #[arg(long, short, global = true, default_value_t = Encoding::Hex)]
    pub encoding: Encoding,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a blob into named fixed-width fields.
    Split {
        /// Blob file, or `-` for stdin.
        blob: PathBuf,

        /// Layout as `name:len,name:len`.
        #[arg(
            long,
            required_unless_present = "layout_file",
            conflicts_with = "layout_file"
        )]
        layout: Option<FieldLayout>,

        /// JSON layout file: {"fields":[{"name":..,"len":..}]}.
        #[arg(long)]
        layout_file: Option<PathBuf>,
    },

    /// Seek inside a blob and read one window.
    Window {
        /// Blob file, or `-` for stdin.
        blob: PathBuf,

        /// Seek steps applied in order, as `origin:offset` (begin, current, end).
        #[arg(long = "seek", value_name = "ORIGIN:OFFSET")]
        seeks: Vec<SeekArg>,

        /// Number of bytes to read after seeking.
        #[arg(long)]
        read: usize,
    },

    /// Load a key pair from a blob and print its public half.
    Keypair {
        /// Blob file, or `-` for stdin.
        blob: PathBuf,

        /// Layout naming `public` and optionally `private` fields.
        /// Defaults to 32 public bytes followed by the private key.
        #[arg(long)]
        layout: Option<FieldLayout>,

        /// Check that a 32-byte Ed25519 seed reproduces the public key.
        #[arg(long)]
        check: bool,
    },

    /// Generate an Ed25519 key pair.
    Keygen {
        /// Write pk/sk files here instead of printing the pair.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}
