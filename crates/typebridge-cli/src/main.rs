//! `typebridge` CLI — inspect host/internal value conversions from the command line.
//!
//! Input is extended JSON: plain JSON plus `{"$date": ms}`, `{"$undefined": true}`,
//! `{"$symbol": "desc"}`, `{"$function": "name"}` and `{"$bigint": "123"}` markers.
//!
//! ## Usage
//!
//! ```sh
//! # Host → internal, printed as a kind-tagged tree
//! echo '{"a":1,"b":2.5}' | typebridge inbound
//!
//! # Host → internal → host
//! typebridge roundtrip -i value.json
//!
//! # Show the host kind and the internal kind a value converts to
//! echo '[1,2]' | typebridge kinds
//!
//! # Present failures as host-native errors
//! echo '{"$symbol":"s"}' | typebridge --host-exceptions inbound
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use typebridge_core::{HostValue, TranscodeOptions, Transcoder};

#[derive(Parser)]
#[command(
    name = "typebridge",
    version,
    about = "Convert values between host and internal representations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Report unsupported types as host-native errors ("Cannot convert data type.")
    #[arg(long, global = true)]
    host_exceptions: bool,

    /// JSON file with transcoder options, e.g. {"hostNativeExceptions": true}
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a host value to its internal representation
    Inbound {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Convert a host value to internal and back
    Roundtrip {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the host kind and the internal kind of a value
    Kinds {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    install_tracing();
    let cli = Cli::parse();

    let options = load_options(cli.config.as_deref(), cli.host_exceptions)?;
    tracing::debug!(?options, "transcoder options");
    let transcoder = Transcoder::new(options);

    match cli.command {
        Commands::Inbound { input, output } => {
            let host = read_host(input.as_deref())?;
            let rendered = match transcoder.to_internal(&host)? {
                Some(internal) => serde_json::to_string_pretty(&internal)
                    .context("Failed to render internal value")?,
                None => "absent".to_string(),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Roundtrip { input, output } => {
            let host = read_host(input.as_deref())?;
            let back = transcoder.roundtrip(&host)?;
            let rendered = typebridge_core::render_host_pretty(&back)
                .context("Failed to render host value")?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Kinds { input } => {
            let host = read_host(input.as_deref())?;
            let internal = match transcoder.to_internal(&host)? {
                Some(internal) => internal.type_name(),
                None => "absent",
            };
            println!("host:     {}", host.kind());
            println!("internal: {}", internal);
        }
    }

    Ok(())
}

fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Merge options from `--config` with the `--host-exceptions` flag (the flag can only turn
/// host-native errors on).
fn load_options(config: Option<&str>, host_exceptions: bool) -> Result<TranscodeOptions> {
    let mut options = match config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            TranscodeOptions::from_json(&raw)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => TranscodeOptions::default(),
    };
    options.host_native_exceptions |= host_exceptions;
    Ok(options)
}

fn read_host(path: Option<&str>) -> Result<HostValue> {
    let raw = read_input(path)?;
    typebridge_core::parse_host(&raw).context("Failed to parse host value")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
