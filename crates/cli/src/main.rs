//! QuickQR command-line front end
//!
//! Builds a payload from arguments, renders the QR symbol and exports it as a
//! print-quality PNG.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use quickqr_core::export::{DEFAULT_FILE_PREFIX, DEFAULT_MARGIN_FRACTION, DEFAULT_SIZE};
use quickqr_core::{
    render_terminal, EncryptionKind, ExportConfig, HexColor, LogoFetcher, LogoOverlay,
    NativePlatform, PayloadMode, QrStudio, SymbolStyle,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// QuickQR - generate high-resolution QR code images
#[derive(Parser, Debug)]
#[command(name = "quickqr")]
#[command(author = "QuickQR Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate print-quality QR code PNGs for URLs and WiFi networks", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Symbol foreground colour (#rrggbb)
    #[arg(short, long, global = true, default_value = "#020617")]
    color: HexColor,

    /// Centre logo: preset name (google, gcloud, drive, synology, search) or URL/path
    #[arg(long, global = true)]
    logo: Option<String>,

    /// Output edge length in pixels
    #[arg(short, long, global = true, default_value_t = DEFAULT_SIZE)]
    size: u32,

    /// Margin as a fraction of the edge length (0.05 - 0.10)
    #[arg(short, long, global = true, default_value_t = DEFAULT_MARGIN_FRACTION)]
    margin: f32,

    /// Background colour (#rrggbb)
    #[arg(long, global = true, default_value = "#ffffff")]
    background: HexColor,

    /// File name prefix
    #[arg(long, global = true, default_value = DEFAULT_FILE_PREFIX)]
    prefix: String,

    /// Output directory (defaults to the download directory)
    #[arg(short, long, global = true)]
    out_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Print the encoded payload string
    #[arg(long, global = true, default_value = "false")]
    print_payload: bool,

    /// Show a terminal preview of the symbol
    #[arg(long, global = true, default_value = "false")]
    terminal: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a URL or free text
    Url {
        /// Destination URL or text (blank falls back to https://)
        #[arg(default_value = "")]
        text: String,
    },

    /// Encode a WiFi network descriptor
    Wifi {
        /// Network name
        #[arg(long)]
        ssid: String,

        /// Network password
        #[arg(short, long, default_value = "")]
        password: String,

        /// Encryption type
        #[arg(short, long, value_enum, default_value_t = Encryption::Wpa)]
        encryption: Encryption,

        /// Network does not broadcast its SSID
        #[arg(long, default_value = "false")]
        hidden: bool,
    },

    /// Read a JSON-encoded payload, e.g. {"type":"url","text":"https://example.com"}
    Json {
        /// Path to the JSON file
        path: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Encryption {
    Wpa,
    Wep,
    #[value(alias = "nopass")]
    Open,
}

impl From<Encryption> for EncryptionKind {
    fn from(value: Encryption) -> Self {
        match value {
            Encryption::Wpa => EncryptionKind::Wpa,
            Encryption::Wep => EncryptionKind::Wep,
            Encryption::Open => EncryptionKind::Open,
        }
    }
}

impl Command {
    async fn payload_mode(&self) -> Result<PayloadMode> {
        match self {
            Command::Url { text } => Ok(PayloadMode::url(text.clone())),
            Command::Wifi {
                ssid,
                password,
                encryption,
                hidden,
            } => Ok(PayloadMode::wifi(
                ssid.clone(),
                password.clone(),
                (*encryption).into(),
                *hidden,
            )),
            Command::Json { path } => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                PayloadMode::from_json(&json)
                    .with_context(|| format!("Invalid payload JSON in {}", path.display()))
            }
        }
    }
}

impl Args {
    fn export_config(&self) -> ExportConfig {
        ExportConfig::default()
            .with_size(self.size)
            .with_margin_fraction(self.margin)
            .with_background(self.background)
            .with_file_prefix(self.prefix.clone())
    }

    fn out_dir(&self) -> PathBuf {
        self.out_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    setup_logging(&args.log_level)?;

    info!("Starting QuickQR v{}", env!("CARGO_PKG_VERSION"));

    let mode = args.command.payload_mode().await?;
    let payload = mode.encode();

    if args.print_payload {
        println!("{}", payload);
    }

    if args.terminal {
        display_qr_code(&payload);
    }

    let style = SymbolStyle::default()
        .with_foreground(args.color)
        .with_overlay(inline_logo(args.logo.as_deref()).await);

    let platform = Arc::new(NativePlatform::new(args.out_dir()));
    let mut studio = QrStudio::new(platform, args.export_config())
        .context("Invalid export options")?
        .with_style(style);

    studio
        .set_mode(mode)
        .await
        .context("Failed to render QR symbol")?;

    match studio.export().await.context("Export failed")? {
        Some(artifact) => {
            println!(
                "Saved {}x{} PNG: {}",
                artifact.size,
                artifact.size,
                artifact.location.display()
            );
        }
        None => warn!("Nothing to export: no symbol rendered"),
    }

    Ok(())
}

/// Resolve the `--logo` option and embed its image
///
/// A logo that cannot be loaded is dropped with a warning; the symbol is then
/// rendered without an excavated centre.
async fn inline_logo(source: Option<&str>) -> Option<LogoOverlay> {
    let overlay = source.and_then(LogoOverlay::from_source)?;

    let fetcher = match LogoFetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            warn!("Logo disabled: {}", e);
            return None;
        }
    };

    match fetcher.inline(overlay.clone()).await {
        Ok(inlined) => Some(inlined),
        Err(e) => {
            warn!("Logo {} disabled: {}", overlay.href, e);
            None
        }
    }
}

/// Setup logging with tracing
fn setup_logging(level: &str) -> Result<()> {
    let log_level = level.parse::<Level>().unwrap_or(Level::INFO);

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

/// Display the symbol in the terminal
fn display_qr_code(payload: &str) {
    println!("============================================");

    match render_terminal(payload) {
        Ok(qr) => println!("{}", qr),
        Err(e) => {
            warn!("Failed to generate QR code: {}", e);
            println!("QR code generation failed - see logs");
        }
    }

    println!("============================================");
    println!("Payload: {}", payload);
    println!("============================================");
}
