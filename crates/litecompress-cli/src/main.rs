use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

use litecompress_core::config::{DEFAULT_MAX_SIZE_KB, DEFAULT_QUALITY};
use litecompress_core::encode::encode_png;
use litecompress_core::{
    CompressCallback, CompressConfig, CompressResult, ImageCompressor, OutputFormat,
};

#[derive(Parser, Debug)]
#[command(name = "litecompress")]
#[command(about = "Compress an image down toward a size threshold", long_about = None)]
#[command(version)]
struct Args {
    /// Input image (JPEG, PNG or WebP)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Size threshold in KB; inputs at or below it are left alone
    #[arg(long, value_name = "KB", default_value_t = DEFAULT_MAX_SIZE_KB)]
    max_size_kb: u64,

    /// Encoder quality (0-100, JPEG and WebP)
    #[arg(
        short,
        long,
        value_name = "QUALITY",
        default_value_t = DEFAULT_QUALITY as i32,
        allow_hyphen_values = true
    )]
    quality: i32,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Jpeg)]
    format: FormatArg,

    /// Run the compression on a background worker and report through callbacks
    #[arg(long = "async", default_value_t)]
    run_async: bool,

    /// Save the resulting image as PNG for inspection
    #[arg(long, value_name = "PATH")]
    preview: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, default_value_t)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Jpeg,
    Png,
    Webp,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Webp => OutputFormat::WebP,
        }
    }
}

impl Args {
    fn config(&self) -> Result<CompressConfig> {
        CompressConfig::builder()
            .max_size_kb(self.max_size_kb)
            .quality(self.quality)
            .format(self.format.into())
            .build()
            .context("invalid compression settings")
    }
}

/// Prints lifecycle events and keeps the outcome for the caller.
#[derive(Default)]
struct ReportingCallback {
    outcome: Option<Result<CompressResult, String>>,
}

impl CompressCallback for ReportingCallback {
    fn on_start(&mut self) {
        info!("Compression started");
    }

    fn on_success(&mut self, result: CompressResult) {
        self.outcome = Some(Ok(result));
    }

    fn on_error(&mut self, message: String) {
        self.outcome = Some(Err(message));
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

fn summarize(result: &CompressResult) -> String {
    let mut lines = vec![
        format!("Original:   {}", format_kb(result.original_size())),
        format!("Compressed: {}", format_kb(result.compressed_size())),
    ];
    if result.was_compressed() {
        lines.push(format!("Saved:      {:.1}%", result.compression_ratio()));
    } else {
        lines.push("Saved:      nothing (original kept)".to_string());
    }
    if let Some(message) = result.error_message() {
        lines.push(format!("Note:       {message}"));
    }
    lines.join("\n")
}

fn save_preview(result: &CompressResult, path: &Path) -> Result<()> {
    let image = result
        .image()
        .context("no image to preview")?;
    let png = encode_png(image).context("failed to encode preview")?;
    std::fs::write(path, png)
        .with_context(|| format!("failed to write preview to {}", path.display()))?;
    debug!("Preview written to {}", path.display());
    Ok(())
}

fn compress_in_background(
    compressor: &ImageCompressor,
    input: &Path,
) -> Result<Result<CompressResult, String>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let mut callback = ReportingCallback::default();
    runtime.block_on(compressor.compress_async(input, &mut callback));

    callback
        .outcome
        .context("compression finished without reporting an outcome")
}

fn run(args: Args) -> Result<bool> {
    let config = args.config()?;
    debug!("Using {:?}", config);
    let compressor = ImageCompressor::new(config);

    let outcome = if args.run_async {
        compress_in_background(&compressor, &args.input)?
    } else {
        let result = compressor.compress(args.input.as_path());
        if result.is_success() {
            Ok(result)
        } else {
            Err(result
                .error_message()
                .unwrap_or("Compression failed")
                .to_string())
        }
    };

    match outcome {
        Ok(result) => {
            println!("{}", summarize(&result));
            if let Some(path) = &args.preview {
                save_preview(&result, path)?;
            }
            Ok(true)
        }
        Err(message) => {
            eprintln!("Error: {message}");
            Ok(false)
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if run(args)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
