use std::error::Error;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;

use gri_report::{ReportBuilder, ReportConfig, ReportPayload};

mod sample;

/// Renders GRI 306 waste reports to PDF.
///
/// Fonts and images are read from `--assets`, the `GRI_REPORT_ASSETS_DIR`
/// environment variable, or an `assets/` directory next to the executable.
/// Missing assets fall back to built-in fonts and empty image regions.
#[derive(Parser)]
#[command(author, version, about = "Command-line renderer for GRI waste reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct RenderOptions {
    /// Directory holding `fonts/` and `images/`.
    #[arg(long, env = "GRI_REPORT_ASSETS_DIR")]
    assets: Option<PathBuf>,

    /// JSON file with organisation name, titles and contact details.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Add a PDF outline with one entry per section.
    #[cfg(feature = "bookmarks")]
    #[arg(long)]
    bookmarks: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a report payload read from a JSON file.
    Render {
        /// Report payload, optionally wrapped in `data` envelopes.
        #[arg(long, short)]
        input: PathBuf,

        #[arg(long, short)]
        output: PathBuf,

        #[command(flatten)]
        options: RenderOptions,
    },

    /// Render a generated sample payload.
    Sample {
        #[arg(long, short, default_value = "sample_report.pdf")]
        output: PathBuf,

        /// Number of waste categories and spill records to generate.
        #[arg(long, default_value_t = 12)]
        rows: usize,

        #[command(flatten)]
        options: RenderOptions,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("gri_report=info"))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            options,
        } => load_payload(&input).and_then(|payload| render(&payload, &output, &options)),
        Commands::Sample {
            output,
            rows,
            options,
        } => ReportPayload::from_value(sample::payload(rows))
            .map_err(Into::into)
            .and_then(|payload| render(&payload, &output, &options)),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn load_payload(path: &Path) -> Result<ReportPayload, Box<dyn Error>> {
    let file = File::open(path)?;
    Ok(ReportPayload::from_reader(BufReader::new(file))?)
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(BufReader::new(file))?)
        }
        None => Ok(ReportConfig::default()),
    }
}

fn render(
    payload: &ReportPayload,
    output: &Path,
    options: &RenderOptions,
) -> Result<(), Box<dyn Error>> {
    let mut builder = ReportBuilder::new().with_config(load_config(options.config.as_deref())?);
    if let Some(assets) = &options.assets {
        builder = builder.with_asset_dir(assets);
    }
    #[cfg(feature = "bookmarks")]
    {
        builder = builder.with_bookmarks(options.bookmarks);
    }

    let report = builder.render(payload)?;
    fs::write(output, &report.bytes)?;
    info!(
        "Wrote {} ({} pages) to {}",
        builder.config().report_title,
        report.page_count,
        output.display()
    );
    for section in &report.sections {
        info!("  page {:>3}: {}", section.page + 1, section.title);
    }
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
