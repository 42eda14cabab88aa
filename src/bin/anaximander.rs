use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "anaximander", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the color domain and legend of every layer as JSON.
    Domain(DomainArgs),
    /// Write one raster layer, colored and clipped, as a PNG.
    Raster(RasterArgs),
}

#[derive(Parser, Debug)]
struct DomainArgs {
    /// Input map document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of color bar sections for continuous layers.
    #[arg(long, default_value_t = 10)]
    sections: usize,

    /// Color bar length in pixels.
    #[arg(long, default_value_t = 200.0)]
    legend_length: f64,

    /// Decimals in numeric legend labels.
    #[arg(long, default_value_t = 1)]
    digits: usize,
}

#[derive(Parser, Debug)]
struct RasterArgs {
    /// Input map document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Name of the raster layer to color.
    #[arg(long)]
    layer: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Serialize)]
struct LayerReport {
    #[serde(flatten)]
    domain: anaximander::LayerDomain,
    legend: Option<anaximander::Legend>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Domain(args) => cmd_domain(args),
        Command::Raster(args) => cmd_raster(args),
    }
}

fn open_session(path: &std::path::Path) -> anyhow::Result<anaximander::MapSession> {
    anaximander::MapSession::open(path)
        .with_context(|| format!("open map document '{}'", path.display()))
}

fn cmd_domain(args: DomainArgs) -> anyhow::Result<()> {
    let session = open_session(&args.in_path)?;

    let mut reports = Vec::new();
    for masked in session.mask_all()? {
        let legend = session
            .legend(&masked, args.sections, args.legend_length, args.digits)
            .with_context(|| format!("build legend for layer '{}'", masked.name))?;
        reports.push(LayerReport {
            domain: masked,
            legend,
        });
    }

    let stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(stdout, &reports).context("write domain report")?;
    println!();
    Ok(())
}

fn cmd_raster(args: RasterArgs) -> anyhow::Result<()> {
    let session = open_session(&args.in_path)?;
    let (masked, img) = session
        .colorize_raster(&args.layer)
        .with_context(|| format!("color raster layer '{}'", args.layer))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} distinct values)",
        args.out.display(),
        masked.values
    );
    Ok(())
}
