use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vartrack_core::{GenomeRange, InMemoryReferenceSource, InMemoryVariantSource};

mod config;
mod locus;
mod panel;

use config::Config;
use locus::{zoom_by_factor, PartialRange};
use panel::TrackPanel;

#[derive(Parser)]
#[command(name = "vartrack")]
#[command(about = "vartrack - variant, allele-frequency and reference track rendering")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./vartrack.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the tracks for a region to SVG
    Render {
        /// Variant calls (VCF, optionally gzipped)
        #[arg(long)]
        vcf: PathBuf,

        /// Reference sequence (FASTA, optionally gzipped)
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Region, e.g. "17:7,577,100-7,577,150" or "chr17:7577120"
        #[arg(long)]
        region: String,

        /// Zoom factor applied around the region centre (>1 zooms out)
        #[arg(long)]
        zoom: Option<f64>,

        /// Image width in pixels
        #[arg(long)]
        width: Option<f64>,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the features under a pixel of the rendered SVG as JSON
    Pick {
        /// Variant calls (VCF, optionally gzipped)
        #[arg(long)]
        vcf: PathBuf,

        /// Reference sequence (FASTA, optionally gzipped)
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Region, e.g. "17:7,577,100-7,577,150" or "chr17:7577120"
        #[arg(long)]
        region: String,

        /// Zoom factor applied around the region centre (>1 zooms out)
        #[arg(long)]
        zoom: Option<f64>,

        /// Image width in pixels
        #[arg(long)]
        width: Option<f64>,

        /// Pixel x in the rendered document
        #[arg(short)]
        x: f64,

        /// Pixel y in the rendered document
        #[arg(short)]
        y: f64,
    },

    /// Print an example configuration file
    Config {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Render { vcf, reference, region, zoom, width, output } => {
            let config = Config::load(cli.config.as_deref())?;
            cmd_render(config, vcf, reference, region, zoom, width, output)
        }
        Commands::Pick { vcf, reference, region, zoom, width, x, y } => {
            let config = Config::load(cli.config.as_deref())?;
            cmd_pick(config, vcf, reference, region, zoom, width, x, y)
        }
        Commands::Config { output } => cmd_config(output),
    }
}

fn load_panel(config: Config, vcf: &Path, reference: Option<&Path>) -> Result<TrackPanel> {
    log::info!("Loading variants from {}", vcf.display());
    let variants = InMemoryVariantSource::from_vcf(vcf)?;
    log::info!("Loaded {} variant(s)", variants.len());

    let reference = match reference {
        Some(path) => {
            log::info!("Loading reference from {}", path.display());
            Some(InMemoryReferenceSource::from_fasta(path)?)
        }
        None => None,
    };

    Ok(TrackPanel::new(variants, reference, config))
}

fn resolve_region(panel: &TrackPanel, region: &str, zoom: Option<f64>) -> Result<GenomeRange> {
    let partial: PartialRange = region
        .parse()
        .with_context(|| format!("Invalid region: {}", region))?;
    let range = partial.complete(&panel.contigs());
    Ok(match zoom {
        Some(factor) => zoom_by_factor(&range, factor),
        None => range,
    })
}

fn cmd_render(
    config: Config,
    vcf: PathBuf,
    reference: Option<PathBuf>,
    region: String,
    zoom: Option<f64>,
    width: Option<f64>,
    output: PathBuf,
) -> Result<()> {
    let width = width.unwrap_or(config.render.width);
    let mut panel = load_panel(config, &vcf, reference.as_deref())?;
    let range = resolve_region(&panel, &region, zoom)?;
    log::info!("Rendering {} at {} px", range, width);

    let document = panel
        .render_svg(&range, width)?
        .context("Nothing to render")?;
    svg::save(&output, &document)
        .with_context(|| format!("Failed to write SVG to {}", output.display()))?;

    log::info!("Output: {}", output.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_pick(
    config: Config,
    vcf: PathBuf,
    reference: Option<PathBuf>,
    region: String,
    zoom: Option<f64>,
    width: Option<f64>,
    x: f64,
    y: f64,
) -> Result<()> {
    let width = width.unwrap_or(config.render.width);
    let panel = load_panel(config, &vcf, reference.as_deref())?;
    let range = resolve_region(&panel, &region, zoom)?;

    match panel.pick(&range, width, x, y)? {
        Some(report) => {
            log::debug!("{} object(s) in the {:?} track", report.objects.len(), report.track);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        None => {
            log::info!("({}, {}) is outside every track", x, y);
            println!("null");
        }
    }
    Ok(())
}

fn cmd_config(output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            Config::default().save_to_file(&path)?;
            log::info!("Wrote example configuration to {}", path.display());
        }
        None => print!("{}", Config::example_toml()?),
    }
    Ok(())
}
