use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use meetpages::{PipelineConfig, ToolchainConfig};

/// Generate one page (LaTeX, PDF and images) per meeting date from the subteam CSV logs.
#[derive(Debug, Parser)]
#[command(name = "meetpages", version, about)]
struct Args {
    /// Directory containing business.csv, building.csv, coding.csv and wholeTeam.csv
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory pages are written to (created if missing)
    #[arg(long, default_value = "pages")]
    output_dir: PathBuf,

    /// Page template with {{date}}, {{attendees}} and {{sections}} slots
    #[arg(long)]
    template: Option<PathBuf>,

    /// Typesetting command
    #[arg(long, default_value = "pdflatex")]
    typesetter: String,

    /// Rasterizing command
    #[arg(long, default_value = "pdftoppm")]
    rasterizer: String,

    /// Image format passed to the rasterizer
    #[arg(long, default_value = "png")]
    image_format: String,

    /// Wait for the rasterizer to finish each page
    #[arg(long)]
    wait_for_rasterizer: bool,

    /// Only write .tex sources; do not run the typesetter or rasterizer
    #[arg(long)]
    skip_render: bool,

    /// Log level (trace|debug|info|warn|error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> PipelineConfig {
        PipelineConfig {
            data_dir: self.data_dir,
            output_dir: self.output_dir,
            template: self.template,
            toolchain: ToolchainConfig {
                typesetter: self.typesetter,
                rasterizer: self.rasterizer,
                image_format: self.image_format,
                wait_for_rasterizer: self.wait_for_rasterizer,
                ..Default::default()
            },
            skip_render: self.skip_render,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _logger = flexi_logger::Logger::try_with_env_or_str(&args.log_level)
        .with_context(|| format!("invalid log level `{}`", args.log_level))?
        .log_to_stderr()
        .start()
        .context("failed to start logger")?;

    let config = args.into_config();
    let summary = meetpages::run(&config).with_context(|| {
        format!(
            "failed to generate pages from {} into {}",
            config.data_dir.display(),
            config.output_dir.display()
        )
    })?;

    println!(
        "meetpages: {} records, {} pages written to {}",
        summary.records,
        summary.artifacts.len(),
        config.output_dir.display()
    );
    Ok(())
}
