//! Batch driver: every meeting date, oldest first, composed and emitted in turn

use crate::dates::distinct_dates;
use crate::error::{Error, Result};
use crate::records;
use crate::rendering::compose::compose;
use crate::rendering::raster::{emit, Artifact};
use crate::rendering::template::PageTemplate;
use crate::toolchain::{NoopToolchain, SystemToolchain, Toolchain};
use crate::PipelineConfig;

/// What a run produced
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of records loaded across all categories
    pub records: usize,
    /// One artifact per meeting date, in generation order
    pub artifacts: Vec<Artifact>,
}

/// Run the pipeline with the toolchain implied by `config`.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    if config.skip_render {
        run_with(config, &NoopToolchain::new())
    } else {
        let tools = SystemToolchain::new(config.toolchain.clone())?;
        run_with(config, &tools)
    }
}

/// Run the pipeline against an explicit toolchain.
///
/// The first failure aborts the run; pages already emitted stay on disk.
pub fn run_with(config: &PipelineConfig, toolchain: &dyn Toolchain) -> Result<RunSummary> {
    let template = match &config.template {
        Some(path) => PageTemplate::from_file(path)?,
        None => PageTemplate::builtin(),
    };

    let records = records::load(&config.data_dir)?;
    let dates = distinct_dates(&records);
    log::info!(
        "loaded {} records from {} covering {} meeting dates",
        records.len(),
        config.data_dir.display(),
        dates.len()
    );

    std::fs::create_dir_all(&config.output_dir).map_err(|e| Error::io(&config.output_dir, e))?;

    let mut summary = RunSummary {
        records: records.len(),
        artifacts: Vec::with_capacity(dates.len()),
    };
    for date in dates {
        let page = compose(&records, date, &template);
        summary.artifacts.push(emit(&page, &config.output_dir, toolchain)?);
    }
    Ok(summary)
}
