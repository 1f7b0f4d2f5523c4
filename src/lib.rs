//! Meeting pages
//!
//! Turns subteam meeting-log spreadsheets (Business, Build, Coding and
//! whole-team CSV exports) into one formatted LaTeX page per meeting date,
//! then drives `pdflatex` and `pdftoppm` to produce a PDF and page images for
//! each.
//!
//! # Pipeline
//!
//! - **Records**: the four CSV sources are loaded into a [`RecordSet`]
//! - **Dates**: every distinct meeting date is collected, oldest first
//! - **Sessions**: each record on a date is labelled `Morning Group N` / `Afternoon Group N`
//! - **Compose**: the page template is filled with the date, attendees and section blocks
//! - **Emit**: the source is written and handed to the external [`Toolchain`]
//!
//! # Example
//!
//! ```no_run
//! use meetpages::PipelineConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig {
//!     data_dir: "data".into(),
//!     output_dir: "pages".into(),
//!     skip_render: true,
//!     ..Default::default()
//! };
//!
//! let summary = meetpages::run(&config)?;
//! for artifact in &summary.artifacts {
//!     println!("wrote {}", artifact.source_path.display());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod dates;
pub mod error;
pub mod pipeline;
pub mod records;
pub mod rendering;
pub mod sessions;
pub mod toolchain;

pub use dates::{distinct_dates, MeetingDate};
pub use error::{Error, Result};
pub use pipeline::{run, run_with, RunSummary};
pub use records::{Category, Record, RecordSet, Section, CATEGORY_ORDER, SECTION_ORDER};
pub use rendering::compose::compose;
pub use rendering::raster::{emit, Artifact};
pub use rendering::template::PageTemplate;
pub use rendering::Page;
pub use sessions::{label_sessions, resolve, SessionLabel, TimeOfDay};
pub use toolchain::{NoopToolchain, SystemToolchain, Toolchain};

/// Configuration for a pipeline run
///
/// Defaults mirror the layout the tool was built around: CSVs under `data/`,
/// pages written to `pages/`, the built-in template and the system
/// `pdflatex` / `pdftoppm`.
///
/// # Examples
///
/// ```
/// let cfg = meetpages::PipelineConfig::default();
/// assert_eq!(cfg.output_dir, std::path::PathBuf::from("pages"));
/// assert!(!cfg.skip_render);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the four category CSV files
    pub data_dir: PathBuf,
    /// Directory pages are written to; also the working directory of the tools
    pub output_dir: PathBuf,
    /// Custom page template, `None` for the built-in one
    pub template: Option<PathBuf>,
    /// External tool settings
    pub toolchain: ToolchainConfig,
    /// Only write page sources; never launch the toolchain
    pub skip_render: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("pages"),
            template: None,
            toolchain: ToolchainConfig::default(),
            skip_render: false,
        }
    }
}

/// Typesetter and rasterizer command lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    pub typesetter: String,
    /// Arguments placed before the source file name
    pub typesetter_args: Vec<String>,
    pub rasterizer: String,
    /// Arguments placed before the document name
    pub rasterizer_args: Vec<String>,
    /// Image format flag handed to the rasterizer (`png` becomes `-png`)
    pub image_format: String,
    /// Block until the rasterizer exits instead of leaving it running
    pub wait_for_rasterizer: bool,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            typesetter: "pdflatex".to_string(),
            typesetter_args: vec!["-interaction=nonstopmode".to_string()],
            rasterizer: "pdftoppm".to_string(),
            rasterizer_args: Vec::new(),
            image_format: "png".to_string(),
            wait_for_rasterizer: false,
        }
    }
}
