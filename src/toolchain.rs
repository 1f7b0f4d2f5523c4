//! External typesetting and rasterization tools
//!
//! `Toolchain` is the seam between the pipeline and the processes it drives.
//! `SystemToolchain` launches the real binaries; `NoopToolchain` records what
//! would have been launched, for tests and for `--skip-render` runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::ToolchainConfig;

/// What happened when a tool was invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolRun {
    /// The tool ran to completion; `code` is `None` when killed by a signal
    Completed { code: Option<i32> },
    /// The tool was spawned and left running
    Detached,
    /// Nothing was launched
    Skipped,
}

pub trait Toolchain {
    /// Typeset `source` (a file name inside `work_dir`) into a document.
    fn typeset(&self, work_dir: &Path, source: &str) -> Result<ToolRun>;

    /// Rasterize `document` into images named after `stem`.
    fn rasterize(&self, work_dir: &Path, document: &str, stem: &str) -> Result<ToolRun>;
}

/// Runs the configured binaries as subprocesses.
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    config: ToolchainConfig,
}

impl SystemToolchain {
    pub fn new(config: ToolchainConfig) -> Result<Self> {
        if config.typesetter.trim().is_empty() {
            return Err(Error::Config("typesetter command is empty".into()));
        }
        if config.rasterizer.trim().is_empty() {
            return Err(Error::Config("rasterizer command is empty".into()));
        }
        if config.image_format.trim().is_empty() {
            return Err(Error::Config("image format is empty".into()));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }
}

impl Toolchain for SystemToolchain {
    fn typeset(&self, work_dir: &Path, source: &str) -> Result<ToolRun> {
        let mut args = self.config.typesetter_args.clone();
        args.push(source.to_string());
        run_tool(&self.config.typesetter, &args, work_dir, true)
    }

    fn rasterize(&self, work_dir: &Path, document: &str, stem: &str) -> Result<ToolRun> {
        let mut args = self.config.rasterizer_args.clone();
        args.push(document.to_string());
        args.push(stem.to_string());
        args.push(format!("-{}", self.config.image_format));
        run_tool(&self.config.rasterizer, &args, work_dir, self.config.wait_for_rasterizer)
    }
}

fn run_tool(tool: &str, args: &[String], work_dir: &Path, wait: bool) -> Result<ToolRun> {
    log::debug!("running `{} {}` in {}", tool, args.join(" "), work_dir.display());

    let launch_err = |source| Error::ExternalTool {
        tool: tool.to_string(),
        source,
    };
    let mut child = Command::new(tool)
        .args(args)
        .current_dir(work_dir)
        .stdin(Stdio::null())
        .spawn()
        .map_err(launch_err)?;

    if !wait {
        return Ok(ToolRun::Detached);
    }

    let status = child.wait().map_err(launch_err)?;
    if !status.success() {
        // Exit status is not treated as failure; the next stage decides for itself.
        log::warn!("`{}` exited with {} in {}", tool, status, work_dir.display());
    }
    Ok(ToolRun::Completed {
        code: status.code(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Typesetter,
    Rasterizer,
}

/// A recorded toolchain call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub kind: ToolKind,
    pub work_dir: PathBuf,
    pub args: Vec<String>,
}

/// Records invocations instead of launching anything
#[derive(Debug, Default)]
pub struct NoopToolchain {
    calls: Mutex<Vec<Invocation>>,
}

impl NoopToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, kind: ToolKind, work_dir: &Path, args: &[&str]) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Invocation {
                kind,
                work_dir: work_dir.to_path_buf(),
                args: args.iter().map(|s| s.to_string()).collect(),
            });
    }
}

impl Toolchain for NoopToolchain {
    fn typeset(&self, work_dir: &Path, source: &str) -> Result<ToolRun> {
        self.record(ToolKind::Typesetter, work_dir, &[source]);
        Ok(ToolRun::Skipped)
    }

    fn rasterize(&self, work_dir: &Path, document: &str, stem: &str) -> Result<ToolRun> {
        self.record(ToolKind::Rasterizer, work_dir, &[document, stem]);
        Ok(ToolRun::Skipped)
    }
}
