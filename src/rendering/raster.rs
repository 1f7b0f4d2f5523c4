//! Emit stage: write the page source, typeset it, rasterize the document

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::rendering::Page;
use crate::toolchain::Toolchain;

/// Files produced (or expected) for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub stem: String,
    pub source_path: PathBuf,
    /// Where the typesetter is expected to leave the document
    pub document_path: PathBuf,
}

/// Write `page` into `output_dir` and run it through `toolchain`.
///
/// The typesetter is waited on before the rasterizer starts. Tools that exit
/// non-zero are not reported as errors; tools that cannot be launched are.
pub fn emit(page: &Page, output_dir: &Path, toolchain: &dyn Toolchain) -> Result<Artifact> {
    let stem = page.file_stem();
    let source_name = format!("{stem}.tex");
    let document_name = format!("{stem}.pdf");
    let source_path = output_dir.join(&source_name);

    write_source(&source_path, &page.source)?;
    log::info!("wrote {} ({} attendees)", source_path.display(), page.attendees.len());

    toolchain.typeset(output_dir, &source_name)?;
    toolchain.rasterize(output_dir, &document_name, &stem)?;

    Ok(Artifact {
        document_path: output_dir.join(&document_name),
        source_path,
        stem,
    })
}

/// Replace `path` with `contents` atomically (temp file in the same dir, then rename).
pub fn write_source(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.flush())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
