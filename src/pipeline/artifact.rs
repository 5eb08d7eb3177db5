use crate::error::ExportError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The finished PDF plus the pagination facts it was produced with.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub page_breaks: usize,
    pub rows_rendered: usize,
    /// Data rows on each page, in page order.
    pub page_rows: Vec<usize>,
}

impl ExportArtifact {
    /// Writes the PDF into `dir` under its file name.
    ///
    /// The bytes go to a temporary file in the same directory that is then
    /// renamed over the target, so a failed write never leaves a partial PDF.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ExportError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&self.bytes)?;
        tmp.flush()?;

        let target = dir.join(&self.file_name);
        tmp.persist(&target).map_err(|e| e.error)?;
        log::info!("Wrote {} ({} bytes)", target.display(), self.bytes.len());
        Ok(target)
    }
}
