use super::{DocExport, ExportSink};
use crate::{Error, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes exported documents into a local directory.
pub struct FsExportSink {
    output_dir: PathBuf,
}

impl FsExportSink {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Stages the bytes in a temporary file next to the target, then renames
    /// it into place. The temporary is removed if anything fails before the
    /// rename.
    fn write_sync(output_dir: PathBuf, export: DocExport) -> Result<PathBuf> {
        std::fs::create_dir_all(&output_dir)?;
        let target = output_dir.join(&export.file_name);

        let mut staged = tempfile::NamedTempFile::new_in(&output_dir)?;
        staged.write_all(&export.bytes)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&target)
            .map_err(|e| Error::Io(e.error))?;

        Ok(target)
    }
}

#[async_trait]
impl ExportSink for FsExportSink {
    async fn deliver(&self, export: &DocExport) -> Result<PathBuf> {
        tracing::debug!(
            "Writing {} ({} bytes, {}) to {}",
            export.file_name,
            export.bytes.len(),
            export.media_type,
            self.output_dir.display()
        );

        tokio::task::spawn_blocking({
            let output_dir = self.output_dir.clone();
            let export = export.clone();
            move || Self::write_sync(output_dir, export)
        })
        .await
        .map_err(|e| Error::Invariant(format!("Export task join error: {}", e)))?
    }
}
