//! Document encoding for completion requests
//!
//! Reads uploaded documents from disk and turns them into base64 parts with a
//! media type. A batch is all-or-nothing: one unreadable file fails the whole
//! batch so a request is never sent with a partial set of documents.

use crate::mime::detect_document_mime;
use crate::models::{EncodedPart, UploadedFile};
use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::debug;

impl UploadedFile {
    /// Reads a document from disk and tags it with its detected media type.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw_bytes = tokio::fs::read(path).await.map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = detect_document_mime(&raw_bytes, &name).to_string();

        debug!(
            "Loaded {} ({} bytes, {})",
            path.display(),
            raw_bytes.len(),
            mime_type
        );

        Ok(Self {
            name,
            mime_type,
            raw_bytes,
        })
    }
}

pub fn encode_file(file: &UploadedFile) -> EncodedPart {
    let base64_data = STANDARD.encode(&file.raw_bytes);
    debug!("Encoded {} → {} bytes base64", file.name, base64_data.len());

    EncodedPart {
        mime_type: file.mime_type.clone(),
        base64_data,
    }
}

/// Loads and encodes every path concurrently, preserving input order.
pub async fn encode_paths(paths: &[PathBuf]) -> Result<Vec<EncodedPart>> {
    let parts = try_join_all(paths.iter().map(|path| async move {
        let file = UploadedFile::load(path).await?;
        Ok::<_, Error>(encode_file(&file))
    }))
    .await?;

    debug!("Encoded {} documents", parts.len());
    Ok(parts)
}
