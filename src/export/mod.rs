//! Word-compatible export of rendered lesson plans
//!
//! Wraps rendered markup in a namespaced HTML document that word processors
//! open as a Word file, and hands it to an [`ExportSink`] for delivery.

pub mod fs;
pub mod mock;

pub use fs::FsExportSink;
pub use mock::MockExportSink;

use crate::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const FILE_NAME_PREFIX: &str = "ke-hoach-bai-giang-";
pub const FILE_EXTENSION: &str = ".docx";

/// UTF-8 byte-order mark; lets the word processor pick the right encoding.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const DOCUMENT_HEADER: &str = "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
xmlns:w='urn:schemas-microsoft-com:office:word' \
xmlns='http://www.w3.org/TR/REC-html40'>\
<head><meta charset='utf-8'><title>Kế hoạch bài giảng</title></head><body>";
const DOCUMENT_FOOTER: &str = "</body></html>";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A finished document ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocExport {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Delivers the document and returns where it ended up.
    async fn deliver(&self, export: &DocExport) -> Result<PathBuf>;
}

/// Each whitespace run becomes one hyphen, then the whole thing is lowercased.
pub fn slugify(topic: &str) -> String {
    WHITESPACE_RUN.replace_all(topic, "-").to_lowercase()
}

pub fn export_file_name(topic: &str) -> String {
    format!("{}{}{}", FILE_NAME_PREFIX, slugify(topic), FILE_EXTENSION)
}

/// Builds the export, or `None` when there is nothing to export.
pub fn build_export(markup: &str, topic: &str) -> Option<DocExport> {
    if markup.is_empty() || topic.is_empty() {
        return None;
    }

    let mut bytes = Vec::with_capacity(
        UTF8_BOM.len() + DOCUMENT_HEADER.len() + markup.len() + DOCUMENT_FOOTER.len(),
    );
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(DOCUMENT_HEADER.as_bytes());
    bytes.extend_from_slice(markup.as_bytes());
    bytes.extend_from_slice(DOCUMENT_FOOTER.as_bytes());

    Some(DocExport {
        file_name: export_file_name(topic),
        media_type: DOCX_MEDIA_TYPE,
        bytes,
    })
}

/// Builds and delivers the export. Returns `Ok(None)` without touching the
/// sink when the markup or topic is empty.
pub async fn export_plan(
    sink: &dyn ExportSink,
    markup: &str,
    topic: &str,
) -> Result<Option<PathBuf>> {
    let Some(export) = build_export(markup, topic) else {
        tracing::debug!("Nothing to export (empty content or topic)");
        return Ok(None);
    };

    let location = sink.deliver(&export).await?;
    tracing::info!("Exported lesson plan to {}", location.display());
    Ok(Some(location))
}
