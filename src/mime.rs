use std::path::Path;

pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Detects the media type of an uploaded document.
///
/// Magic bytes win over the file name. ZIP containers are told apart by
/// extension since Office formats share the same signature.
pub fn detect_document_mime(bytes: &[u8], file_name: &str) -> &'static str {
    match bytes {
        [0x25, 0x50, 0x44, 0x46, ..] => "application/pdf",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x47, 0x49, 0x46, 0x38, ..] => "image/gif",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        [0x50, 0x4B, 0x03, 0x04, ..] => mime_from_extension(file_name).unwrap_or("application/zip"),
        _ => mime_from_extension(file_name).unwrap_or_else(|| {
            tracing::warn!(
                "Unrecognized document format for '{}' (first 4 bytes: {:02X?}), falling back to {}",
                file_name,
                &bytes[..bytes.len().min(4)],
                FALLBACK_MIME
            );
            FALLBACK_MIME
        }),
    }
}

fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();

    let mime = match extension.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "doc" => "application/msword",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}
