use std::path::Path;

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::blueprint::ReferenceImage;

static DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:([A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+)(?:;[^,;]+)*;base64,(.*)$")
        .expect("data URL regex")
});

pub fn detect_mime_type(data: &[u8]) -> Option<String> {
    if data.len() > 12 {
        let ftyp = &data[4..12];
        if ftyp.starts_with(b"ftyp") {
            let brand = &ftyp[4..8];
            if brand == b"heic" || brand == b"heif" || brand == b"hevc" {
                return Some("image/heic".to_string());
            }
        }
    }

    infer::get(data).map(|kind| kind.mime_type().to_string())
}

pub fn normalize_image_mime_type(mime_type: &str) -> String {
    let lowered = mime_type.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        "image/heif-sequence" => "image/heif".to_string(),
        _ => lowered,
    }
}

pub fn is_supported_image_mime(mime_type: &str) -> bool {
    matches!(
        mime_type,
        "image/png" | "image/jpeg" | "image/webp" | "image/heic" | "image/heif"
    )
}

pub fn image_from_bytes(bytes: &[u8], declared_mime: Option<&str>) -> Result<ReferenceImage> {
    if bytes.is_empty() {
        return Err(anyhow!("Reference image is empty"));
    }

    let declared = declared_mime
        .map(normalize_image_mime_type)
        .filter(|mime| !mime.is_empty());
    let detected = detect_mime_type(bytes).map(|mime| normalize_image_mime_type(&mime));

    let mime_type = [declared.as_deref(), detected.as_deref()]
        .into_iter()
        .flatten()
        .find(|mime| is_supported_image_mime(mime))
        .or(detected.as_deref())
        .or(declared.as_deref())
        .unwrap_or("application/octet-stream")
        .to_string();

    Ok(ReferenceImage {
        mime_type,
        data: general_purpose::STANDARD.encode(bytes),
    })
}

/// Parses a `data:<mime>;base64,<payload>` URL as produced by browser file readers.
pub fn parse_data_url(value: &str) -> Result<ReferenceImage> {
    let captures = DATA_URL_RE
        .captures(value.trim())
        .ok_or_else(|| anyhow!("Reference image is not a base64 data URL"))?;
    let declared = captures.get(1).map(|m| m.as_str());
    let payload = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .context("Reference image data URL has an invalid base64 payload")?;
    image_from_bytes(&bytes, declared)
}

pub async fn load_image_file(path: &Path) -> Result<ReferenceImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read reference image {}", path.display()))?;
    debug!(
        "Loaded reference image {} ({} bytes)",
        path.display(),
        bytes.len()
    );
    image_from_bytes(&bytes, None)
}

/// Accepts either a `data:` URL or a filesystem path.
pub async fn load_reference_image(source: &str) -> Result<ReferenceImage> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Reference image source is empty"));
    }
    if trimmed.starts_with("data:") {
        return parse_data_url(trimmed);
    }
    load_image_file(Path::new(trimmed)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
        b'R',
    ];

    #[test]
    fn sniffs_png_bytes() {
        assert_eq!(detect_mime_type(PNG_HEADER).as_deref(), Some("image/png"));
        let image = image_from_bytes(PNG_HEADER, None).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(
            general_purpose::STANDARD.decode(&image.data).unwrap(),
            PNG_HEADER
        );
    }

    #[test]
    fn data_url_keeps_declared_supported_type() {
        let encoded = general_purpose::STANDARD.encode(PNG_HEADER);
        let image = parse_data_url(&format!("data:image/jpg;base64,{encoded}")).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, encoded);
    }

    #[test]
    fn unsupported_declared_type_falls_back_to_sniffed() {
        let encoded = general_purpose::STANDARD.encode(PNG_HEADER);
        let image = parse_data_url(&format!("data:text/plain;base64,{encoded}")).unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn rejects_malformed_data_urls() {
        assert!(parse_data_url("data:image/png,raw-bytes").is_err());
        assert!(parse_data_url("data:image/png;base64,@@@").is_err());
        assert!(parse_data_url("data:image/png;base64,").is_err());
    }

    #[test]
    fn mime_support_matches_gemini_image_inputs() {
        assert!(is_supported_image_mime("image/webp"));
        assert!(!is_supported_image_mime("image/gif"));
        assert_eq!(normalize_image_mime_type(" IMAGE/JPG "), "image/jpeg");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let err = load_reference_image("/definitely/not/here.png").await;
        assert!(err.is_err());
    }
}
