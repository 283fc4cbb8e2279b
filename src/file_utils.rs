use crate::config::SUPPORTED_IMAGE_EXTENSIONS;
use image::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Bytes read from a file to recognise its format.
const SNIFF_LEN: u64 = 32;

/// Returns true if the path names a file that is an image, either by its
/// extension or by its content.
pub fn is_supported_image(path: &Path) -> bool {
    path.is_file() && (has_supported_extension(path) || sniff_file(path).is_some())
}

pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_str.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Sniffs the image format of an in-memory buffer, limited to the formats
/// the app is built with.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    let format = image::guess_format(bytes).ok()?;
    format
        .extensions_str()
        .iter()
        .any(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(ext))
        .then_some(format)
}

/// Sniffs the image format of a file from its first bytes.
pub fn sniff_file(path: &Path) -> Option<ImageFormat> {
    let mut header = Vec::new();
    File::open(path)
        .ok()?
        .take(SNIFF_LEN)
        .read_to_end(&mut header)
        .ok()?;
    sniff_format(&header)
}

/// Extracts candidate file paths from clipboard text.
///
/// File managers put either plain paths or a `text/uri-list` style list of
/// `file://` URIs on the clipboard, one per line.
pub fn paths_from_clipboard_text(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match line.strip_prefix("file://") {
            // file://host/path is not supported, only the empty-host form
            Some(rest) if rest.starts_with('/') => Some(PathBuf::from(percent_decode(rest))),
            Some(_) => None,
            None => Some(PathBuf::from(line)),
        })
        .collect()
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
