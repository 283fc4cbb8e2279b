//! Clipboard service for pasting images from the OS clipboard.
//!
//! Accepts either raw image data or a copied file (plain path or
//! `file://` URI) with a supported image extension.

use crate::file_utils;
use arboard::Clipboard;
use log::{debug, info};
use std::fmt;
use std::path::PathBuf;

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// The clipboard holds nothing that looks like an image.
    NoImage,
    /// Platform-specific error occurred.
    PlatformError(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoImage => write!(f, "Clipboard does not contain an image"),
            Self::PlatformError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// What was found on the clipboard.
#[derive(Debug)]
pub enum ClipboardImage {
    /// Raw RGBA8 pixels.
    Pixels {
        width: u32,
        height: u32,
        bytes: Vec<u8>,
    },
    /// A copied image file.
    File(PathBuf),
}

/// Service for managing clipboard operations.
pub struct ClipboardService;

impl ClipboardService {
    /// Creates a new clipboard service.
    pub fn new() -> Self {
        Self
    }

    /// Reads an image from the clipboard.
    pub fn read_image(&self) -> Result<ClipboardImage, ClipboardError> {
        let mut clipboard = Clipboard::new().map_err(|e| {
            ClipboardError::PlatformError(format!("Failed to access clipboard: {}", e))
        })?;

        match clipboard.get_image() {
            Ok(image) => {
                info!(
                    "Pasting {}x{} image from clipboard",
                    image.width, image.height
                );
                return Ok(ClipboardImage::Pixels {
                    width: image.width as u32,
                    height: image.height as u32,
                    bytes: image.bytes.into_owned(),
                });
            }
            Err(e) => debug!("No image data on clipboard: {}", e),
        }

        let text = clipboard.get_text().map_err(|e| {
            debug!("No text on clipboard: {}", e);
            ClipboardError::NoImage
        })?;

        Self::image_file_from_text(&text)
    }

    /// Picks the first supported image file named in clipboard text.
    fn image_file_from_text(text: &str) -> Result<ClipboardImage, ClipboardError> {
        file_utils::paths_from_clipboard_text(text)
            .into_iter()
            .find(|path| file_utils::is_supported_image(path))
            .map(|path| {
                info!("Pasting image file {}", path.display());
                ClipboardImage::File(path)
            })
            .ok_or(ClipboardError::NoImage)
    }
}
