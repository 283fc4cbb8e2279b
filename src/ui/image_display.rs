//! Image loading and display logic.
//!
//! Uses `rayon::spawn` for CPU-intensive image decoding operations,
//! then `slint::invoke_from_event_loop` to update UI from the background thread.

use crate::error::{AppError, Result};
use crate::image_loader;
use crate::state::{AppState, PreviewKind, SourceImage};
use crate::ui::preview::request_preview;
use log::{debug, warn};
use slint::ComponentHandle;
use std::path::PathBuf;

/// Where a new source image comes from.
pub enum ImageOrigin {
    Path(PathBuf),
    Pixels {
        width: u32,
        height: u32,
        bytes: Vec<u8>,
    },
}

impl ImageOrigin {
    fn label(&self) -> String {
        match self {
            ImageOrigin::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            ImageOrigin::Pixels { .. } => crate::config::CLIPBOARD_LABEL.to_string(),
        }
    }

    fn decode(self) -> Result<SourceImage> {
        let label = self.label();
        let pixels = match self {
            ImageOrigin::Path(path) => image_loader::load_image_blocking(&path)?,
            ImageOrigin::Pixels {
                width,
                height,
                bytes,
            } => image_loader::from_raw_rgba(width, height, bytes)?,
        };
        Ok(SourceImage::new(pixels, label))
    }
}

/// Makes a decoded image the current source and refreshes both previews.
fn update_ui_with_source(ui: &crate::AppWindow, app_state: &AppState, source: SourceImage) {
    let image = image_loader::create_slint_image(
        source.pixels.as_raw(),
        source.pixels.width(),
        source.pixels.height(),
    );
    crate::ui::set_source_info(
        ui,
        image,
        &source.label,
        source.pixels.width(),
        source.pixels.height(),
    );
    crate::ui::clear_error(ui);

    if let Ok(mut preview) = app_state.preview.lock() {
        preview.set_source(source);
    }

    request_preview(ui.as_weak(), app_state, PreviewKind::Threshold);
    request_preview(ui.as_weak(), app_state, PreviewKind::Morphology);
}

/// Decodes an image in a background thread and makes it the current source.
///
/// Unsupported files are ignored with a warning and leave the current image
/// in place. Decode failures are shown in the error line. When loads overlap,
/// only the most recently started one is applied.
pub fn load_and_display_image(
    ui: slint::Weak<crate::AppWindow>,
    origin: ImageOrigin,
    error_prefix: &'static str,
    app_state: AppState,
) {
    let Ok(load_ticket) = app_state.preview.lock().map(|mut preview| preview.begin_load()) else {
        return;
    };

    if let Some(ui) = ui.upgrade() {
        crate::ui::set_loading(&ui, true);
    }

    rayon::spawn(move || {
        let result = origin.decode();

        let _ = slint::invoke_from_event_loop(move || {
            let is_latest = app_state
                .preview
                .lock()
                .map(|preview| preview.is_latest_load(load_ticket))
                .unwrap_or(false);
            if !is_latest {
                debug!("Discarding load #{} superseded by a newer one", load_ticket);
                return;
            }

            if let Some(ui) = ui.upgrade() {
                crate::ui::set_loading(&ui, false);
                match result {
                    Ok(source) => update_ui_with_source(&ui, &app_state, source),
                    Err(AppError::UnsupportedFile(path)) => {
                        warn!("Ignoring unsupported file: {}", path.display());
                    }
                    Err(error) => {
                        crate::ui::set_error_with_prefix(&ui, error_prefix, error.to_string())
                    }
                }
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_file_name() {
        let origin = ImageOrigin::Path(PathBuf::from("/tmp/dir/cat.png"));
        assert_eq!(origin.label(), "cat.png");
        let origin = ImageOrigin::Pixels {
            width: 1,
            height: 1,
            bytes: vec![0; 4],
        };
        assert_eq!(origin.label(), "clipboard");
    }

    #[test]
    fn raw_pixels_decode_into_source() {
        let origin = ImageOrigin::Pixels {
            width: 2,
            height: 1,
            bytes: vec![1, 2, 3, 4, 5, 6, 7, 8],
        };
        let source = origin.decode().unwrap();
        assert_eq!(source.pixels.dimensions(), (2, 1));
        assert_eq!(source.label, "clipboard");
    }

    #[test]
    fn truncated_pixels_fail_to_decode() {
        let origin = ImageOrigin::Pixels {
            width: 2,
            height: 2,
            bytes: vec![0; 3],
        };
        assert!(origin.decode().is_err());
    }
}
