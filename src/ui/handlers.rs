//! Event handlers for UI callbacks.
//!
//! Sets up all Logic callbacks (open_image, paste_image, threshold_changed,
//! morphology_changed) using the appropriate threading model for each
//! operation type.

use crate::config::SUPPORTED_IMAGE_EXTENSIONS;
use crate::params::MorphologyOp;
use crate::services::{ClipboardError, ClipboardImage, ClipboardService};
use crate::state::{AppState, PreviewKind};
use crate::ui::image_display::{ImageOrigin, load_and_display_image};
use crate::ui::preview::request_preview;
use log::{info, warn};
use rfd::AsyncFileDialog;
use slint::ComponentHandle;

/// Sets up all UI event handlers for the application.
///
/// Takes the UI handle and shared application state, then registers
/// callbacks for image selection, paste and slider changes.
pub fn setup_handlers(ui: &crate::AppWindow, app_state: AppState) {
    if let Ok(preview) = app_state.preview.lock() {
        crate::ui::set_parameter_info(ui, preview.threshold(), preview.morphology());
    }

    // Image selection handler
    // Uses slint::spawn_local because AsyncFileDialog must run on the main thread
    ui.global::<crate::Logic>().on_open_image({
        let ui_handle = ui.as_weak();
        let app_state = app_state.clone();
        move || {
            let ui_handle = ui_handle.clone();
            let app_state = app_state.clone();
            let _ = slint::spawn_local(async move {
                let Some(file_handle) = AsyncFileDialog::new()
                    .add_filter("Images", &SUPPORTED_IMAGE_EXTENSIONS)
                    .pick_file()
                    .await
                else {
                    info!("No file selected");
                    return;
                };

                load_and_display_image(
                    ui_handle,
                    ImageOrigin::Path(file_handle.path().to_path_buf()),
                    "Failed to load image",
                    app_state,
                );
            });
        }
    });

    // Paste handler
    // Clipboard reads may block on the owning application, so run them on rayon
    ui.global::<crate::Logic>().on_paste_image({
        let ui_handle = ui.as_weak();
        let app_state = app_state.clone();
        move || {
            let ui_handle = ui_handle.clone();
            let app_state = app_state.clone();
            rayon::spawn(move || {
                let origin = match ClipboardService::new().read_image() {
                    Ok(ClipboardImage::Pixels {
                        width,
                        height,
                        bytes,
                    }) => ImageOrigin::Pixels {
                        width,
                        height,
                        bytes,
                    },
                    Ok(ClipboardImage::File(path)) => ImageOrigin::Path(path),
                    Err(ClipboardError::NoImage) => {
                        warn!("Paste ignored: clipboard does not contain an image");
                        return;
                    }
                    Err(error) => {
                        warn!("Paste ignored: {}", error);
                        return;
                    }
                };

                let _ = slint::invoke_from_event_loop(move || {
                    load_and_display_image(ui_handle, origin, "Failed to paste image", app_state);
                });
            });
        }
    });

    // Threshold sliders
    ui.global::<crate::Logic>().on_threshold_changed({
        let ui_handle = ui.as_weak();
        let app_state = app_state.clone();
        move |low, high| {
            let changed = app_state
                .preview
                .lock()
                .map(|mut preview| preview.set_threshold(low, high))
                .unwrap_or(false);
            if changed {
                request_preview(ui_handle.clone(), &app_state, PreviewKind::Threshold);
            }
        }
    });

    // Morphology sliders and operator toggle
    ui.global::<crate::Logic>().on_morphology_changed({
        let ui_handle = ui.as_weak();
        let app_state = app_state.clone();
        move |kernel_size, iterations, erode| {
            let changed = app_state
                .preview
                .lock()
                .map(|mut preview| {
                    preview.set_morphology(
                        kernel_size,
                        iterations,
                        MorphologyOp::from_erode_flag(erode),
                    )
                })
                .unwrap_or(false);
            if changed {
                request_preview(ui_handle.clone(), &app_state, PreviewKind::Morphology);
            }
        }
    });
}
