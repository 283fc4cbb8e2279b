//! Helper functions to set multiple ViewState properties in a grouped manner.

use crate::params::{MorphologyOp, MorphologyParams, ThresholdParams};
use crate::state::PreviewKind;
use log::error;
use slint::ComponentHandle;

/// Sets all source image properties at once.
///
/// Groups: source-image, image-label, image-width, image-height, image-loaded
pub fn set_source_info(
    ui: &crate::AppWindow,
    image: slint::Image,
    label: &str,
    width: u32,
    height: u32,
) {
    let view_state = ui.global::<crate::ViewState>();
    view_state.set_source_image(image);
    view_state.set_image_label(label.into());
    view_state.set_image_width(width as i32);
    view_state.set_image_height(height as i32);
    view_state.set_image_loaded(true);
}

/// Shows a rendered preview in the matching output view.
pub fn set_preview_image(ui: &crate::AppWindow, kind: PreviewKind, image: slint::Image) {
    let view_state = ui.global::<crate::ViewState>();
    match kind {
        PreviewKind::Threshold => view_state.set_threshold_image(image),
        PreviewKind::Morphology => view_state.set_morphology_image(image),
    }
}

/// Sets an error message in the UI with a prefix.
///
/// Logs the error and updates the ViewState error-message property.
pub fn set_error_with_prefix(ui: &crate::AppWindow, prefix: &str, error: String) {
    let error_message = format!("{}: {}", prefix, error);
    error!("{}", error_message);
    ui.global::<crate::ViewState>()
        .set_error_message(error_message.into());
}

pub fn clear_error(ui: &crate::AppWindow) {
    ui.global::<crate::ViewState>().set_error_message("".into());
}

/// Marks a background image load as started or finished.
pub fn set_loading(ui: &crate::AppWindow, loading: bool) {
    ui.global::<crate::ViewState>().set_loading(loading);
}

/// Sets all slider properties at once.
///
/// Groups: threshold-low, threshold-high, kernel-size, iterations, erode
pub fn set_parameter_info(
    ui: &crate::AppWindow,
    threshold: ThresholdParams,
    morphology: MorphologyParams,
) {
    let view_state = ui.global::<crate::ViewState>();
    view_state.set_threshold_low(i32::from(threshold.low));
    view_state.set_threshold_high(i32::from(threshold.high));
    view_state.set_kernel_size(i32::from(morphology.kernel_size));
    view_state.set_iterations(i32::from(morphology.iterations));
    view_state.set_erode(morphology.op == MorphologyOp::Erode);
}
