//! Application configuration constants.

use std::time::Duration;

/// Supported image file extensions for opening, dropping and pasting.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Minimum spacing between two recomputations of the same preview.
pub const PREVIEW_THROTTLE: Duration = Duration::from_millis(200);

pub const THRESHOLD_MIN: u8 = 0;
pub const THRESHOLD_MAX: u8 = 255;
pub const DEFAULT_THRESHOLD_LOW: u8 = 177;
pub const DEFAULT_THRESHOLD_HIGH: u8 = 200;

pub const KERNEL_SIZE_MIN: u8 = 2;
pub const KERNEL_SIZE_MAX: u8 = 10;
pub const DEFAULT_KERNEL_SIZE: u8 = 3;

pub const ITERATIONS_MIN: u8 = 1;
pub const ITERATIONS_MAX: u8 = 5;
pub const DEFAULT_ITERATIONS: u8 = 1;

/// Label shown for images that came from the clipboard as raw pixels.
pub const CLIPBOARD_LABEL: &str = "clipboard";
