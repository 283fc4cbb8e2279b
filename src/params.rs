//! Slider-backed parameters for the two previews.
//!
//! Every constructor and setter clamps into the documented slider range, so
//! a stored value is always valid regardless of what the UI sends.

use crate::config::{
    DEFAULT_ITERATIONS, DEFAULT_KERNEL_SIZE, DEFAULT_THRESHOLD_HIGH, DEFAULT_THRESHOLD_LOW,
    ITERATIONS_MAX, ITERATIONS_MIN, KERNEL_SIZE_MAX, KERNEL_SIZE_MIN, THRESHOLD_MAX,
    THRESHOLD_MIN,
};

fn clamp_to_u8(value: i32, min: u8, max: u8) -> u8 {
    value.clamp(i32::from(min), i32::from(max)) as u8
}

/// Parameters for the binary threshold preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdParams {
    /// Values strictly above this become `high`.
    pub low: u8,
    /// Output value for pixels above `low`.
    pub high: u8,
}

impl ThresholdParams {
    pub fn new(low: i32, high: i32) -> Self {
        Self {
            low: clamp_to_u8(low, THRESHOLD_MIN, THRESHOLD_MAX),
            high: clamp_to_u8(high, THRESHOLD_MIN, THRESHOLD_MAX),
        }
    }
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            low: DEFAULT_THRESHOLD_LOW,
            high: DEFAULT_THRESHOLD_HIGH,
        }
    }
}

/// Which grey-level morphology operator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphologyOp {
    #[default]
    Dilate,
    Erode,
}

impl MorphologyOp {
    pub fn from_erode_flag(erode: bool) -> Self {
        if erode { Self::Erode } else { Self::Dilate }
    }
}

/// Parameters for the erosion/dilation preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphologyParams {
    /// Side of the square all-ones kernel.
    pub kernel_size: u8,
    pub iterations: u8,
    pub op: MorphologyOp,
}

impl MorphologyParams {
    pub fn new(kernel_size: i32, iterations: i32, op: MorphologyOp) -> Self {
        Self {
            kernel_size: clamp_to_u8(kernel_size, KERNEL_SIZE_MIN, KERNEL_SIZE_MAX),
            iterations: clamp_to_u8(iterations, ITERATIONS_MIN, ITERATIONS_MAX),
            op,
        }
    }

    /// Kernel anchor, the centre of the square as OpenCV's `(-1, -1)` picks it.
    pub fn anchor(&self) -> u8 {
        self.kernel_size / 2
    }
}

impl Default for MorphologyParams {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_KERNEL_SIZE,
            iterations: DEFAULT_ITERATIONS,
            op: MorphologyOp::Dilate,
        }
    }
}
