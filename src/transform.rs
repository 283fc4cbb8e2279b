//! Threshold and erosion/dilation transforms.
//!
//! The kernels come from `imageproc`, which works on single-channel images,
//! so each colour channel is processed as its own grey plane. Alpha is carried
//! over unchanged.

use crate::params::{MorphologyOp, MorphologyParams, ThresholdParams};
use imageproc::contrast::{ThresholdType, threshold as threshold_plane};
use imageproc::image::{GrayImage, Luma, RgbaImage};
use imageproc::morphology::{Mask, grayscale_dilate, grayscale_erode};

const COLOR_CHANNELS: usize = 3;

fn split_channel(image: &RgbaImage, channel: usize) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([image.get_pixel(x, y)[channel]])
    })
}

/// Runs `op` on each colour plane and writes the results into a copy of `image`.
fn map_color_planes<F>(image: &RgbaImage, op: F) -> RgbaImage
where
    F: Fn(GrayImage) -> GrayImage,
{
    let mut output = image.clone();
    if image.width() == 0 || image.height() == 0 {
        return output;
    }

    for channel in 0..COLOR_CHANNELS {
        let plane = op(split_channel(image, channel));
        for (x, y, value) in plane.enumerate_pixels() {
            output.get_pixel_mut(x, y)[channel] = value[0];
        }
    }
    output
}

/// Binary threshold: values above `low` become `high`, the rest 0.
///
/// Only the colour channels are thresholded; alpha is left unchanged so the
/// preview stays visible.
pub fn threshold(image: &RgbaImage, params: ThresholdParams) -> RgbaImage {
    map_color_planes(image, |plane| {
        let mut binary = threshold_plane(&plane, params.low, ThresholdType::Binary);
        if params.high != u8::MAX {
            for pixel in binary.pixels_mut() {
                if pixel[0] != 0 {
                    pixel[0] = params.high;
                }
            }
        }
        binary
    })
}

/// Square all-ones structuring element anchored at its centre.
fn square_mask(params: &MorphologyParams) -> Mask {
    let side = u32::from(params.kernel_size);
    let kernel = GrayImage::from_pixel(side, side, Luma([u8::MAX]));
    Mask::from_image(&kernel, params.anchor(), params.anchor())
}

/// Grey-level dilation or erosion, repeated `iterations` times.
///
/// Pixels outside the image never contribute to the result. Alpha is left
/// unchanged.
pub fn morphology(image: &RgbaImage, params: MorphologyParams) -> RgbaImage {
    let mask = square_mask(&params);
    map_color_planes(image, |plane| {
        (0..params.iterations).fold(plane, |current, _| match params.op {
            MorphologyOp::Dilate => grayscale_dilate(&current, &mask),
            MorphologyOp::Erode => grayscale_erode(&current, &mask),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::image::Rgba;

    fn bright_square(size: u32, lo: u32, hi: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if (lo..=hi).contains(&x) && (lo..=hi).contains(&y) {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    fn lit_count(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| p[0] == 255).count()
    }

    #[test]
    fn threshold_is_strict_and_uses_high_value() {
        let image = RgbaImage::from_fn(3, 1, |x, _| match x {
            0 => Rgba([99, 100, 101, 255]),
            1 => Rgba([100, 100, 100, 255]),
            _ => Rgba([250, 0, 101, 255]),
        });
        let out = threshold(&image, ThresholdParams::new(100, 42));

        assert_eq!(out.get_pixel(0, 0), &Rgba([0, 0, 42, 255]));
        assert_eq!(out.get_pixel(1, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(2, 0), &Rgba([42, 0, 42, 255]));
    }

    #[test]
    fn threshold_preserves_alpha() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([200, 10, 200, 17]));
        let out = threshold(&image, ThresholdParams::new(128, 255));
        assert!(out.pixels().all(|p| *p == Rgba([255, 0, 255, 17])));
    }

    #[test]
    fn dilation_grows_bright_regions() {
        let image = bright_square(9, 4, 4);
        let out = morphology(&image, MorphologyParams::new(3, 1, MorphologyOp::Dilate));
        assert_eq!(lit_count(&out), 9);
        assert_eq!(out.get_pixel(3, 3)[0], 255);
        assert_eq!(out.get_pixel(2, 2)[0], 0);
    }

    #[test]
    fn iterations_repeat_the_operator() {
        let image = bright_square(9, 4, 4);
        let out = morphology(&image, MorphologyParams::new(3, 2, MorphologyOp::Dilate));
        assert_eq!(lit_count(&out), 25);
    }

    #[test]
    fn erosion_shrinks_bright_regions() {
        let image = bright_square(9, 2, 6);
        let out = morphology(&image, MorphologyParams::new(3, 1, MorphologyOp::Erode));
        assert_eq!(lit_count(&out), 9);
        assert_eq!(out.get_pixel(4, 4)[0], 255);
        assert_eq!(out.get_pixel(2, 2)[0], 0);
    }

    #[test]
    fn border_does_not_erode_uniform_image() {
        let image = RgbaImage::from_pixel(5, 5, Rgba([200, 200, 200, 255]));
        let out = morphology(&image, MorphologyParams::new(5, 3, MorphologyOp::Erode));
        assert_eq!(out, image);
    }

    #[test]
    fn empty_image_passes_through() {
        let image = RgbaImage::new(0, 0);
        assert_eq!(threshold(&image, ThresholdParams::default()).dimensions(), (0, 0));
        assert_eq!(morphology(&image, MorphologyParams::default()).dimensions(), (0, 0));
    }
}
