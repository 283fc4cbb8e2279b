use crate::error::{AppError, Result};
use crate::file_utils;
use image::{ImageReader, RgbaImage};
use slint::{Image, Rgba8Pixel, SharedPixelBuffer};
use std::path::Path;

/// Load an image file and decode it into RGBA8.
///
/// Files are accepted by extension or, failing that, by content.
/// Blocking; callers run it on a rayon worker.
pub fn load_image_blocking(path: &Path) -> Result<RgbaImage> {
    if !file_utils::has_supported_extension(path) && file_utils::sniff_file(path).is_none() {
        return Err(AppError::UnsupportedFile(path.to_path_buf()));
    }

    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image.to_rgba8())
}

/// Build an RGBA8 image from raw pixels, checking the buffer length.
pub fn from_raw_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<RgbaImage> {
    RgbaImage::from_raw(width, height, bytes).ok_or_else(|| {
        AppError::ImageLoad(format!(
            "pixel buffer does not match {}x{} RGBA",
            width, height
        ))
    })
}

/// Wrap RGBA8 pixels in a Slint image. Must be called on the UI thread.
pub fn create_slint_image(data: &[u8], width: u32, height: u32) -> Image {
    let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(data, width, height);
    Image::from_rgba8(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn write_png(path: &Path) {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        write_png(&path);

        let img = load_image_blocking(&path).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn loads_extensionless_png_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let named = dir.path().join("small.png");
        write_png(&named);
        let bare = dir.path().join("small");
        std::fs::rename(&named, &bare).unwrap();

        assert_eq!(load_image_blocking(&bare).unwrap().dimensions(), (3, 2));
    }

    #[test]
    fn rejects_unsupported_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        assert!(matches!(
            load_image_blocking(&path),
            Err(AppError::UnsupportedFile(p)) if p == path
        ));
    }

    #[test]
    fn corrupt_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not a png").unwrap();

        assert!(matches!(
            load_image_blocking(&path),
            Err(AppError::ImageLoad(_))
        ));
    }

    #[test]
    fn raw_buffer_length_is_checked() {
        assert!(from_raw_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(from_raw_rgba(2, 2, vec![0; 15]).is_err());
    }
}
