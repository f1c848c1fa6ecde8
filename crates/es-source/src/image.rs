use std::path::Path;

use es_core::error::CoreError;
use es_core::frame::FrameBuffer;

/// Charge une image depuis le disque et la convertit en RGB 8 bits.
///
/// Any alpha channel is dropped, not composited.
///
/// # Errors
/// Returns `CoreError::Decode` if the file is missing, unreadable or corrupt.
///
/// # Example
/// ```no_run
/// use es_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.jpg")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer, CoreError> {
    let img = image::open(path).map_err(|e| CoreError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let frame = from_dynamic(&img);
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Convert an already decoded image.
///
/// # Example
/// ```
/// use es_source::image::from_dynamic;
/// let img = image::DynamicImage::new_rgb8(4, 3);
/// let frame = from_dynamic(&img);
/// assert_eq!((frame.width, frame.height), (4, 3));
/// ```
#[must_use]
pub fn from_dynamic(img: &image::DynamicImage) -> FrameBuffer {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    FrameBuffer {
        data: rgb.into_raw(),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_decode_error() {
        let err = load_image(Path::new("/no/such/image.png"));
        assert!(matches!(err, Err(CoreError::Decode { .. })));
    }

    #[test]
    fn corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png at all").unwrap();
        assert!(matches!(load_image(&path), Err(CoreError::Decode { .. })));
    }

    #[test]
    fn png_roundtrip_keeps_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let mut img = image::RgbImage::new(2, 2);
        img.put_pixel(1, 0, image::Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width, frame.height), (2, 2));
        assert_eq!(frame.pixel(1, 0), (10, 20, 30));
        assert_eq!(frame.pixel(0, 1), (0, 0, 0));
    }

    #[test]
    fn alpha_is_dropped() {
        let mut img = image::RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([200, 100, 50, 0]));
        let frame = from_dynamic(&image::DynamicImage::ImageRgba8(img));
        assert_eq!(frame.pixel(0, 0), (200, 100, 50));
    }
}
