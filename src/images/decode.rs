//! Turning downloaded bytes into display-ready images.

use image::DynamicImage;

use super::DecodeError;

/// Decode `bytes` and shrink the result to fit within `max_dimension`.
///
/// The format is sniffed from the data, not from the URL.
pub fn decode(bytes: &[u8], max_dimension: u32) -> Result<DynamicImage, DecodeError> {
    let image = image::load_from_memory(bytes)?;
    Ok(resize_if_needed(image, max_dimension))
}

/// Resize image if it's too large (to save memory and rendering time).
fn resize_if_needed(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());

    if width <= max_dimension && height <= max_dimension {
        return image;
    }

    // `resize` keeps the aspect ratio within the bounds
    image.resize(max_dimension, max_dimension, image::imageops::FilterType::Triangle)
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    let image = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode png fixture");
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let image = decode(&png_bytes(3, 2), 800).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode(b"<html>not found</html>", 800).unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode(&[], 800).is_err());
    }

    #[test]
    fn test_large_image_downscaled() {
        let image = decode(&png_bytes(400, 200), 100).unwrap();
        assert_eq!(image.width(), 100);
        assert_eq!(image.height(), 50);
    }
}
