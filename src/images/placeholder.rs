//! Fallback artwork shown while a card's image is unresolved.
//!
//! The fetcher never sees this; the UI draws it for any slot that has no
//! delivered image, including slots whose load failed.

use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::config::Config;

const RED: Rgba<u8> = Rgba([220, 40, 48, 255]);
const WHITE: Rgba<u8> = Rgba([245, 245, 245, 255]);
const BLACK: Rgba<u8> = Rgba([24, 24, 24, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Placeholder configured by the user, or the built-in pokeball.
pub fn load(config: &Config) -> Result<DynamicImage> {
    match &config.placeholder_path {
        Some(path) => load_from(path),
        None => Ok(pokeball(128)),
    }
}

/// Load a placeholder image from disk.
pub fn load_from(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to open placeholder {}", path.display()))
}

/// Draw a pokeball `size` pixels across.
pub fn pokeball(size: u32) -> DynamicImage {
    let size = size.max(8);
    let center = f64::from(size) / 2.0;
    let radius = center - 1.0;
    let band = radius * 0.12;
    let button = radius * 0.3;

    let image = RgbaImage::from_fn(size, size, |x, y| {
        let dx = f64::from(x) + 0.5 - center;
        let dy = f64::from(y) + 0.5 - center;
        let dist = dx.hypot(dy);

        if dist > radius {
            CLEAR
        } else if dist > radius - band {
            BLACK
        } else if dist < button * 0.6 {
            WHITE
        } else if dist < button {
            BLACK
        } else if dy.abs() < band / 2.0 {
            BLACK
        } else if dy < 0.0 {
            RED
        } else {
            WHITE
        }
    });

    DynamicImage::ImageRgba8(image)
}
