//! Image loading and caching for terminal display.
//!
//! This module handles downloading, decoding and caching card artwork, and
//! routing each result to the list row that asked for it. Rendering uses the
//! terminal's graphics protocol (Sixel, Kitty, iTerm2) with fallback to
//! Unicode halfblocks.

mod cache;
mod decode;
mod error;
mod fetcher;
pub mod placeholder;
mod source;
mod subscription;

pub use cache::ImageCache;
pub use decode::decode;
#[cfg(test)]
pub(crate) use decode::png_bytes;
pub use error::{DecodeError, FetchError, LoadError};
pub use fetcher::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_DIMENSION, FetchOptions, ImageFetcher, PendingRequest,
    Request,
};
pub use source::{HttpSource, ImageSource};
pub use subscription::{Delivery, ImageState, Slot, Subscription};

use ratatui_image::picker::Picker;
use std::sync::OnceLock;

/// Global picker instance (initialized once at startup)
static PICKER: OnceLock<Option<Picker>> = OnceLock::new();

/// Initialize the image picker by querying terminal capabilities.
///
/// This should be called once at startup, before entering the TUI.
/// Returns `true` if a graphics protocol is available.
pub fn init_picker() -> bool {
    let picker = PICKER.get_or_init(|| match Picker::from_query_stdio() {
        Ok(p) => {
            tracing::info!("Image support detected: {:?}", p.protocol_type());
            Some(p)
        }
        Err(e) => {
            tracing::debug!("No image protocol support: {e}");
            // Halfblocks work everywhere
            Some(Picker::halfblocks())
        }
    });
    picker.is_some()
}

/// Get the global picker instance.
pub fn picker() -> Option<&'static Picker> {
    PICKER.get().and_then(|p| p.as_ref())
}
