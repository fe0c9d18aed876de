//! Failure types for image loading.
//!
//! None of these reach the user directly: a failed load simply leaves the
//! card showing its placeholder. They exist so callers and tests can tell
//! what went wrong.

use std::time::Duration;

use thiserror::Error;

/// The image bytes could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body read failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Server answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),
    /// No response within the configured timeout
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// The bytes arrived but are not a usable image.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Corrupt or unsupported image data
    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),
    /// The decoder task panicked or was cancelled
    #[error("decoder task did not complete")]
    Aborted,
}

/// Any reason a request ends without an image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Network side failure
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Decode side failure
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl LoadError {
    /// True for failures that happened before any bytes were decoded.
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// True for failures of the decode step.
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
