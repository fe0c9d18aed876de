//! Async image loading from URLs.
//!
//! [`ImageFetcher::request`] never blocks: a cache hit is delivered on the
//! spot, a miss is handed to a task on the tokio runtime that downloads,
//! decodes, caches and finally delivers to the slot if the slot still wants
//! it. Concurrent misses for the same URL each run their own download; the
//! cache keeps whichever finishes first.

use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::decode::decode;
use super::{DecodeError, Delivery, FetchError, ImageCache, ImageSource, LoadError, Subscription};
use crate::config::Config;

/// Default cap for a single download.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound for decoded image width/height.
pub const DEFAULT_MAX_DIMENSION: u32 = 800;

/// Tunables for the fetcher.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Give up on a download after this long
    pub timeout: Duration,
    /// Decoded images larger than this are scaled down
    pub max_dimension: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl From<&Config> for FetchOptions {
    fn from(config: &Config) -> Self {
        Self {
            timeout: Duration::from_secs(config.fetch_timeout_secs),
            max_dimension: config.max_image_dimension,
        }
    }
}

/// Result of [`ImageFetcher::request`].
#[derive(Debug)]
pub enum Request {
    /// Served from cache before `request` returned
    Ready(Delivery),
    /// A download is running in the background
    Pending(PendingRequest),
}

impl Request {
    /// Whether the request was answered from cache.
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Wait for the final delivery, whichever way the request went.
    pub async fn outcome(self) -> Delivery {
        match self {
            Self::Ready(delivery) => delivery,
            Self::Pending(pending) => pending.outcome().await,
        }
    }
}

/// Handle to an in-flight download.
///
/// Dropping it does not cancel the download.
#[derive(Debug)]
pub struct PendingRequest {
    url: String,
    task: JoinHandle<Delivery>,
}

impl PendingRequest {
    /// URL being downloaded.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the background task has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task and report how it ended.
    pub async fn outcome(self) -> Delivery {
        match self.task.await {
            Ok(delivery) => delivery,
            Err(err) => {
                tracing::warn!("Image task for {} did not complete: {err}", self.url);
                Delivery::Failed(DecodeError::Aborted.into())
            }
        }
    }
}

/// Resolves display requests into cached, decoded images.
pub struct ImageFetcher<S> {
    cache: ImageCache,
    source: Arc<S>,
    options: FetchOptions,
    runtime: Handle,
}

impl<S> Clone for ImageFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            source: Arc::clone(&self.source),
            options: self.options,
            runtime: self.runtime.clone(),
        }
    }
}

impl<S: ImageSource> ImageFetcher<S> {
    /// Create a fetcher that spawns on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new(cache: ImageCache, source: S, options: FetchOptions) -> Self {
        Self::with_runtime(cache, source, options, Handle::current())
    }

    /// Create a fetcher that spawns on the given runtime.
    ///
    /// This lets synchronous code (the TUI loop) issue requests.
    pub fn with_runtime(cache: ImageCache, source: S, options: FetchOptions, runtime: Handle) -> Self {
        Self {
            cache,
            source: Arc::new(source),
            options,
            runtime,
        }
    }

    /// The cache this fetcher reads and fills.
    pub const fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Ask for the subscription's URL to be shown in its slot.
    pub fn request(&self, subscription: Subscription) -> Request {
        let url = subscription.requested_url().to_string();

        if let Some(image) = self.cache.get(&url) {
            return Request::Ready(subscription.deliver(image));
        }

        let cache = self.cache.clone();
        let source = Arc::clone(&self.source);
        let options = self.options;
        let task_url = url.clone();

        let task = self.runtime.spawn(async move {
            match load(source.as_ref(), &task_url, options).await {
                Ok(image) => {
                    let image = cache.put(&task_url, image);
                    let delivery = subscription.deliver(image);
                    if delivery.is_stale() {
                        tracing::debug!("Slot moved on, dropping image for {task_url}");
                    }
                    delivery
                }
                Err(err) => {
                    tracing::warn!("Failed to load image {task_url}: {err}");
                    Delivery::Failed(err)
                }
            }
        });

        Request::Pending(PendingRequest { url, task })
    }
}

/// Download an image from a URL and decode it off the async workers.
async fn load<S: ImageSource>(source: &S, url: &str, options: FetchOptions) -> Result<DynamicImage, LoadError> {
    let bytes = tokio::time::timeout(options.timeout, source.fetch(url))
        .await
        .map_err(|_| FetchError::Timeout(options.timeout))??;

    let max_dimension = options.max_dimension;
    let image = tokio::task::spawn_blocking(move || decode(&bytes, max_dimension))
        .await
        .map_err(|_| DecodeError::Aborted)??;

    Ok(image)
}
