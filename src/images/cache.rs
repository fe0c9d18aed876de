//! Process-wide cache of decoded images.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use image::DynamicImage;

/// Thread-safe, write-once image cache keyed by URL.
///
/// Entries are added on successful decode and never removed or replaced.
/// When two fetches for the same URL both succeed, the first insert wins and
/// later inserts are ignored. URLs are used verbatim as keys.
#[derive(Clone, Default)]
pub struct ImageCache {
    images: Arc<DashMap<String, Arc<DynamicImage>>>,
}

impl ImageCache {
    /// Create an empty image cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a decoded image from cache.
    pub fn get(&self, url: &str) -> Option<Arc<DynamicImage>> {
        self.images.get(url).map(|entry| Arc::clone(entry.value()))
    }

    /// Store a decoded image unless one is already cached for `url`.
    ///
    /// Returns the image that ends up in the cache, which is the earlier one
    /// if this insert lost a race.
    pub fn put(&self, url: &str, image: DynamicImage) -> Arc<DynamicImage> {
        match self.images.entry(url.to_string()) {
            Entry::Occupied(existing) => {
                tracing::debug!("Image already cached, keeping first copy: {url}");
                Arc::clone(existing.get())
            }
            Entry::Vacant(vacant) => Arc::clone(vacant.insert(Arc::new(image)).value()),
        }
    }

    /// Check if an image is cached.
    pub fn contains(&self, url: &str) -> bool {
        self.images.contains_key(url)
    }

    /// Get the number of cached images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
