//! Display slots and the subscriptions that feed them.
//!
//! A [`Slot`] is one place on screen that shows one image at a time. Rows of
//! a scrolling list are reused for different items, so a slot can be rebound
//! while an older fetch is still running. Each [`Slot::bind`] bumps the
//! slot's generation; a [`Subscription`] only lands if the slot still has the
//! generation and URL it was created with.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use image::DynamicImage;

use super::LoadError;

/// What a slot currently shows.
#[derive(Debug, Clone, Default)]
pub enum ImageState {
    /// Nothing delivered yet; render the placeholder
    #[default]
    Unresolved,
    /// A decoded image is ready
    Ready(Arc<DynamicImage>),
}

impl ImageState {
    /// The image, if one has been delivered.
    pub fn image(&self) -> Option<&Arc<DynamicImage>> {
        match self {
            Self::Ready(image) => Some(image),
            Self::Unresolved => None,
        }
    }

    /// Whether an image has been delivered.
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

#[derive(Debug, Default)]
struct SlotState {
    url: Option<String>,
    generation: u64,
    image: ImageState,
}

/// One display position that wants one image at a time.
///
/// Clones share state, so the fetch task can hold a handle to the slot the
/// UI owns.
#[derive(Debug, Clone, Default)]
pub struct Slot {
    state: Arc<Mutex<SlotState>>,
}

impl Slot {
    /// Create an unbound slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Point the slot at `url`, dropping whatever it showed before.
    ///
    /// Any subscription handed out earlier becomes stale.
    pub fn bind(&self, url: &str) -> Subscription {
        let mut state = self.lock();
        state.generation = state.generation.wrapping_add(1);
        state.url = Some(url.to_string());
        state.image = ImageState::Unresolved;

        Subscription {
            requested_url: url.to_string(),
            generation: state.generation,
            slot: self.clone(),
        }
    }

    /// Detach the slot from any URL (row scrolled away).
    pub fn unbind(&self) {
        let mut state = self.lock();
        state.generation = state.generation.wrapping_add(1);
        state.url = None;
        state.image = ImageState::Unresolved;
    }

    /// The URL the slot currently wants.
    pub fn url(&self) -> Option<String> {
        self.lock().url.clone()
    }

    /// Current binding generation.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Snapshot of what the slot shows.
    pub fn state(&self) -> ImageState {
        self.lock().image.clone()
    }

    /// The delivered image, if any.
    pub fn image(&self) -> Option<Arc<DynamicImage>> {
        self.lock().image.image().cloned()
    }
}

/// A pending wish to show `requested_url` in a particular slot binding.
///
/// Consumed on delivery, so it can land at most once.
#[derive(Debug)]
pub struct Subscription {
    requested_url: String,
    generation: u64,
    slot: Slot,
}

impl Subscription {
    /// URL this subscription was created for.
    pub fn requested_url(&self) -> &str {
        &self.requested_url
    }

    /// Generation of the binding that created it.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the slot still wants this result.
    pub fn is_current(&self) -> bool {
        let state = self.slot.lock();
        Self::matches(&state, &self.requested_url, self.generation)
    }

    fn matches(state: &SlotState, url: &str, generation: u64) -> bool {
        state.generation == generation && state.url.as_deref() == Some(url)
    }

    /// Hand a decoded image to the slot unless it has moved on.
    pub fn deliver(self, image: Arc<DynamicImage>) -> Delivery {
        let mut state = self.slot.lock();
        if !Self::matches(&state, &self.requested_url, self.generation) {
            return Delivery::Stale;
        }
        state.image = ImageState::Ready(image);
        Delivery::Delivered
    }
}

/// How a request ended for its subscription.
#[derive(Debug)]
pub enum Delivery {
    /// The image was written into the slot
    Delivered,
    /// The image arrived after the slot was rebound and was dropped
    Stale,
    /// Fetch or decode failed; the slot stays unresolved
    Failed(LoadError),
}

impl Delivery {
    /// Whether the slot received an image.
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Whether the result was discarded as stale.
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }

    /// The failure, if the request failed.
    pub const fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn tiny() -> Arc<DynamicImage> {
        Arc::new(DynamicImage::ImageRgba8(RgbaImage::new(1, 1)))
    }

    #[test]
    fn test_new_slot_unresolved() {
        let slot = Slot::new();
        assert!(slot.url().is_none());
        assert!(!slot.state().is_ready());
    }

    #[test]
    fn test_deliver_current() {
        let slot = Slot::new();
        let sub = slot.bind("https://x/a.png");
        assert!(sub.is_current());
        assert!(sub.deliver(tiny()).is_delivered());
        assert!(slot.image().is_some());
    }

    #[test]
    fn test_rebind_makes_old_subscription_stale() {
        let slot = Slot::new();
        let old = slot.bind("https://x/a.png");
        let _new = slot.bind("https://x/b.png");

        assert!(!old.is_current());
        assert!(old.deliver(tiny()).is_stale());
        assert!(slot.image().is_none());
        assert_eq!(slot.url().as_deref(), Some("https://x/b.png"));
    }

    #[test]
    fn test_rebind_same_url_still_stale() {
        // A second binding to the same URL owns the slot; the first one's
        // generation no longer matches.
        let slot = Slot::new();
        let first = slot.bind("https://x/a.png");
        let second = slot.bind("https://x/a.png");
        assert!(first.deliver(tiny()).is_stale());
        assert!(second.deliver(tiny()).is_delivered());
    }

    #[test]
    fn test_unbind_drops_image() {
        let slot = Slot::new();
        let sub = slot.bind("https://x/a.png");
        sub.deliver(tiny());
        slot.unbind();
        assert!(slot.image().is_none());
        assert!(slot.url().is_none());
    }

    #[test]
    fn test_rebind_clears_previous_image() {
        let slot = Slot::new();
        slot.bind("https://x/a.png").deliver(tiny());
        let generation = slot.generation();
        slot.bind("https://x/b.png");
        assert!(slot.image().is_none());
        assert_eq!(slot.generation(), generation + 1);
    }
}
