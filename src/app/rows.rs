//! Reusable image slots for the visible cards.
//!
//! Only the cards on screen own a [`Slot`]. When the list scrolls, row `i`
//! is rebound to whatever item now sits at `offset + i`, which is what makes
//! late deliveries for the previous item stale.

use crate::images::{ImageFetcher, ImageSource, Slot};
use crate::models::Pokemon;

/// One slot per visible card row.
#[derive(Debug, Default)]
pub struct RowSlots {
    slots: Vec<Slot>,
}

impl RowSlots {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot backing visible row `row`.
    pub fn get(&self, row: usize) -> Option<&Slot> {
        self.slots.get(row)
    }

    /// Number of rows currently pooled.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no rows are pooled.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bind `visible` rows to `items[offset..]`, requesting artwork for every
    /// row whose item changed. Returns how many requests were issued.
    pub fn sync<S: ImageSource>(
        &mut self,
        fetcher: &ImageFetcher<S>,
        items: &[Pokemon],
        offset: usize,
        visible: usize,
    ) -> usize {
        for slot in self.slots.drain(visible.min(self.slots.len())..) {
            slot.unbind();
        }
        self.slots.resize_with(visible, Slot::new);

        let mut issued = 0;
        for (row, slot) in self.slots.iter().enumerate() {
            match items.get(offset + row) {
                Some(item) => {
                    if slot.url().as_deref() == Some(item.image_url.as_str()) {
                        continue;
                    }
                    tracing::debug!("Row {row} now shows #{} {}", item.number, item.name);
                    // Outcome lands in the slot; the task logs failures itself
                    let _ = fetcher.request(slot.bind(&item.image_url));
                    issued += 1;
                }
                None => {
                    if slot.url().is_some() {
                        slot.unbind();
                    }
                }
            }
        }
        issued
    }
}
