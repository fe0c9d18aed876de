//! Application state

use std::collections::HashMap;
use std::sync::Arc;

use image::DynamicImage;
use ratatui_image::protocol::StatefulProtocol;

use super::rows::RowSlots;
use crate::config::Config;
use crate::images;
use crate::models::Pokemon;
use crate::theme::Theme;

/// Current overlay mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Help,
}

/// Application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Whether to quit
    pub should_quit: bool,
    /// Current theme
    pub theme: Theme,
    /// Current overlay
    pub mode: Mode,

    /// Catalog entries, in display order
    pub items: Vec<Pokemon>,
    /// Selected card index
    pub selected: usize,
    /// Index of the first visible card
    pub scroll: usize,
    /// How many cards fit on screen (updated on render)
    pub visible_rows: usize,
    /// Image slots for the visible cards
    pub rows: RowSlots,

    /// Artwork shown for unresolved cards
    pub placeholder: DynamicImage,
    /// Terminal protocol state for the placeholder
    pub placeholder_protocol: Option<StatefulProtocol>,
    /// Terminal protocol state per artwork URL
    pub image_protocols: HashMap<String, StatefulProtocol>,

    /// Status message (bottom bar)
    pub status: String,
}

impl AppState {
    /// Create a new app state
    pub fn new(config: Config, items: Vec<Pokemon>, placeholder: DynamicImage) -> Self {
        let theme = config.theme;
        Self {
            config,
            should_quit: false,
            theme,
            mode: Mode::Normal,
            items,
            selected: 0,
            scroll: 0,
            visible_rows: 0,
            rows: RowSlots::new(),
            placeholder,
            placeholder_protocol: None,
            image_protocols: HashMap::new(),
            status: String::new(),
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    /// Get the currently selected card
    pub fn selected_item(&self) -> Option<&Pokemon> {
        self.items.get(self.selected)
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
        self.follow_selection();
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.follow_selection();
    }

    /// Jump to the first card
    pub fn select_first(&mut self) {
        self.selected = 0;
        self.follow_selection();
    }

    /// Jump to the last card
    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
        self.follow_selection();
    }

    /// Move a screenful down
    pub fn page_down(&mut self) {
        let step = self.visible_rows.max(1);
        if !self.items.is_empty() {
            self.selected = (self.selected + step).min(self.items.len() - 1);
        }
        self.follow_selection();
    }

    /// Move a screenful up
    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.visible_rows.max(1));
        self.follow_selection();
    }

    /// Set how many cards fit and keep the selection in view
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows;
        self.follow_selection();
    }

    /// Keep the selected card inside the visible window
    fn follow_selection(&mut self) {
        let visible = self.visible_rows.max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
        let max_scroll = self.items.len().saturating_sub(visible);
        self.scroll = self.scroll.min(max_scroll);
    }

    /// Cycle through themes
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.config.theme = self.theme;
    }

    /// Delivered artwork for card `index` drawn in visible row `row`.
    ///
    /// `None` unless the row's slot is bound to that card's URL, so a row
    /// that scrolled before its slot was rebound shows the placeholder.
    pub fn artwork(&self, row: usize, index: usize) -> Option<(String, Arc<DynamicImage>)> {
        let item = self.items.get(index)?;
        let slot = self.rows.get(row)?;
        if slot.url().as_deref() != Some(item.image_url.as_str()) {
            return None;
        }
        Some((item.image_url.clone(), slot.image()?))
    }

    /// Terminal protocol for the artwork at `url`, built on first use
    pub fn image_protocol(&mut self, url: &str, image: &DynamicImage) -> Option<&mut StatefulProtocol> {
        let picker = images::picker()?;
        Some(
            self.image_protocols
                .entry(url.to_string())
                .or_insert_with(|| picker.new_resize_protocol(image.clone())),
        )
    }

    /// Terminal protocol for the placeholder, built on first use
    pub fn placeholder_protocol(&mut self) -> Option<&mut StatefulProtocol> {
        let picker = images::picker()?;
        if self.placeholder_protocol.is_none() {
            self.placeholder_protocol = Some(picker.new_resize_protocol(self.placeholder.clone()));
        }
        self.placeholder_protocol.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::placeholder::pokeball;
    use crate::images::{FetchError, FetchOptions, ImageCache, ImageFetcher, ImageSource, png_bytes};
    use crate::models::catalog;
    use std::time::Duration;

    fn state() -> AppState {
        let mut state = AppState::new(Config::default(), catalog(), pokeball(8));
        state.set_visible_rows(3);
        state
    }

    #[derive(Default)]
    struct PngSource;

    impl ImageSource for PngSource {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            Ok(png_bytes(2, 2))
        }
    }

    async fn synced(state: &mut AppState) -> ImageFetcher<PngSource> {
        let fetcher = ImageFetcher::new(ImageCache::new(), PngSource, FetchOptions::default());
        state.rows.sync(&fetcher, &state.items, state.scroll, state.visible_rows);
        for _ in 0..200 {
            if (0..state.visible_rows).all(|row| state.rows.get(row).unwrap().state().is_ready()) {
                return fetcher;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("rows never received their artwork");
    }

    #[tokio::test]
    async fn test_artwork_matches_bound_card() {
        let mut state = state();
        let _fetcher = synced(&mut state).await;

        let (url, _) = state.artwork(0, 0).unwrap();
        assert_eq!(url, state.items[0].image_url);
    }

    #[tokio::test]
    async fn test_scrolled_row_shows_placeholder_until_rebound() {
        let mut state = state();
        let fetcher = synced(&mut state).await;

        for _ in 0..3 {
            state.select_next();
        }
        assert_eq!(state.scroll, 1);

        // Row 0 still holds bulbasaur's image but now draws charmander
        assert!(state.rows.get(0).unwrap().image().is_some());
        assert!(state.artwork(0, state.scroll).is_none());

        state.rows.sync(&fetcher, &state.items, state.scroll, state.visible_rows);
        // Charmander was already cached by row 1, so it lands synchronously
        let (url, _) = state.artwork(0, state.scroll).unwrap();
        assert_eq!(url, state.items[1].image_url);
    }

    #[test]
    fn test_artwork_without_rows() {
        assert!(state().artwork(0, 0).is_none());
    }

    #[test]
    fn test_scroll_follows_selection_down() {
        let mut state = state();
        for _ in 0..4 {
            state.select_next();
        }
        assert_eq!(state.selected, 4);
        assert_eq!(state.scroll, 2);
    }

    #[test]
    fn test_scroll_follows_selection_up() {
        let mut state = state();
        state.select_last();
        assert_eq!(state.scroll, 8);
        state.page_up();
        assert_eq!(state.selected, 7);
        assert_eq!(state.scroll, 7);
    }

    #[test]
    fn test_selection_clamped() {
        let mut state = state();
        state.select_prev();
        assert_eq!(state.selected, 0);
        state.select_last();
        state.select_next();
        assert_eq!(state.selected, 10);
        state.page_down();
        assert_eq!(state.selected_item().unwrap().name, "ponyta");
    }

    #[test]
    fn test_growing_window_pulls_scroll_back() {
        let mut state = state();
        state.select_last();
        state.set_visible_rows(20);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_theme_saved_to_config() {
        let mut state = state();
        let before = state.theme;
        state.next_theme();
        assert_ne!(state.theme, before);
        assert_eq!(state.config.theme, state.theme);
    }
}
