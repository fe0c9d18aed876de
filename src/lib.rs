//! # Dexter ◓
//!
//! A terminal Pokédex with asynchronous artwork loading.
//!
//! ## Overview
//!
//! Dexter shows a fixed catalog of Pokémon as a scrollable list of cards.
//! Each card's artwork is downloaded in the background, decoded, cached for
//! the rest of the process and dropped into the card if the card still wants
//! it. Until then (or forever, if the download fails) a placeholder is shown.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │   Event loop, virtualized card rows, header, status bar     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ Slot::bind + request
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ImageFetcher                           │
//! │  cache hit → deliver now │ miss → fetch, decode, cache,     │
//! │                          │        deliver if still current  │
//! └─────────────────────────────────────────────────────────────┘
//!          │                   │                   │
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │   ImageCache    │ │   ImageSource   │ │     decode      │
//! │                 │ │                 │ │                 │
//! │ • URL → image   │ │ • HTTP GET      │ │ • sniff format  │
//! │ • write once    │ │ • status check  │ │ • downscale     │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`app`] — TUI application state and event loop
//! - [`config`] — Configuration management
//! - [`images`] — Image fetching, caching and slot delivery
//! - [`models`] — The Pokémon catalog
//! - [`theme`] — Theme support via ratatui-themes
//!
//! ## Example
//!
//! ```no_run
//! use dexter::images::{FetchOptions, HttpSource, ImageCache, ImageFetcher, Slot};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let fetcher = ImageFetcher::new(ImageCache::new(), HttpSource::new()?, FetchOptions::default());
//! let slot = Slot::new();
//! let delivery = fetcher.request(slot.bind("https://example.com/25.png")).outcome().await;
//! println!("delivered: {}", delivery.is_delivered());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::if_same_then_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::unnecessary_lazy_evaluations)]
#![allow(clippy::use_self)]

pub mod app;
pub mod config;
pub mod images;
pub mod models;
pub mod paths;
pub mod theme;

// Re-export main types for convenience
pub use config::Config;
pub use images::{ImageCache, ImageFetcher, Slot};
pub use models::{Pokemon, catalog};
pub use theme::{Theme, ThemeColors};

/// ASCII logo for the application
pub const LOGO: &str = r"
    ____            __
   / __ \___  _  __/ /____  _____
  / / / / _ \| |/_/ __/ _ \/ ___/
 / /_/ /  __/>  </ /_/  __/ /
/_____/\___/_/|_|\__/\___/_/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
