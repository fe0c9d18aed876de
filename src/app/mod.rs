//! TUI Application module

mod events;
mod rows;
mod state;
mod ui;

pub use rows::RowSlots;
pub use state::AppState;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::images::{self, FetchOptions, HttpSource, ImageCache, ImageFetcher, ImageSource};
use crate::models::catalog;

/// Run the TUI application
pub fn run() -> Result<()> {
    // Create tokio runtime
    let rt = Runtime::new()?;

    // Load config
    let config = Config::load()?;

    let placeholder = images::placeholder::load(&config).unwrap_or_else(|e| {
        tracing::warn!("{e:#}, using built-in placeholder");
        images::placeholder::pokeball(128)
    });

    let fetcher = ImageFetcher::with_runtime(
        ImageCache::new(),
        HttpSource::new()?,
        FetchOptions::from(&config),
        rt.handle().clone(),
    );

    // Query terminal graphics support before taking over the screen
    if config.show_images {
        images::init_picker();
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut state = AppState::new(config, catalog(), placeholder);

    // Main loop
    let result = run_app(&mut terminal, &mut state, &fetcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save config on exit
    state.config.save()?;

    result
}

fn run_app<S: ImageSource>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    fetcher: &ImageFetcher<S>,
) -> Result<()> {
    loop {
        // Draw UI (also measures how many cards fit)
        terminal.draw(|frame| ui::render(frame, state))?;
        sync_rows(state, fetcher);

        // Handle events
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            events::handle_key(state, key);
            sync_rows(state, fetcher);
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Rebind row slots to whatever is on screen now
fn sync_rows<S: ImageSource>(state: &mut AppState, fetcher: &ImageFetcher<S>) {
    let issued = state
        .rows
        .sync(fetcher, &state.items, state.scroll, state.visible_rows);
    if issued > 0 {
        tracing::debug!("Requested artwork for {issued} rows");
    }
}
