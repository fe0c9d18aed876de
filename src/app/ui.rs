//! UI rendering for the TUI

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use ratatui_image::StatefulImage;

use super::state::{AppState, Mode};

/// Dexter icon
const ICON: &str = "◓";

/// Search affordance in the header (inert)
const SEARCH_ICON: &str = "🔍";

/// Height of one card, borders included
pub const CARD_HEIGHT: u16 = 7;

/// Width of the artwork column inside a card
const IMAGE_WIDTH: u16 = 14;

/// Main render function
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let colors = state.theme.colors();

    // Set background
    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Cards
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, state, chunks[0]);
    render_cards(frame, state, chunks[1]);
    render_status_bar(frame, state, chunks[2]);

    if state.mode == Mode::Help {
        render_help_popup(frame, state);
    }
}

/// Number of whole cards that fit in `height` rows.
pub fn cards_that_fit(height: u16) -> usize {
    usize::from((height / CARD_HEIGHT).max(1))
}

fn render_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block())
        .title(format!(" {ICON} Dexter "))
        .title_style(colors.logo_style_primary());

    let search = Paragraph::new(Line::from(Span::styled(
        format!("{SEARCH_ICON} "),
        colors.text_muted(),
    )))
    .alignment(Alignment::Right)
    .block(block);

    frame.render_widget(search, area);
}

fn render_cards(frame: &mut Frame, state: &mut AppState, area: Rect) {
    state.set_visible_rows(cards_that_fit(area.height));

    for row in 0..state.visible_rows {
        let index = state.scroll + row;
        if index >= state.items.len() {
            break;
        }
        let card_area = Rect {
            x: area.x,
            y: area.y + (row as u16) * CARD_HEIGHT,
            width: area.width,
            height: CARD_HEIGHT.min(area.height.saturating_sub((row as u16) * CARD_HEIGHT)),
        };
        render_card(frame, state, row, index, card_area);
    }
}

fn render_card(frame: &mut Frame, state: &mut AppState, row: usize, index: usize, area: Rect) {
    let colors = state.theme.colors();
    let selected = index == state.selected;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if selected {
            colors.block_focus()
        } else {
            colors.block()
        })
        .style(Style::default().bg(colors.bg_secondary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(IMAGE_WIDTH), Constraint::Min(0)])
        .split(inner);

    render_artwork(frame, state, row, index, columns[0]);

    let item = &state.items[index];
    let divider_width = usize::from(columns[1].width.saturating_sub(2));
    let name_style = if selected {
        colors.text_primary().add_modifier(Modifier::BOLD)
    } else {
        colors.text().add_modifier(Modifier::BOLD)
    };
    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {}", item.display_name()), name_style),
            Span::styled(format!("  #{:03}", item.number), colors.text_muted()),
        ]),
        Line::styled(format!(" {}", "─".repeat(divider_width)), colors.text_muted()),
        Line::styled(format!(" {}", item.display_kind()), colors.text_secondary()),
    ];
    frame.render_widget(Paragraph::new(text), columns[1]);
}

fn render_artwork(frame: &mut Frame, state: &mut AppState, row: usize, index: usize, area: Rect) {
    let colors = state.theme.colors();
    let area = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };

    if !state.config.show_images {
        return;
    }

    let protocol = match state.artwork(row, index) {
        Some((url, image)) => state.image_protocol(&url, &image),
        None => state.placeholder_protocol(),
    };

    if let Some(protocol) = protocol {
        frame.render_stateful_widget(StatefulImage::new(), area, protocol);
    } else {
        // No graphics support at all
        let glyph = Paragraph::new(vec![Line::from(""), Line::from(""), Line::from(ICON)])
            .alignment(Alignment::Center)
            .style(colors.text_muted());
        frame.render_widget(glyph, area);
    }
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let position = format!(" {}/{} ", state.selected + 1, state.items.len());

    let content = if state.status.is_empty() {
        vec![
            Span::styled(position, colors.text_secondary()),
            Span::styled(" j/k", colors.key_hint()),
            Span::styled(": move  ", colors.text_muted()),
            Span::styled("?", colors.key_hint()),
            Span::styled(": help  ", colors.text_muted()),
            Span::styled("t", colors.key_hint()),
            Span::styled(": theme  ", colors.text_muted()),
            Span::styled("q", colors.key_hint()),
            Span::styled(": quit", colors.text_muted()),
        ]
    } else {
        vec![
            Span::styled(position, colors.text_secondary()),
            Span::styled(&state.status, colors.text_secondary()),
        ]
    };

    let status =
        Paragraph::new(Line::from(content)).style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(status, area);
}

fn render_help_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(50, 60, frame.area());

    // Solid background so the cards underneath don't bleed through
    let bg_block = Block::default().style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let shortcut = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<17}"), colors.key_hint()),
            Span::styled(what, colors.text()),
        ])
    };

    let help_content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Navigation",
            colors.text_primary().add_modifier(Modifier::BOLD),
        )]),
        shortcut("j/k or ↑/↓", "Move between cards"),
        shortcut("PgDn/PgUp", "Move a page"),
        shortcut("g/G", "Go to first/last card"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  General",
            colors.text_primary().add_modifier(Modifier::BOLD),
        )]),
        shortcut("t", "Next theme"),
        shortcut("?", "Toggle this help"),
        shortcut("q", "Quit application"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", colors.text_muted()),
            Span::styled("Esc", colors.key_hint()),
            Span::styled(" or ", colors.text_muted()),
            Span::styled("?", colors.key_hint()),
            Span::styled(" to close", colors.text_muted()),
        ]),
    ];

    let help = Paragraph::new(help_content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block_focus())
                .style(Style::default().bg(colors.bg_secondary))
                .title(" ⌨ Keyboard Shortcuts ")
                .title_style(colors.text_primary()),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, popup_area);
}

const fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(popup_width)) / 2,
        y: r.y + (r.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::images::placeholder::pokeball;
    use crate::models::catalog;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(width: u16, height: u16, state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cards_that_fit() {
        assert_eq!(cards_that_fit(0), 1);
        assert_eq!(cards_that_fit(CARD_HEIGHT * 3 + 2), 3);
    }

    #[test]
    fn test_render_header_and_cards() {
        let config = Config {
            show_images: false,
            ..Config::default()
        };
        let mut state = AppState::new(config, catalog(), pokeball(8));
        let screen = draw(60, 3 + CARD_HEIGHT * 2 + 1, &mut state);

        assert!(screen.contains("Dexter"));
        assert!(screen.contains("Bulbasaur"));
        assert!(screen.contains("Grass"));
        assert!(screen.contains("Charmander"));
        assert!(!screen.contains("Squirtle"));
        assert_eq!(state.visible_rows, 2);
    }

    #[test]
    fn test_render_help() {
        let config = Config {
            show_images: false,
            ..Config::default()
        };
        let mut state = AppState::new(config, catalog(), pokeball(8));
        state.mode = Mode::Help;
        let screen = draw(80, 40, &mut state);
        assert!(screen.contains("Keyboard Shortcuts"));
    }
}
