//! TUI rendering logic for the browser.

use cinesearch_store::Rating;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};

use super::state::{InputMode, TuiState};
use crate::browser::{DetailPanel, DetailView, Listing, NO_MOVIE_FOUND, ViewState};
use crate::pagination::PageWindow;

/// Placeholder OMDb uses for missing fields.
const NOT_AVAILABLE: &str = "N/A";

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, view: &ViewState, window: &PageWindow, tui: &mut TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Min(5),    // main content
            Constraint::Length(3), // pagination bar
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_search_box(frame, chunks[0], tui);

    match &view.detail {
        DetailPanel::Hidden => draw_listing(frame, chunks[1], view, tui),
        DetailPanel::Showing(shown) => {
            let pane_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(chunks[1]);
            draw_listing(frame, pane_chunks[0], view, tui);
            draw_detail(frame, pane_chunks[1], shown, tui);
        }
    }

    if view.pagination_visible() {
        draw_pagination(frame, chunks[2], window, view.pagination.total_pages());
    }

    draw_footer(frame, chunks[3], tui);
}

/// Draws the search input box.
fn draw_search_box(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let style = if tui.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let search = Paragraph::new(tui.search_input.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, area);
}

/// Draws the result cards, or the empty-state message.
fn draw_listing(frame: &mut Frame, area: Rect, view: &ViewState, tui: &mut TuiState) {
    let block = Block::default().borders(Borders::ALL);

    let results = match &view.listing {
        Listing::Idle => {
            let hint = Paragraph::new("Press / and type a title to search.")
                .block(block.title(" Movies "));
            frame.render_widget(hint, area);
            return;
        }
        Listing::NoMovieFound => {
            let message = Paragraph::new(NO_MOVIE_FOUND)
                .style(Style::default().fg(Color::Red))
                .block(block.title(" Movies "));
            frame.render_widget(message, area);
            return;
        }
        Listing::Results(results) => results,
    };

    let displayed = view.detail.displayed_id();
    let header = Row::new(vec!["Title", "Year", "IMDb ID"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = results
        .iter()
        .map(|item| {
            let style = if displayed == Some(item.id.as_str()) {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Row::new(vec![item.title.clone(), item.year.clone(), item.id.clone()]).style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(11),
    ];

    let title = format!(
        " Movies: \"{}\" ({} results) ",
        view.query,
        view.pagination.total_results()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(title))
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut tui.results_table_state);
}

/// Draws the pagination bar.
fn draw_pagination(frame: &mut Frame, area: Rect, window: &PageWindow, total_pages: u32) {
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "\u{2039} Previous ",
        if window.previous_enabled {
            Style::default()
        } else {
            disabled
        },
    )];
    for (n, button) in window.buttons.iter().enumerate() {
        let label = format!(" {}:{} ", n.saturating_add(1), button.page);
        let style = if button.enabled {
            Style::default()
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(label, style));
    }
    spans.push(Span::styled(
        " Next \u{203a}",
        if window.next_enabled {
            Style::default()
        } else {
            disabled
        },
    ));

    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Pages {}-{} of {total_pages} ",
            window.start, window.end
        )));
    frame.render_widget(bar, area);
}

/// Renders `rating` as filled and empty stars.
fn stars(rating: Option<Rating>) -> String {
    let filled = usize::from(rating.map_or(0, Rating::stars));
    let empty = usize::from(Rating::MAX).saturating_sub(filled);
    format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(empty))
}

/// Returns `value`, or `-` for missing fields.
fn or_dash(value: &str) -> &str {
    if value.is_empty() || value == NOT_AVAILABLE {
        "-"
    } else {
        value
    }
}

/// Draws the detail panel with rating and comments.
fn draw_detail(frame: &mut Frame, area: Rect, shown: &DetailView, tui: &TuiState) {
    let detail = &shown.detail;
    let label = Style::default().fg(Color::Yellow);

    let mut lines = vec![
        Line::from(Span::styled(
            detail.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} \u{b7} {} \u{b7} {} \u{b7} {}",
            or_dash(&detail.year),
            or_dash(&detail.rated),
            or_dash(&detail.runtime),
            or_dash(&detail.genre),
        )),
        Line::from(vec![
            Span::styled("Director: ", label),
            Span::raw(or_dash(&detail.director)),
        ]),
        Line::from(vec![
            Span::styled("Actors: ", label),
            Span::raw(or_dash(&detail.actors)),
        ]),
        Line::from(vec![
            Span::styled("IMDb rating: ", label),
            Span::raw(or_dash(&detail.imdb_rating)),
        ]),
        Line::from(vec![
            Span::styled("Poster: ", label),
            Span::raw(or_dash(&detail.poster_url)),
        ]),
        Line::from(""),
        Line::from(or_dash(&detail.plot)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Your rating: ", label),
            Span::styled(
                stars(shown.annotations.rating),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
    ];

    if shown.annotations.comments.is_empty() {
        lines.push(Line::from(Span::styled(
            "No comments yet.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled("Previous comments", label)));
        lines.extend(
            shown
                .annotations
                .comments
                .iter()
                .map(|comment| Line::from(format!("\u{2022} {comment}"))),
        );
    }

    if tui.input_mode == InputMode::Comment {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::raw(tui.comment_input.as_str()),
        ]));
    }

    let title = format!(" {} ", detail.id);
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(panel, area);
}

/// Draws the footer with key hints or the status message.
fn draw_footer(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let help_text = match (&tui.status, tui.input_mode) {
        (Some(status), InputMode::Normal) => Line::from(status.as_str()),
        (_, InputMode::Search) => Line::from("Type a title | Enter: search | Esc: cancel"),
        (_, InputMode::Comment) => Line::from("Type a comment | Enter: save | Esc: cancel"),
        (_, InputMode::Rate) => Line::from("1-5: stars | other: cancel"),
        (None, InputMode::Normal) => Line::from(vec![Span::raw(
            "\u{2191}\u{2193}: move  Enter: details  \u{2190}\u{2192}: page  1-9: page button  r/+/-: rate  c: comment  o: open  /: search  q: quit",
        )]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_stars() {
        // Arrange & Act & Assert
        assert_eq!(stars(None), "\u{2606}\u{2606}\u{2606}\u{2606}\u{2606}");
        assert_eq!(
            stars(Rating::new(3)),
            "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}"
        );
    }

    #[test]
    fn test_or_dash() {
        // Arrange & Act & Assert
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("N/A"), "-");
        assert_eq!(or_dash("140 min"), "140 min");
    }
}
