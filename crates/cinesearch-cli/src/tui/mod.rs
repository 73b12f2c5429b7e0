//! Interactive movie browser TUI.
//!
//! Uses `ratatui` + `crossterm` for rendering. Key events are mapped to an
//! [`Action`] by [`dispatch_key`] and then applied to the [`Browser`].

/// Browser TUI state types.
pub mod state;
mod ui;

use std::io;

use anyhow::{Context, Result};
use cinesearch_api::omdb::LocalOmdbApi;
use cinesearch_store::Rating;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use self::state::{InputMode, TuiState};
use crate::browser::{Browser, DetailPanel, ViewState};
use crate::pagination::PageWindow;

/// IMDb title page prefix.
pub const IMDB_TITLE_URL: &str = "https://www.imdb.com/title";

/// State transition requested by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do beyond the local state change.
    None,
    /// Leave the browser.
    Quit,
    /// Submit a new search.
    Search(String),
    /// Jump to a page.
    GoToPage(u32),
    /// Move to the next page.
    NextPage,
    /// Move to the previous page.
    PreviousPage,
    /// Toggle the detail panel on an item.
    Select(String),
    /// Rate the displayed item.
    Rate(Rating),
    /// Add a comment to the displayed item.
    Comment(String),
    /// Open a URL in the system browser.
    Open(String),
}

impl Action {
    /// Returns `true` for actions that wait on the network.
    const fn fetches(&self) -> bool {
        matches!(
            self,
            Self::Search(_) | Self::GoToPage(_) | Self::NextPage | Self::PreviousPage | Self::Select(_)
        )
    }
}

/// Runs the browser TUI, searching for `initial_query` first if non-blank.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<A: LocalOmdbApi>(
    browser: &mut Browser<A>,
    initial_query: &str,
) -> Result<()> {
    let mut tui = TuiState::new(initial_query);
    if !initial_query.trim().is_empty() {
        browser.submit_search(initial_query).await;
        tui.reset_cursor(browser.state().results().len());
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, browser, &mut tui).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Draws one frame.
fn redraw<A: LocalOmdbApi>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    browser: &Browser<A>,
    tui: &mut TuiState,
) -> Result<()> {
    let window = browser.window();
    terminal
        .draw(|frame| ui::draw(frame, browser.state(), &window, tui))
        .context("failed to draw TUI")?;
    Ok(())
}

/// Main event loop.
async fn run_event_loop<A: LocalOmdbApi>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    browser: &mut Browser<A>,
    tui: &mut TuiState,
) -> Result<()> {
    loop {
        redraw(terminal, browser, tui)?;

        if event::poll(std::time::Duration::from_millis(100)).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            let window = browser.window();
            let action = dispatch_key(tui, browser.state(), &window, key.code, key.modifiers);
            match action {
                Action::None => {}
                Action::Quit => return Ok(()),
                action => {
                    if action.fetches() {
                        tui.status = Some(String::from("Loading..."));
                        redraw(terminal, browser, tui)?;
                    }
                    tui.status = None;
                    if let Err(e) = apply(browser, tui, action).await {
                        tracing::error!(error = %format!("{e:#}"), "Browser action failed");
                        tui.status = Some(format!("Error: {e:#}"));
                    }
                }
            }
        }
    }
}

/// Applies `action` to the browser.
async fn apply<A: LocalOmdbApi>(
    browser: &mut Browser<A>,
    tui: &mut TuiState,
    action: Action,
) -> Result<()> {
    match action {
        Action::None | Action::Quit => {}
        Action::Search(query) => {
            browser.submit_search(&query).await;
            tui.reset_cursor(browser.state().results().len());
        }
        Action::GoToPage(page) => {
            if browser.go_to_page(page).await {
                tui.reset_cursor(browser.state().results().len());
            }
        }
        Action::NextPage => {
            if browser.next_page().await {
                tui.reset_cursor(browser.state().results().len());
            }
        }
        Action::PreviousPage => {
            if browser.previous_page().await {
                tui.reset_cursor(browser.state().results().len());
            }
        }
        Action::Select(id) => browser.select_item(&id).await?,
        Action::Rate(rating) => {
            if browser.rate(rating)? {
                tui.status = Some(format!("Rated {rating}/{}", Rating::MAX));
            }
        }
        Action::Comment(text) => {
            if browser.submit_comment(&text)? {
                tui.status = Some(String::from("Comment saved"));
            }
        }
        Action::Open(url) => {
            if let Err(e) = open::that(&url) {
                tracing::warn!(url, error = %e, "Failed to open browser");
                tui.status = Some(format!("Failed to open {url}"));
            }
        }
    }
    Ok(())
}

/// Maps a key press to an action, updating local TUI state on the way.
pub fn dispatch_key(
    tui: &mut TuiState,
    view: &ViewState,
    window: &PageWindow,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Action {
    if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match tui.input_mode {
        InputMode::Search => handle_search_input(tui, key),
        InputMode::Comment => handle_comment_input(tui, key),
        InputMode::Rate => handle_rate_input(tui, key),
        InputMode::Normal => handle_normal_input(tui, view, window, key),
    }
}

/// Handles key input while typing a query.
fn handle_search_input(tui: &mut TuiState, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc => {
            tui.input_mode = InputMode::Normal;
            Action::None
        }
        KeyCode::Enter => {
            tui.input_mode = InputMode::Normal;
            Action::Search(tui.search_input.clone())
        }
        KeyCode::Backspace => {
            tui.input_pop();
            Action::None
        }
        KeyCode::Char(c) => {
            tui.input_push(c);
            Action::None
        }
        _ => Action::None,
    }
}

/// Handles key input while typing a comment.
fn handle_comment_input(tui: &mut TuiState, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc => {
            tui.take_comment();
            tui.input_mode = InputMode::Normal;
            Action::None
        }
        KeyCode::Enter => {
            tui.input_mode = InputMode::Normal;
            Action::Comment(tui.take_comment())
        }
        KeyCode::Backspace => {
            tui.input_pop();
            Action::None
        }
        KeyCode::Char(c) => {
            tui.input_push(c);
            Action::None
        }
        _ => Action::None,
    }
}

/// Handles the star count after `r`.
fn handle_rate_input(tui: &mut TuiState, key: KeyCode) -> Action {
    tui.input_mode = InputMode::Normal;
    let KeyCode::Char(c) = key else {
        return Action::None;
    };
    c.to_digit(10)
        .and_then(|d| u8::try_from(d).ok())
        .and_then(Rating::new)
        .map_or(Action::None, Action::Rate)
}

/// Handles key input in normal mode.
fn handle_normal_input(
    tui: &mut TuiState,
    view: &ViewState,
    window: &PageWindow,
    key: KeyCode,
) -> Action {
    let showing = matches!(view.detail, DetailPanel::Showing(_));
    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('/' | 'i') => {
            tui.input_mode = InputMode::Search;
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            tui.move_up();
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            tui.move_down(view.results().len());
            Action::None
        }
        KeyCode::Enter => view
            .results()
            .get(tui.cursor())
            .map_or(Action::None, |item| Action::Select(item.id.clone())),
        KeyCode::Esc => view
            .detail
            .displayed_id()
            .map_or(Action::None, |id| Action::Select(String::from(id))),
        KeyCode::Left | KeyCode::Char('h' | '[') if window.previous_enabled => {
            Action::PreviousPage
        }
        KeyCode::Right | KeyCode::Char('l' | ']') if window.next_enabled => Action::NextPage,
        KeyCode::Char(c @ '1'..='9') if view.pagination_visible() => c
            .to_digit(10)
            .and_then(|n| usize::try_from(n).ok())
            .and_then(|n| window.buttons.get(n.saturating_sub(1)))
            .filter(|button| button.enabled)
            .map_or(Action::None, |button| Action::GoToPage(button.page)),
        KeyCode::Char('r') if showing => {
            tui.input_mode = InputMode::Rate;
            Action::None
        }
        KeyCode::Char('+') => adjust_rating(view, true),
        KeyCode::Char('-') => adjust_rating(view, false),
        KeyCode::Char('c') if showing => {
            tui.input_mode = InputMode::Comment;
            Action::None
        }
        KeyCode::Char('o') => view
            .detail
            .displayed_id()
            .or_else(|| view.results().get(tui.cursor()).map(|item| item.id.as_str()))
            .map_or(Action::None, |id| Action::Open(format!("{IMDB_TITLE_URL}/{id}/"))),
        _ => Action::None,
    }
}

/// Rates the displayed item one star above or below its current rating.
fn adjust_rating(view: &ViewState, up: bool) -> Action {
    let DetailPanel::Showing(shown) = &view.detail else {
        return Action::None;
    };
    let current = shown.annotations.rating.map_or(0, Rating::stars);
    let target = if up {
        current.saturating_add(1)
    } else {
        current.saturating_sub(1)
    };
    Rating::new(target).map_or(Action::None, Action::Rate)
}
