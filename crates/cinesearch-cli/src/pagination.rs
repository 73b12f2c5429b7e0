//! Pagination window computation.
//!
//! Pure bookkeeping shared by the TUI and the one-shot `search` command:
//! given the total number of matches and the current page, decides which
//! page buttons are visible and which controls are enabled.

use cinesearch_api::omdb::OMDB_PAGE_SIZE;

/// Default number of page buttons shown at once.
pub const DEFAULT_WINDOW_SIZE: u32 = 5;

/// A single page-number button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    /// Page number (1-based).
    pub page: u32,
    /// `false` for the button of the current page.
    pub enabled: bool,
}

/// The visible slice of the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// First visible page.
    pub start: u32,
    /// Last visible page (`start - 1` when no page exists).
    pub end: u32,
    /// Visible page buttons, ascending.
    pub buttons: Vec<PageButton>,
    /// Whether the "Previous" control is enabled.
    pub previous_enabled: bool,
    /// Whether the "Next" control is enabled.
    pub next_enabled: bool,
}

impl PageWindow {
    /// Returns the visible page numbers.
    #[must_use]
    pub fn pages(&self) -> Vec<u32> {
        self.buttons.iter().map(|b| b.page).collect()
    }
}

/// Number of pages needed for `total_results` at `page_size` per page.
#[must_use]
pub const fn total_pages(total_results: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_results.div_ceil(page_size)
}

/// Computes the sliding window of page buttons centred on `current_page`.
///
/// Shows exactly `window_size` buttons whenever there are at least that many
/// pages, otherwise one button per page. The window is clamped to
/// `[1, total_pages]` and slides left when it hits the last page.
#[must_use]
pub fn compute_window(
    current_page: u32,
    total_results: u32,
    page_size: u32,
    window_size: u32,
) -> PageWindow {
    let window_size = window_size.max(1);
    let last_page = total_pages(total_results, page_size);

    let mut start = current_page.saturating_sub(window_size / 2).max(1);
    let end = start
        .saturating_add(window_size.saturating_sub(1))
        .min(last_page);

    if end.saturating_sub(start).saturating_add(1) < window_size {
        start = end
            .saturating_sub(window_size.saturating_sub(1))
            .max(1);
    }

    let buttons = (start..=end)
        .map(|page| PageButton {
            page,
            enabled: page != current_page,
        })
        .collect();

    PageWindow {
        start,
        end,
        buttons,
        previous_enabled: current_page > 1,
        next_enabled: current_page < last_page,
    }
}

/// Current page and match count of the active search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Current page (1-based).
    current_page: u32,
    /// Total matches reported by the last successful search.
    total_results: u32,
    /// Results per page.
    page_size: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(OMDB_PAGE_SIZE)
    }
}

impl PaginationState {
    /// Creates an empty state on page 1.
    #[must_use]
    pub const fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            total_results: 0,
            page_size,
        }
    }

    /// Returns the current page.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the total number of matches.
    #[must_use]
    pub const fn total_results(&self) -> u32 {
        self.total_results
    }

    /// Returns the number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        total_pages(self.total_results, self.page_size)
    }

    /// Returns `true` if `page` is within `[1, total_pages]`.
    #[must_use]
    pub const fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages()
    }

    /// Starts a new search on page 1.
    pub const fn reset(&mut self) {
        self.current_page = 1;
        self.total_results = 0;
    }

    /// Records the match count reported by the service.
    pub const fn set_total_results(&mut self, total_results: u32) {
        self.total_results = total_results;
    }

    /// Moves to `page`. Returns `false` (and changes nothing) if out of range.
    pub const fn go_to(&mut self, page: u32) -> bool {
        if !self.contains(page) {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Page after the current one, if any.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        let next = self.current_page.saturating_add(1);
        if self.contains(next) { Some(next) } else { None }
    }

    /// Page before the current one, if any.
    #[must_use]
    pub const fn previous_page(&self) -> Option<u32> {
        let previous = self.current_page.saturating_sub(1);
        if self.contains(previous) {
            Some(previous)
        } else {
            None
        }
    }

    /// Computes the visible window for the current page.
    #[must_use]
    pub fn window(&self, window_size: u32) -> PageWindow {
        compute_window(
            self.current_page,
            self.total_results,
            self.page_size,
            window_size,
        )
    }
}
