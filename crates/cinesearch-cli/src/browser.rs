//! Search browser controller.
//!
//! Owns the OMDb client, the annotation store and the whole view state.
//! Every user interaction is one method call; the TUI only renders
//! `Browser::state` and dispatches key events here.

use anyhow::{Context, Result};
use cinesearch_api::omdb::{LocalOmdbApi, MovieDetail, OMDB_PAGE_SIZE, SearchResult};
use cinesearch_store::{Annotations, Rating, append_comment, get_rating, load_annotations, set_rating};
use rusqlite::Connection;
use tracing::instrument;

use crate::pagination::{PageWindow, PaginationState};

/// Message shown when a search yields nothing (or fails).
pub const NO_MOVIE_FOUND: &str = "No movie found!";

/// What the results area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Listing {
    /// No search submitted yet.
    #[default]
    Idle,
    /// Result cards of the current page (never empty).
    Results(Vec<SearchResult>),
    /// The last search returned nothing or failed.
    NoMovieFound,
}

/// Detail record and annotations of the displayed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Record fetched from OMDb.
    pub detail: MovieDetail,
    /// Locally stored rating and comments.
    pub annotations: Annotations,
}

/// Detail panel state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailPanel {
    /// Panel closed.
    #[default]
    Hidden,
    /// Panel open on one item.
    Showing(Box<DetailView>),
}

impl DetailPanel {
    /// Returns the identifier of the displayed item.
    #[must_use]
    pub fn displayed_id(&self) -> Option<&str> {
        match self {
            Self::Hidden => None,
            Self::Showing(view) => Some(view.detail.id.as_str()),
        }
    }
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Query of the active search (trimmed).
    pub query: String,
    /// Results area content.
    pub listing: Listing,
    /// Current page and match count.
    pub pagination: PaginationState,
    /// Detail panel content.
    pub detail: DetailPanel,
}

impl ViewState {
    /// Result cards of the current page (empty unless results are shown).
    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        match &self.listing {
            Listing::Results(results) => results,
            Listing::Idle | Listing::NoMovieFound => &[],
        }
    }

    /// The pagination bar is only shown alongside result cards.
    #[must_use]
    pub const fn pagination_visible(&self) -> bool {
        matches!(self.listing, Listing::Results(_))
    }
}

/// Search browser controller.
#[derive(Debug)]
pub struct Browser<A> {
    /// OMDb client.
    api: A,
    /// Annotation store.
    conn: Connection,
    /// Number of page buttons shown at once.
    window_size: u32,
    /// View state.
    state: ViewState,
}

impl<A: LocalOmdbApi> Browser<A> {
    /// Creates a controller with an idle view.
    #[must_use]
    pub fn new(api: A, conn: Connection, window_size: u32) -> Self {
        Self {
            api,
            conn,
            window_size,
            state: ViewState {
                pagination: PaginationState::new(OMDB_PAGE_SIZE),
                ..ViewState::default()
            },
        }
    }

    /// Returns the view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns the pagination window for the current page.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        self.state.pagination.window(self.window_size)
    }

    /// Submits a new search and shows its first page.
    ///
    /// A blank query only closes the detail panel.
    #[instrument(skip_all)]
    pub async fn submit_search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.state.detail = DetailPanel::Hidden;
            return;
        }

        self.state.query = String::from(query);
        self.state.pagination.reset();
        self.fetch_current_page().await;
    }

    /// Jumps to `page`. Returns `false` (and does nothing) if it is out of range.
    #[instrument(skip_all, fields(page = page))]
    pub async fn go_to_page(&mut self, page: u32) -> bool {
        if !self.state.pagination.go_to(page) {
            tracing::debug!(page, "Ignoring out-of-range page");
            return false;
        }
        self.state.detail = DetailPanel::Hidden;
        self.fetch_current_page().await;
        true
    }

    /// Moves to the next page, if any.
    pub async fn next_page(&mut self) -> bool {
        match self.state.pagination.next_page() {
            Some(page) => self.go_to_page(page).await,
            None => false,
        }
    }

    /// Moves to the previous page, if any.
    pub async fn previous_page(&mut self) -> bool {
        match self.state.pagination.previous_page() {
            Some(page) => self.go_to_page(page).await,
            None => false,
        }
    }

    /// Fetches the current page and updates the listing.
    ///
    /// Service failures and transport failures both end up as
    /// "No movie found!"; only the log tells them apart. If the service
    /// reports fewer pages than the current one, moves to its last page
    /// and fetches again.
    async fn fetch_current_page(&mut self) {
        loop {
            let page = self.state.pagination.current_page();
            let found = match self.api.search(&self.state.query, page).await {
                Ok(found) if !found.results.is_empty() => found,
                Ok(_) => {
                    tracing::info!(query = %self.state.query, page, "Search returned no results");
                    self.show_no_movie_found();
                    return;
                }
                Err(e) => {
                    if e.is_service() {
                        tracing::info!(query = %self.state.query, page, error = %e, "No matches");
                    } else {
                        tracing::warn!(
                            query = %self.state.query,
                            page,
                            error = %e,
                            "Error fetching movies"
                        );
                    }
                    self.show_no_movie_found();
                    return;
                }
            };

            self.state.pagination.set_total_results(found.total_results);
            if !self.state.pagination.contains(page) {
                let last = self.state.pagination.total_pages();
                tracing::warn!(
                    page,
                    total_results = found.total_results,
                    "Page is past the reported last page"
                );
                // `last < page` here, so the loop always makes progress.
                if !self.state.pagination.go_to(last) {
                    self.show_no_movie_found();
                    return;
                }
                continue;
            }

            tracing::info!(
                query = %self.state.query,
                page,
                total_results = found.total_results,
                "Search page loaded"
            );
            self.state.listing = Listing::Results(found.results);
            return;
        }
    }

    fn show_no_movie_found(&mut self) {
        self.state.listing = Listing::NoMovieFound;
        self.state.pagination.set_total_results(0);
        self.state.detail = DetailPanel::Hidden;
    }

    /// Opens the detail panel on `id`, or closes it if `id` is already shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the annotation store cannot be read.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn select_item(&mut self, id: &str) -> Result<()> {
        if self.state.detail.displayed_id() == Some(id) {
            self.state.detail = DetailPanel::Hidden;
            return Ok(());
        }

        let mut detail = match self.api.detail(id).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!(id, error = %e, "Error fetching movie details");
                MovieDetail::empty(id)
            }
        };
        // Annotations and toggling follow the selected id, not the one OMDb echoes back.
        if detail.id != id {
            tracing::debug!(requested = id, returned = %detail.id, "OMDb returned a different id");
            detail.id = String::from(id);
        }
        let annotations = load_annotations(&self.conn, id)
            .with_context(|| format!("failed to load annotations for {id}"))?;

        self.state.detail = DetailPanel::Showing(Box::new(DetailView {
            detail,
            annotations,
        }));
        Ok(())
    }

    /// Rates the displayed item. Returns `false` if no item is displayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the annotation store cannot be written.
    pub fn rate(&mut self, rating: Rating) -> Result<bool> {
        let DetailPanel::Showing(view) = &mut self.state.detail else {
            return Ok(false);
        };
        let id = view.detail.id.as_str();
        set_rating(&self.conn, id, rating)?;
        view.annotations.rating = get_rating(&self.conn, id)?;
        Ok(true)
    }

    /// Appends a comment to the displayed item.
    ///
    /// Returns `false` if no item is displayed or `text` is blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the annotation store cannot be written.
    pub fn submit_comment(&mut self, text: &str) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        let DetailPanel::Showing(view) = &mut self.state.detail else {
            return Ok(false);
        };
        view.annotations.comments = append_comment(&self.conn, &view.detail.id, text)?;
        Ok(true)
    }
}
