//! OMDb API response types.

use serde::Deserialize;

/// Number of results OMDb returns per search page.
pub const OMDB_PAGE_SIZE: u32 = 10;

/// `Response` value OMDb uses for a successful lookup.
const RESPONSE_TRUE: &str = "True";

// --- Search ---

/// Raw body of a `?s=` search response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OmdbSearchResponse {
    /// `"True"` or `"False"`.
    #[serde(rename = "Response")]
    pub response: String,
    /// Result items (absent when `Response` is `"False"`).
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchItem>,
    /// Total number of matches across all pages, as a decimal string.
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    /// Service error message (present when `Response` is `"False"`).
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    /// Returns `true` if the service reported success.
    pub(crate) fn is_success(&self) -> bool {
        self.response == RESPONSE_TRUE
    }
}

/// A single entry of the `Search` array.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OmdbSearchItem {
    /// Title.
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Release year (may be a range such as `1992–1995` for series).
    #[serde(rename = "Year", default)]
    pub year: String,
    /// IMDb identifier.
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    /// Poster URL or `N/A`.
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

/// A search result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Item identifier (IMDb ID).
    pub id: String,
    /// Title.
    pub title: String,
    /// Poster image URL (`N/A` when the service has none).
    pub poster_url: String,
    /// Release year.
    pub year: String,
}

impl From<OmdbSearchItem> for SearchResult {
    fn from(item: OmdbSearchItem) -> Self {
        Self {
            id: item.imdb_id,
            title: item.title,
            poster_url: item.poster,
            year: item.year,
        }
    }
}

/// One page of search results plus the overall match count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Results on this page (at most `OMDB_PAGE_SIZE`).
    pub results: Vec<SearchResult>,
    /// Total number of matches across all pages.
    pub total_results: u32,
}

// --- Detail ---

/// Full record of a single title from an `?i=` lookup.
///
/// Every field defaults to empty so a partial payload still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MovieDetail {
    /// Item identifier (IMDb ID).
    #[serde(rename = "imdbID", default)]
    pub id: String,
    /// Title.
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Poster image URL.
    #[serde(rename = "Poster", default)]
    pub poster_url: String,
    /// Release year.
    #[serde(rename = "Year", default)]
    pub year: String,
    /// Comma-separated genres.
    #[serde(rename = "Genre", default)]
    pub genre: String,
    /// Plot summary.
    #[serde(rename = "Plot", default)]
    pub plot: String,
    /// Age rating (e.g. `PG-13`).
    #[serde(rename = "Rated", default)]
    pub rated: String,
    /// Runtime (e.g. `140 min`).
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    /// Director(s).
    #[serde(rename = "Director", default)]
    pub director: String,
    /// Main cast.
    #[serde(rename = "Actors", default)]
    pub actors: String,
    /// IMDb user score.
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
}

impl MovieDetail {
    /// Creates an empty detail carrying only the item identifier.
    #[must_use]
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// `Response`/`Error` envelope shared by every OMDb reply.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OmdbEnvelope {
    /// `"True"` or `"False"`.
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    /// Service error message.
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbEnvelope {
    /// Returns the service error message when the reply is a failure.
    pub(crate) fn failure_message(&self) -> Option<&str> {
        match self.response.as_deref() {
            Some(RESPONSE_TRUE) => None,
            Some(_) => Some(self.error.as_deref().unwrap_or("unknown error")),
            None => None,
        }
    }
}
