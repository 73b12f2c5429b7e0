//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::LookupError;
use super::types::{MovieDetail, SearchPage};

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Searches titles by free text, one page at a time (pages start at 1).
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Service` with the service message when the
    /// service reports `Response: "False"`, and another variant when the
    /// request, status, or JSON decoding fails.
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, LookupError>;

    /// Fetches the full record of a single title by IMDb ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn detail(&self, id: &str) -> Result<MovieDetail, LookupError>;
}
