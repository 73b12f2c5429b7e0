//! OMDb API client module.
//!
//! Handles HTTP requests to the OMDb endpoint and retrieves
//! paged title searches and single-title details.

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{OMDB_BASE_URL, OmdbClient, OmdbClientBuilder};
pub use error::LookupError;
pub use types::{MovieDetail, OMDB_PAGE_SIZE, SearchPage, SearchResult};
