//! Per-item rating and comment operations.
//!
//! Ratings live under `rating_<id>` as a stringified integer and comments
//! under `comments_<id>` as a JSON array of strings.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::kv::{get_item, set_item};

/// Key prefix for ratings.
const RATING_PREFIX: &str = "rating_";

/// Key prefix for comment lists.
const COMMENTS_PREFIX: &str = "comments_";

/// A star rating between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating (number of stars in the control).
    pub const MAX: u8 = 5;

    /// Creates a rating, or `None` if `stars` is outside 1-5.
    #[must_use]
    pub const fn new(stars: u8) -> Option<Self> {
        if stars >= Self::MIN && stars <= Self::MAX {
            Some(Self(stars))
        } else {
            None
        }
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rating and comments attached to one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    /// Star rating, if the user set one.
    pub rating: Option<Rating>,
    /// Comments in the order they were added.
    pub comments: Vec<String>,
}

fn rating_key(id: &str) -> String {
    format!("{RATING_PREFIX}{id}")
}

fn comments_key(id: &str) -> String {
    format!("{COMMENTS_PREFIX}{id}")
}

/// Reads the rating for `id`.
///
/// A stored value that is not an integer in 1-5 is reported as absent.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_rating(conn: &Connection, id: &str) -> Result<Option<Rating>> {
    let Some(raw) = get_item(conn, &rating_key(id))? else {
        return Ok(None);
    };

    let rating = raw.trim().parse::<u8>().ok().and_then(Rating::new);
    if rating.is_none() {
        tracing::warn!(id, value = %raw, "Ignoring invalid stored rating");
    }
    Ok(rating)
}

/// Stores the rating for `id`, replacing any previous one.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn set_rating(conn: &Connection, id: &str, rating: Rating) -> Result<()> {
    set_item(conn, &rating_key(id), &rating.to_string())
        .with_context(|| format!("failed to save rating for {id}"))?;
    tracing::debug!(id, stars = rating.stars(), "Rating saved");
    Ok(())
}

/// Reads the comment list for `id` (empty if none stored).
///
/// A stored value that is not a JSON array of strings is reported as empty.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_comments(conn: &Connection, id: &str) -> Result<Vec<String>> {
    let Some(raw) = get_item(conn, &comments_key(id))? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(comments) => Ok(comments),
        Err(e) => {
            tracing::warn!(id, error = %e, "Ignoring undecodable stored comments");
            Ok(Vec::new())
        }
    }
}

/// Appends `text` to the comment list for `id` and returns the updated list.
///
/// The read-modify-write runs in a single transaction.
///
/// # Errors
///
/// Returns an error if the database operation or JSON encoding fails.
pub fn append_comment(conn: &Connection, id: &str, text: &str) -> Result<Vec<String>> {
    let tx = conn
        .unchecked_transaction()
        .context("failed to begin transaction")?;

    let mut comments = get_comments(&tx, id)?;
    comments.push(String::from(text));

    let encoded = serde_json::to_string(&comments).context("failed to encode comments")?;
    set_item(&tx, &comments_key(id), &encoded)
        .with_context(|| format!("failed to save comments for {id}"))?;

    tx.commit().context("failed to commit comment append")?;
    tracing::debug!(id, total = comments.len(), "Comment appended");
    Ok(comments)
}

/// Reads the rating and comments for `id`.
///
/// # Errors
///
/// Returns an error if a database query fails.
pub fn load_annotations(conn: &Connection, id: &str) -> Result<Annotations> {
    Ok(Annotations {
        rating: get_rating(conn, id)?,
        comments: get_comments(conn, id)?,
    })
}
