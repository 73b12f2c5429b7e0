//! Local annotation store.
//!
//! Uses `rusqlite` (bundled `SQLite`) as a string-keyed, string-valued
//! store holding per-item star ratings and comment lists.

/// Per-item rating and comment operations.
pub mod annotations;
mod connection;
/// String key-value layer.
pub mod kv;
mod migrations;

pub use annotations::{
    Annotations, Rating, append_comment, get_comments, get_rating, load_annotations, set_rating,
};
pub use connection::open_store;
