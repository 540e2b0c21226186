//! HTTP API handlers for albumeo-search

pub mod artwork;
pub mod health;
pub mod search;

pub use artwork::get_artwork;
pub use health::health_routes;
pub use search::{parse_query, search_albums};
