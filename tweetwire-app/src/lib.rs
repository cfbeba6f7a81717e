//! HTTP front for tweetwire.
//!
//! Exposes `GET /hashtags/{hashtag}` and `GET /users/{screen_name}`, both
//! returning a JSON array of normalized tweets capped by an optional `limit`.

use std::sync::Arc;

use tweetwire_social::twitter::TweetSource;

pub mod error;
pub mod limit;
pub mod routes;

pub use routes::create_router;

/// Shared handler state: where tweets come from and the page size to use when
/// a request does not say.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn TweetSource>,
    pub default_limit: u32,
}

impl AppState {
    pub fn new(source: Arc<dyn TweetSource>, default_limit: u32) -> Self {
        Self {
            source,
            default_limit,
        }
    }
}
