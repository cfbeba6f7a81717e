//! Twitter/X API integration surface exposed to the HTTP layer.
//!
//! `client` wraps the three upstream endpoints we use (v2 recent search,
//! v1.1 user timeline, v2 tweet lookup), `types` holds their response models,
//! `normalize` maps both shapes onto one record, and `source` glues them into
//! the [`TweetSource`] trait the server depends on.
pub mod client;
pub mod error;
pub mod normalize;
pub mod source;
pub mod types;

pub use client::TwitterApi;
pub use error::TwitterError;
pub use normalize::{Account, NormalizedTweet};
pub use source::{TweetQuery, TweetSource};
