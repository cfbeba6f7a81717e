use thiserror::Error;
use tweetwire_http::HttpError;

/// Anything that stops us from turning an upstream answer into normalized tweets.
#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("twitter request failed: {0}")]
    Http(#[from] HttpError),

    #[error("tweet {tweet_id} has no author in includes (author_id={author_id:?})")]
    MissingAuthor {
        tweet_id: String,
        author_id: Option<String>,
    },

    #[error("tweet {tweet_id} has no public metrics")]
    MissingMetrics { tweet_id: String },

    #[error("unparseable created_at {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },
}
