use std::collections::HashMap;

use async_trait::async_trait;

use crate::twitter::client::TwitterApi;
use crate::twitter::error::TwitterError;
use crate::twitter::normalize::{self, NormalizedTweet};
use crate::twitter::types::{LookupResponse, SearchResponse, TimelineTweet, User};

/// What the caller is asking tweets for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TweetQuery {
    /// Recent tweets tagged `#<tag>` (the tag is stored without `#`).
    Hashtag(String),
    /// Most recent tweets posted by `@<screen_name>`.
    User(String),
}

impl TweetQuery {
    pub fn kind(&self) -> &'static str {
        match self {
            TweetQuery::Hashtag(_) => "hashtag",
            TweetQuery::User(_) => "user",
        }
    }

    pub fn term(&self) -> &str {
        match self {
            TweetQuery::Hashtag(t) | TweetQuery::User(t) => t,
        }
    }
}

/// Anything that can answer a [`TweetQuery`] with at most `count` normalized tweets.
#[async_trait]
pub trait TweetSource: Send + Sync {
    async fn tweets(
        &self,
        query: &TweetQuery,
        count: u32,
    ) -> Result<Vec<NormalizedTweet>, TwitterError>;
}

#[async_trait]
impl TweetSource for TwitterApi {
    async fn tweets(
        &self,
        query: &TweetQuery,
        count: u32,
    ) -> Result<Vec<NormalizedTweet>, TwitterError> {
        let mut tweets = match query {
            TweetQuery::Hashtag(tag) => self.tweets_by_hashtag(tag, count).await?,
            TweetQuery::User(screen_name) => self.tweets_by_user(screen_name, count).await?,
        };
        // upstream pages are never smaller than 10
        tweets.truncate(count as usize);
        Ok(tweets)
    }
}

impl TwitterApi {
    async fn tweets_by_hashtag(
        &self,
        hashtag: &str,
        count: u32,
    ) -> Result<Vec<NormalizedTweet>, TwitterError> {
        let resp = self.recent_search(hashtag, count).await?;
        normalize_search(&resp)
    }

    async fn tweets_by_user(
        &self,
        screen_name: &str,
        count: u32,
    ) -> Result<Vec<NormalizedTweet>, TwitterError> {
        let Some(timeline) = self.user_timeline(screen_name, count).await? else {
            return Ok(Vec::new());
        };
        if timeline.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = timeline.iter().map(|t| t.id_str.clone()).collect();
        let lookup = self.lookup_tweets(&ids).await?;
        normalize_timeline(&timeline, &lookup)
    }
}

/// Join each search hit to its author from `includes.users` and normalize it.
pub fn normalize_search(resp: &SearchResponse) -> Result<Vec<NormalizedTweet>, TwitterError> {
    if resp.is_empty() {
        return Ok(Vec::new());
    }

    let users: HashMap<&str, &User> = resp
        .includes
        .as_ref()
        .and_then(|inc| inc.users.as_ref())
        .map(|users| users.iter().map(|u| (u.id.as_str(), u)).collect())
        .unwrap_or_default();

    resp.data
        .iter()
        .flatten()
        .map(|tweet| {
            let author = tweet
                .author_id
                .as_deref()
                .and_then(|id| users.get(id))
                .ok_or_else(|| TwitterError::MissingAuthor {
                    tweet_id: tweet.id.clone(),
                    author_id: tweet.author_id.clone(),
                })?;
            normalize::from_search(tweet, author)
        })
        .collect()
}

/// Backfill reply counts from the lookup response and normalize the timeline.
pub fn normalize_timeline(
    timeline: &[TimelineTweet],
    lookup: &LookupResponse,
) -> Result<Vec<NormalizedTweet>, TwitterError> {
    let replies: HashMap<&str, u64> = lookup
        .data
        .iter()
        .flatten()
        .filter_map(|t| t.public_metrics.map(|m| (t.id.as_str(), m.reply_count)))
        .collect();

    timeline
        .iter()
        .map(|tweet| {
            let reply_count = replies.get(tweet.id_str.as_str()).copied().ok_or_else(|| {
                TwitterError::MissingMetrics {
                    tweet_id: tweet.id_str.clone(),
                }
            })?;
            normalize::from_timeline(tweet, reply_count)
        })
        .collect()
}
