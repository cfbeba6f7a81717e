//! Map both upstream tweet shapes onto [`NormalizedTweet`].
//!
//! v2 search results carry everything we need once the author is joined in
//! from `includes.users`. v1.1 timeline entries lack a reply count, so the
//! caller passes the one it looked up separately.
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::twitter::error::TwitterError;
use crate::twitter::types::{TimelineTweet, Tweet, User};

/// `17:08 PM - 23 Sep 2020`
const DISPLAY_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[hour padding:none]:[minute] [period] - [day padding:none] [month repr:short] [year]"
);

/// v1.1 `created_at`, e.g. `Wed Sep 23 17:08:34 +0000 2020`
const TIMELINE_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub fullname: String,
    /// Profile path relative to the platform root: `/<handle>`.
    pub href: String,
    pub id: String,
}

/// The record both endpoints return, whichever upstream API served it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTweet {
    pub account: Account,
    pub date: String,
    pub hashtags: Vec<String>,
    pub likes: u64,
    pub replies: u64,
    pub retweets: u64,
    pub text: String,
}

/// Normalize a v2 search hit whose author has already been resolved.
pub fn from_search(tweet: &Tweet, author: &User) -> Result<NormalizedTweet, TwitterError> {
    let metrics = tweet
        .public_metrics
        .ok_or_else(|| TwitterError::MissingMetrics {
            tweet_id: tweet.id.clone(),
        })?;

    let created_at = tweet
        .created_at
        .as_deref()
        .ok_or_else(|| TwitterError::InvalidDate {
            value: String::new(),
            reason: format!("tweet {} has no created_at", tweet.id),
        })?;

    let hashtags = tweet
        .entities
        .as_ref()
        .and_then(|e| e.hashtags.as_ref())
        .map(|tags| tags.iter().map(|h| format!("#{}", h.tag)).collect())
        .unwrap_or_default();

    Ok(NormalizedTweet {
        account: Account {
            fullname: author.name.clone(),
            href: format!("/{}", author.username),
            id: author.id.clone(),
        },
        date: display_date(parse_rfc3339(created_at)?)?,
        hashtags,
        likes: metrics.like_count,
        replies: metrics.reply_count,
        retweets: metrics.retweet_count,
        text: tweet.text.clone(),
    })
}

/// Normalize a v1.1 timeline entry; `replies` comes from the v2 lookup.
pub fn from_timeline(tweet: &TimelineTweet, replies: u64) -> Result<NormalizedTweet, TwitterError> {
    Ok(NormalizedTweet {
        account: Account {
            fullname: tweet.user.name.clone(),
            href: format!("/{}", tweet.user.screen_name),
            id: tweet.user.id_str.clone(),
        },
        date: display_date(parse_timeline_date(&tweet.created_at)?)?,
        hashtags: tweet
            .entities
            .hashtags
            .iter()
            .map(|h| format!("#{}", h.text))
            .collect(),
        likes: tweet.favorite_count,
        replies,
        retweets: tweet.retweet_count,
        text: tweet.text.clone(),
    })
}

fn parse_rfc3339(value: &str) -> Result<OffsetDateTime, TwitterError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| TwitterError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_timeline_date(value: &str) -> Result<OffsetDateTime, TwitterError> {
    OffsetDateTime::parse(value, TIMELINE_DATE).map_err(|e| TwitterError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Render in UTC; the hour stays on the 24h clock and the period is appended as-is.
pub fn display_date(at: OffsetDateTime) -> Result<String, TwitterError> {
    at.to_offset(UtcOffset::UTC)
        .format(DISPLAY_DATE)
        .map_err(|e| TwitterError::InvalidDate {
            value: at.to_string(),
            reason: e.to_string(),
        })
}
