//! Thin wrapper around the three Twitter/X endpoints tweetwire needs.
//!
//! Shapes request parameters and auth, then delegates to the shared HTTP
//! client. Each method issues exactly one upstream call.
use std::borrow::Cow;
use std::time::Duration;

use tweetwire_http::{HttpClient, RequestOpts, StatusCode};

use crate::twitter::error::TwitterError;
use crate::twitter::types::{LookupResponse, SearchResponse, TimelineTweet};

/// Both page-sized endpoints reject requests for fewer than this many items.
pub const MIN_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

const RECENT_SEARCH: &str = "2/tweets/search/recent";
const USER_TIMELINE: &str = "1.1/statuses/user_timeline.json";
const TWEET_LOOKUP: &str = "2/tweets";

/// Page size to ask upstream for when the caller wants `count` tweets.
pub fn upstream_page_size(count: u32) -> u32 {
    count.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

#[derive(Clone, Debug)]
pub struct TwitterApi {
    http: HttpClient,
    bearer: String,
}

impl TwitterApi {
    /// Client for the API rooted at `base_url`, e.g. `https://api.twitter.com`.
    pub fn with_base_url(
        base_url: &str,
        bearer_token: String,
        timeout: Duration,
    ) -> Result<Self, TwitterError> {
        // `Url::join` drops the last path segment unless the base ends in '/'.
        let base = if base_url.ends_with('/') {
            Cow::Borrowed(base_url)
        } else {
            Cow::Owned(format!("{base_url}/"))
        };
        Ok(Self {
            http: HttpClient::new(&base)?.with_timeout(timeout),
            bearer: bearer_token,
        })
    }

    fn opts<'a>(&'a self, query: Vec<(&'a str, Cow<'a, str>)>) -> RequestOpts<'a> {
        RequestOpts {
            bearer: Some(&self.bearer),
            query: Some(query),
            ..Default::default()
        }
    }

    /// v2 recent search for `#hashtag`, expanded with author profiles.
    pub async fn recent_search(
        &self,
        hashtag: &str,
        count: u32,
    ) -> Result<SearchResponse, TwitterError> {
        let params: Vec<(&str, Cow<'_, str>)> = vec![
            ("query", format!("#{hashtag}").into()),
            ("max_results", upstream_page_size(count).to_string().into()),
            ("tweet.fields", "entities,created_at,public_metrics".into()),
            ("user.fields", "id,url,name,username".into()),
            ("expansions", "author_id".into()),
        ];

        let resp: SearchResponse = self.http.get_json(RECENT_SEARCH, self.opts(params)).await?;

        tracing::debug!(
            hashtag,
            result_count = ?resp.meta.as_ref().and_then(|m| m.result_count),
            "twitter.recent_search"
        );
        Ok(resp)
    }

    /// v1.1 user timeline. `None` when upstream answers 404, which it does for
    /// unknown handles as well as for empty timelines.
    pub async fn user_timeline(
        &self,
        screen_name: &str,
        count: u32,
    ) -> Result<Option<Vec<TimelineTweet>>, TwitterError> {
        let params: Vec<(&str, Cow<'_, str>)> = vec![
            ("screen_name", screen_name.into()),
            ("count", upstream_page_size(count).to_string().into()),
        ];

        match self
            .http
            .get_json::<Vec<TimelineTweet>>(USER_TIMELINE, self.opts(params))
            .await
        {
            Ok(tweets) => {
                tracing::debug!(screen_name, returned = tweets.len(), "twitter.user_timeline");
                Ok(Some(tweets))
            }
            Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => {
                tracing::info!(screen_name, error = %err, "twitter.user_timeline.not_found");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// v2 batched lookup, used only to backfill reply counts for timeline tweets.
    pub async fn lookup_tweets(&self, ids: &[String]) -> Result<LookupResponse, TwitterError> {
        let params: Vec<(&str, Cow<'_, str>)> = vec![
            ("ids", ids.join(",").into()),
            ("tweet.fields", "public_metrics".into()),
        ];

        let resp: LookupResponse = self.http.get_json(TWEET_LOOKUP, self.opts(params)).await?;

        if let Some(errors) = resp.errors.as_ref().filter(|e| !e.is_empty()) {
            tracing::warn!(
                requested = ids.len(),
                unresolved = errors.len(),
                "twitter.lookup.partial"
            );
        }
        Ok(resp)
    }
}
