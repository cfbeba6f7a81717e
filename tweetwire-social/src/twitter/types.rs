use serde::{Deserialize, Serialize};

// ==============================
// v2: /2/tweets/search/recent and /2/tweets
// ==============================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<Tweet>>,
    #[serde(default)]
    pub includes: Option<Includes>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl SearchResponse {
    /// Upstream reports an empty page via `meta.result_count == 0` and omits `data`.
    pub fn is_empty(&self) -> bool {
        let counted_zero = self
            .meta
            .as_ref()
            .and_then(|m| m.result_count)
            .is_some_and(|n| n == 0);
        counted_zero || self.data.as_ref().is_none_or(Vec::is_empty)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Meta {
    #[serde(default)]
    pub result_count: Option<u64>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Includes {
    #[serde(default)]
    pub users: Option<Vec<User>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub public_metrics: Option<PublicMetrics>,
    #[serde(default)]
    pub entities: Option<Entities>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PublicMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub quote_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Option<Vec<HashTag>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashTag {
    pub tag: String,
}

/// `/2/tweets?ids=...`; ids that no longer resolve land in `errors`, not `data`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LookupResponse {
    #[serde(default)]
    pub data: Option<Vec<Tweet>>,
    #[serde(default)]
    pub errors: Option<Vec<serde_json::Value>>,
}

// ==============================
// v1.1: /1.1/statuses/user_timeline.json
// ==============================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineTweet {
    pub id_str: String,
    /// e.g. `Wed Sep 23 17:08:34 +0000 2020`
    pub created_at: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub favorite_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub entities: TimelineEntities,
    pub user: TimelineUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineUser {
    pub id_str: String,
    #[serde(default)]
    pub name: String,
    pub screen_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimelineEntities {
    #[serde(default)]
    pub hashtags: Vec<TimelineHashTag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineHashTag {
    pub text: String,
}
