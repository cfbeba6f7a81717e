#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;
use tweetwire_app::{AppState, create_router};
use tweetwire_common::{LogConfig, init_logging};
use tweetwire_social::twitter::{
    Account, NormalizedTweet, TweetQuery, TweetSource, TwitterError,
};

pub fn init_test_tracing() {
    let config = LogConfig {
        dir: Some(std::env::temp_dir().join("tweetwire-tests")),
        filter: "debug".to_string(),
        ..LogConfig::default()
    };
    // the first test in the binary installs it; the rest get the same path back
    let _ = init_logging("tweetwire-tests", &config);
}

pub fn tweet(i: usize) -> NormalizedTweet {
    NormalizedTweet {
        account: Account {
            fullname: format!("User {i}"),
            href: format!("/user{i}"),
            id: format!("{i}"),
        },
        date: "17:08 PM - 23 Sep 2020".into(),
        hashtags: vec!["#python".into()],
        likes: i as u64,
        replies: 1,
        retweets: 2,
        text: format!("tweet {i}"),
    }
}

/// In-memory source that honours `count` and records what it was asked.
#[derive(Default)]
pub struct StubSource {
    pub available: usize,
    pub fail: bool,
    pub calls: Mutex<Vec<(TweetQuery, u32)>>,
}

impl StubSource {
    pub fn with(available: usize) -> Arc<Self> {
        Arc::new(Self {
            available,
            ..Default::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<(TweetQuery, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TweetSource for StubSource {
    async fn tweets(
        &self,
        query: &TweetQuery,
        count: u32,
    ) -> Result<Vec<NormalizedTweet>, TwitterError> {
        self.calls.lock().unwrap().push((query.clone(), count));
        if self.fail {
            return Err(TwitterError::MissingAuthor {
                tweet_id: "1".into(),
                author_id: None,
            });
        }
        Ok((0..self.available.min(count as usize)).map(tweet).collect())
    }
}

pub fn app_with(source: Arc<dyn TweetSource>) -> Router {
    init_test_tracing();
    create_router(AppState::new(source, 30))
}

pub async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1 << 20).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, Method::GET, uri).await
}
