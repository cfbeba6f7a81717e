//! Axum handlers for the two tweet listing endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::PathRejection},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tweetwire_social::twitter::{NormalizedTweet, TweetQuery};

use crate::{AppState, error::ApiError, limit::resolve_limit};

type Pairs = Query<Vec<(String, String)>>;

/// Build the application router around `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/hashtags/{hashtag}", get(tweets_by_hashtag))
        .route("/users/{screen_name}", get(tweets_by_user))
        // runs before method dispatch, so `POST /hashtags/a.b` is a 404 too
        .route_layer(middleware::from_fn(require_slug))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Recent tweets carrying `#hashtag`, at most `limit` of them.
pub async fn tweets_by_hashtag(
    State(state): State<AppState>,
    Path(hashtag): Path<String>,
    Query(pairs): Pairs,
) -> Result<Json<Vec<NormalizedTweet>>, ApiError> {
    list_tweets(&state, TweetQuery::Hashtag(hashtag), &pairs).await
}

/// The most recent tweets posted by `screen_name`.
pub async fn tweets_by_user(
    State(state): State<AppState>,
    Path(screen_name): Path<String>,
    Query(pairs): Pairs,
) -> Result<Json<Vec<NormalizedTweet>>, ApiError> {
    list_tweets(&state, TweetQuery::User(screen_name), &pairs).await
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Only slug segments name a resource. Anything else, including segments that
/// do not decode to UTF-8, is answered like an unknown path.
async fn require_slug(
    segment: Result<Path<String>, PathRejection>,
    req: Request,
    next: Next,
) -> Response {
    match segment {
        Ok(Path(segment)) if is_slug(&segment) => next.run(req).await,
        Ok(Path(segment)) => {
            tracing::debug!(path = %req.uri().path(), %segment, "route.not_a_slug");
            ApiError::NotFound.into_response()
        }
        Err(rejection) => {
            tracing::debug!(path = %req.uri().path(), error = %rejection, "route.bad_segment");
            ApiError::NotFound.into_response()
        }
    }
}

async fn list_tweets(
    state: &AppState,
    query: TweetQuery,
    pairs: &[(String, String)],
) -> Result<Json<Vec<NormalizedTweet>>, ApiError> {
    let limit = resolve_limit(pairs, state.default_limit).map_err(ApiError::Validation)?;

    match state.source.tweets(&query, limit).await {
        Ok(tweets) => {
            tracing::info!(
                kind = query.kind(),
                term = query.term(),
                limit,
                returned = tweets.len(),
                "tweets.listed"
            );
            Ok(Json(tweets))
        }
        Err(err) => {
            tracing::error!(
                kind = query.kind(),
                term = query.term(),
                limit,
                error = %err,
                error_debug = ?err,
                "tweets.fetch_failed"
            );
            Err(err.into())
        }
    }
}

/// ASCII letters, digits, `-` and `_`; at least one character.
fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
