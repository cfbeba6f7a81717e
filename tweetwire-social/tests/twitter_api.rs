use std::time::Duration;

use serde_json::{Value, json};
use tweetwire_social::twitter::{TweetQuery, TweetSource, TwitterApi, TwitterError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn api(server: &MockServer) -> TwitterApi {
    TwitterApi::with_base_url(&server.uri(), TOKEN.into(), Duration::from_secs(5)).unwrap()
}

fn search_page(n: usize) -> Value {
    let data: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "id": format!("{}", 1000 + i),
                "text": format!("tweet {i} #python"),
                "author_id": format!("u{}", i % 3),
                "created_at": "2020-09-23T17:08:34.000Z",
                "public_metrics": {"like_count": i, "retweet_count": 1, "reply_count": 2, "quote_count": 0},
                "entities": {"hashtags": [{"start": 8, "end": 15, "tag": "python"}]}
            })
        })
        .collect();
    let users: Vec<Value> = (0..3)
        .map(|i| json!({"id": format!("u{i}"), "name": format!("User {i}"), "username": format!("user{i}")}))
        .collect();
    json!({"data": data, "includes": {"users": users}, "meta": {"result_count": n}})
}

fn timeline_page(n: usize) -> Value {
    let tweets: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "id": 2000 + i,
                "id_str": format!("{}", 2000 + i),
                "created_at": "Wed Sep 23 17:08:34 +0000 2020",
                "text": format!("status {i}"),
                "favorite_count": 3,
                "retweet_count": 4,
                "retweeted": false,
                "entities": {"hashtags": []},
                "user": {"id": 783214, "id_str": "783214", "name": "Twitter", "screen_name": "Twitter"}
            })
        })
        .collect();
    Value::Array(tweets)
}

fn lookup_page(n: usize) -> Value {
    let data: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "id": format!("{}", 2000 + i),
                "text": format!("status {i}"),
                "public_metrics": {"retweet_count": 4, "reply_count": i, "like_count": 3, "quote_count": 0}
            })
        })
        .collect();
    json!({"data": data})
}

#[tokio::test]
async fn hashtag_search_asks_for_minimum_page_and_truncates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("query", "#python"))
        .and(query_param("max_results", "10"))
        .and(query_param("expansions", "author_id"))
        .and(query_param("tweet.fields", "entities,created_at,public_metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(10)))
        .expect(1)
        .mount(&server)
        .await;

    let tweets = api(&server)
        .tweets(&TweetQuery::Hashtag("python".into()), 5)
        .await
        .unwrap();

    assert_eq!(tweets.len(), 5);
    assert_eq!(tweets[0].account.href, "/user0");
    assert_eq!(tweets[1].account.id, "u1");
    assert_eq!(tweets[0].hashtags, vec!["#python"]);
    assert_eq!(tweets[0].date, "17:08 PM - 23 Sep 2020");
}

#[tokio::test]
async fn hashtag_without_results_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {"result_count": 0}})))
        .mount(&server)
        .await;

    let tweets = api(&server)
        .tweets(&TweetQuery::Hashtag("nothingtoseehere".into()), 30)
        .await
        .unwrap();
    assert!(tweets.is_empty());
}

#[tokio::test]
async fn hashtag_upstream_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "Unauthorized", "type": "about:blank", "status": 401, "detail": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let err = api(&server)
        .tweets(&TweetQuery::Hashtag("python".into()), 30)
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::Http(_)));
}

#[tokio::test]
async fn user_timeline_is_backfilled_from_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .and(query_param("screen_name", "Twitter"))
        .and(query_param("count", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeline_page(12)))
        .expect(1)
        .mount(&server)
        .await;
    let ids: Vec<String> = (0..12).map(|i| (2000 + i).to_string()).collect();
    Mock::given(method("GET"))
        .and(path("/2/tweets"))
        .and(query_param("ids", ids.join(",").as_str()))
        .and(query_param("tweet.fields", "public_metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_page(12)))
        .expect(1)
        .mount(&server)
        .await;

    let tweets = api(&server)
        .tweets(&TweetQuery::User("Twitter".into()), 12)
        .await
        .unwrap();

    assert_eq!(tweets.len(), 12);
    assert_eq!(tweets[7].replies, 7);
    assert_eq!(tweets[7].likes, 3);
    assert_eq!(tweets[7].retweets, 4);
    assert_eq!(tweets[0].account.fullname, "Twitter");
    assert_eq!(tweets[0].account.href, "/Twitter");
}

#[tokio::test]
async fn unknown_user_is_empty_and_skips_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"code": 34, "message": "Sorry, that page does not exist."}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_page(1)))
        .expect(0)
        .mount(&server)
        .await;

    let tweets = api(&server)
        .tweets(&TweetQuery::User("screen_name".into()), 30)
        .await
        .unwrap();
    assert!(tweets.is_empty());
}

#[tokio::test]
async fn empty_timeline_skips_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_page(1)))
        .expect(0)
        .mount(&server)
        .await;

    let tweets = api(&server)
        .tweets(&TweetQuery::User("quiet".into()), 30)
        .await
        .unwrap();
    assert!(tweets.is_empty());
}

#[tokio::test]
async fn failed_lookup_fails_the_user_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeline_page(10)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"title": "Too Many Requests"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = api(&server)
        .tweets(&TweetQuery::User("Twitter".into()), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::Http(ref e) if e.status().map(|s| s.as_u16()) == Some(429)));
}
