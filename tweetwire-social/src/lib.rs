//! Social network clients and normalizers used by tweetwire.
//!
//! Only the Twitter/X pipeline exists: [`twitter::TwitterApi`] talks to the
//! upstream API and [`twitter::TweetSource`] hands back [`twitter::NormalizedTweet`]
//! records regardless of which upstream version produced them.
pub mod twitter;
