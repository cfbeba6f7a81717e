//! Shared plumbing for the tweetwire crates: for now only the logging setup.
//!
//! ```rust
//! use tweetwire_common::{LogConfig, LogFormat};
//!
//! let cfg = LogConfig {
//!     format: LogFormat::Json,
//!     ..LogConfig::default()
//! };
//! assert!(cfg.stderr);
//! assert_eq!(cfg.filter, "info");
//! ```
pub mod observability;

pub use observability::{LogConfig, LogFormat, init_logging};
