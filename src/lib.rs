//! Client for the [arXiv API](https://info.arxiv.org/help/api/index.html).
//!
//! A [`Query`] is turned into request parameters, sent to the export endpoint
//! and the returned Atom feed is decoded entry by entry into [`Paper`]s.
//!
//! The arXiv terms of use allow no more than one request every three seconds
//! (see [`MIN_REQUEST_INTERVAL`]). This crate does not throttle: callers
//! issuing several searches are responsible for pacing them.

use std::time::Duration;

pub mod apis;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod query;

pub use apis::arxiv::{parse_feed, search, ArxivClient};
pub use apis::{HttpTransport, Transport};
pub use config::Config;
pub use error::{DecodeError, SearchError};
pub use models::{Author, Paper, Query, SortBy, SortOrder};
pub use query::query_params;

/// Minimum delay between two requests required by the arXiv terms of use.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(3);
