//! Pagination types
//!
//! App Store Connect pages with an opaque cursor: each response may carry a
//! `links.next` URL, and the query string of that URL is the complete set of
//! parameters for the following request.

use crate::error::{Error, Result};
use crate::types::{JsonValue, QueryParams};
use url::Url;

/// One decoded response page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Raw API objects from `data`, in response order
    pub records: Vec<JsonValue>,
    /// `links.next`, absent on the last page
    pub next_url: Option<String>,
}

impl Page {
    /// Create a page
    pub fn new(records: Vec<JsonValue>, next_url: Option<String>) -> Self {
        Self { records, next_url }
    }

    /// Decode a response body.
    ///
    /// A missing or non-array `data` member is an empty page. A missing,
    /// non-string or empty `links.next` ends pagination.
    pub fn from_body(body: &JsonValue) -> Self {
        let records = body
            .get("data")
            .and_then(JsonValue::as_array)
            .cloned()
            .unwrap_or_default();

        let next_url = body
            .get("links")
            .and_then(|links| links.get("next"))
            .and_then(JsonValue::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from);

        Self { records, next_url }
    }

    /// Whether this is the last page
    pub fn is_last(&self) -> bool {
        self.next_url.is_none()
    }

    /// What to request after this page
    pub fn next_page(&self) -> Result<NextPage> {
        match &self.next_url {
            Some(url) => Ok(NextPage::Continue {
                query_params: cursor_params(url)?,
            }),
            None => Ok(NextPage::Done),
        }
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with exactly these parameters
    Continue {
        /// Query parameters for the next request
        query_params: QueryParams,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }

    /// Parameters for the next request, if any
    pub fn query_params(&self) -> Option<&QueryParams> {
        match self {
            Self::Continue { query_params } => Some(query_params),
            Self::Done => None,
        }
    }
}

/// Parse the query string of a continuation URL, verbatim and in order.
///
/// Only the query matters; the path of the continuation URL is ignored and
/// the stream keeps requesting its own path. Relative URLs are accepted.
pub fn cursor_params(next_url: &str) -> Result<QueryParams> {
    let url = match Url::parse(next_url) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://localhost/")?;
            base.join(next_url)?
        }
        Err(e) => return Err(Error::InvalidUrl(e)),
    };

    Ok(url.query_pairs().into_owned().collect())
}

/// Tracks progress through one pagination run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages_fetched: usize,
    /// Records fetched so far
    pub records_fetched: u64,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page and its record count
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.records_fetched += records as u64;
    }
}
