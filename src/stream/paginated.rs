//! Paginated stream
//!
//! Drives a [`Resource`] page by page, following `links.next` until the
//! server stops handing one back.

use super::types::Resource;
use crate::auth::TokenIssuer;
use crate::connector::{Message, MessageStream, RecordStream};
use crate::error::Result;
use crate::http::PageFetcher;
use crate::pagination::{NextPage, PaginationState};
use crate::partition::PartitionKey;
use crate::types::{QueryParams, Record};
use futures::{future, stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::debug;

/// Where the next page comes from
enum Cursor {
    Start,
    Next(QueryParams),
    Done,
}

/// A lazy, finite stream of records from one resource.
///
/// Cloning is cheap and every call to [`messages`](Self::messages) starts
/// over at page one.
#[derive(Debug, Clone)]
pub struct PaginatedStream {
    resource: Arc<dyn Resource>,
    issuer: Arc<TokenIssuer>,
    fetcher: Arc<PageFetcher>,
    limit: u32,
    static_params: QueryParams,
}

impl PaginatedStream {
    /// Create a stream over `resource` with `limit` records per page
    pub fn new(
        resource: Arc<dyn Resource>,
        issuer: Arc<TokenIssuer>,
        fetcher: Arc<PageFetcher>,
        limit: u32,
    ) -> Self {
        Self {
            resource,
            issuer,
            fetcher,
            limit,
            static_params: Vec::new(),
        }
    }

    /// Add query parameters sent with the first page
    #[must_use]
    pub fn with_query_params(mut self, params: QueryParams) -> Self {
        self.static_params.extend(params);
        self
    }

    /// Stream name
    pub fn name(&self) -> &'static str {
        self.resource.name()
    }

    /// Page size
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// First-page parameters before the resource's own
    fn default_params(&self) -> QueryParams {
        let mut params = vec![("limit".to_string(), self.limit.to_string())];
        params.extend(self.static_params.iter().cloned());
        params
    }

    /// Fetch and decode one page; the issuer signs every attempt
    async fn fetch_page(
        &self,
        partition: Option<&PartitionKey>,
        continuation: Option<&QueryParams>,
    ) -> Result<(Vec<Record>, NextPage)> {
        let request = self
            .resource
            .build_request(partition, continuation, &self.default_params())?;
        let page = self
            .fetcher
            .fetch(&request.path, &request.query, self.issuer.clone())
            .await?;
        self.resource.parse_page(&page, partition)
    }

    /// Fetch the first page only
    pub async fn first_page(&self, partition: Option<&PartitionKey>) -> Result<Vec<Record>> {
        let (records, _) = self.fetch_page(partition, None).await?;
        Ok(records)
    }

    /// Fetch the page `cursor` points at and decide where to go next
    async fn next_batch(
        self,
        partition: Option<PartitionKey>,
        cursor: Cursor,
        mut state: PaginationState,
    ) -> Result<Option<(Vec<Result<Message>>, (Cursor, PaginationState))>> {
        let continuation = match cursor {
            Cursor::Done => return Ok(None),
            Cursor::Start => None,
            Cursor::Next(params) => Some(params),
        };

        let (records, next) = self
            .fetch_page(partition.as_ref(), continuation.as_ref())
            .await?;
        state.add_page(records.len());

        let name = self.name();
        debug!(
            stream = name,
            page = state.pages_fetched,
            records = records.len(),
            "Fetched page"
        );

        let mut batch = Vec::with_capacity(records.len() + 1);
        batch.push(Ok(Message::debug(format!(
            "Page {}: fetched {} records",
            state.pages_fetched,
            records.len()
        ))));
        batch.extend(
            records
                .into_iter()
                .map(|record| Ok(Message::record(name, record))),
        );

        let cursor = match next {
            NextPage::Continue { query_params } => Cursor::Next(query_params),
            NextPage::Done => Cursor::Done,
        };
        Ok(Some((batch, (cursor, state))))
    }

    /// Records interleaved with per-page log messages.
    ///
    /// The first error is yielded and ends the stream.
    pub fn messages(&self, partition: Option<PartitionKey>) -> MessageStream {
        let this = self.clone();

        stream::try_unfold(
            (Cursor::Start, PaginationState::new()),
            move |(cursor, state)| this.clone().next_batch(partition.clone(), cursor, state),
        )
        .map_ok(stream::iter)
        .try_flatten()
        .boxed()
    }

    /// Records only
    pub fn records(&self, partition: Option<PartitionKey>) -> RecordStream {
        self.messages(partition)
            .try_filter_map(|message| future::ready(Ok(message.into_record())))
            .boxed()
    }
}
