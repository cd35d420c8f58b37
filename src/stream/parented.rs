//! Parented stream
//!
//! Runs a child stream once per partition, in partition order.

use super::paginated::PaginatedStream;
use crate::connector::{Message, MessageStream, RecordStream};
use crate::error::Result;
use crate::partition::PartitionRouter;
use futures::stream::BoxStream;
use futures::{future, stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::debug;

/// Child records for every partition a router yields.
///
/// Each partition is paged to exhaustion before the next one is requested.
/// No partitions means no child requests.
#[derive(Debug, Clone)]
pub struct ParentedStream {
    child: PaginatedStream,
    router: Arc<dyn PartitionRouter>,
}

impl ParentedStream {
    /// Create a new parented stream
    pub fn new(child: PaginatedStream, router: Arc<dyn PartitionRouter>) -> Self {
        Self { child, router }
    }

    /// Stream name
    pub fn name(&self) -> &'static str {
        self.child.name()
    }

    /// The partition router
    pub fn router(&self) -> &Arc<dyn PartitionRouter> {
        &self.router
    }

    /// Records interleaved with log messages, partition by partition
    pub fn messages(&self) -> MessageStream {
        let child = self.child.clone();
        let name = self.name();

        let nested = self.router.partitions().map_ok(move |key| {
            debug!(stream = name, partition = key.value(), "Processing partition");
            let header = stream::once(future::ready(Ok(Message::debug(format!(
                "Processing partition: {}",
                key.value()
            )))));
            header.chain(child.messages(Some(key))).boxed()
        });

        fuse_on_error(nested.try_flatten().boxed())
    }

    /// Records only
    pub fn records(&self) -> RecordStream {
        self.messages()
            .try_filter_map(|message| future::ready(Ok(message.into_record())))
            .boxed()
    }
}

/// End a stream right after its first error
pub(crate) fn fuse_on_error<T: Send + 'static>(
    stream: BoxStream<'static, Result<T>>,
) -> BoxStream<'static, Result<T>> {
    stream
        .scan(false, |failed, item| {
            if *failed {
                return future::ready(None);
            }
            *failed = item.is_err();
            future::ready(Some(item))
        })
        .boxed()
}
