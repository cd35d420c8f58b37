//! Stream module
//!
//! The two streams this source exposes and the machinery behind them:
//!
//! - [`PaginatedStream`] pages through one resource
//! - [`ParentedStream`] runs a child resource once per partition
//!
//! Both are lazy. Nothing is fetched until the returned stream is polled,
//! and dropping it cancels whatever request is in flight.

mod paginated;
mod parented;
mod resources;
mod types;

pub use paginated::PaginatedStream;
pub use parented::ParentedStream;
pub use resources::{Apps, CustomerReviews, APPS, CUSTOMER_REVIEWS};
pub use types::{PageRequest, Resource};

pub(crate) use parented::fuse_on_error;

use crate::connector::{MessageStream, RecordStream};

/// Either kind of stream, under its stream name
#[derive(Debug, Clone)]
pub enum SourceStream {
    /// Top-level resource
    Paginated(PaginatedStream),
    /// Resource nested under a parent id
    Parented(ParentedStream),
}

impl SourceStream {
    /// Stream name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Paginated(s) => s.name(),
            Self::Parented(s) => s.name(),
        }
    }

    /// Records interleaved with log messages
    pub fn messages(&self) -> MessageStream {
        match self {
            Self::Paginated(s) => s.messages(None),
            Self::Parented(s) => s.messages(),
        }
    }

    /// Records only
    pub fn records(&self) -> RecordStream {
        match self {
            Self::Paginated(s) => s.records(None),
            Self::Parented(s) => s.records(),
        }
    }
}

impl From<PaginatedStream> for SourceStream {
    fn from(stream: PaginatedStream) -> Self {
        Self::Paginated(stream)
    }
}

impl From<ParentedStream> for SourceStream {
    fn from(stream: ParentedStream) -> Self {
        Self::Parented(stream)
    }
}
