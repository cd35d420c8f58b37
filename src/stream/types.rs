//! Stream types and traits
//!
//! A [`Resource`] knows one endpoint: where it lives, which fixed parameters
//! it needs and how its pages decode. Paging itself is generic.

use crate::error::Result;
use crate::pagination::{NextPage, Page};
use crate::partition::PartitionKey;
use crate::types::{QueryParams, Record};

/// One request to issue: path relative to the API root plus query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Path relative to the API root
    pub path: String,
    /// Query parameters, in order
    pub query: QueryParams,
}

/// An API resource that can be paged through
pub trait Resource: Send + Sync + std::fmt::Debug {
    /// Stream name
    fn name(&self) -> &'static str;

    /// Request path, optionally templated with a partition
    fn path(&self, partition: Option<&PartitionKey>) -> Result<String>;

    /// Fixed parameters this resource sends on the first page
    fn extra_params(&self) -> QueryParams {
        Vec::new()
    }

    /// Build the request for one page.
    ///
    /// The first page sends `defaults` followed by [`extra_params`](Self::extra_params).
    /// Later pages send the continuation parameters and nothing else.
    fn build_request(
        &self,
        partition: Option<&PartitionKey>,
        continuation: Option<&QueryParams>,
        defaults: &QueryParams,
    ) -> Result<PageRequest> {
        let path = self.path(partition)?;
        let query = match continuation {
            Some(params) => params.clone(),
            None => {
                let mut query = defaults.clone();
                query.extend(self.extra_params());
                query
            }
        };
        Ok(PageRequest { path, query })
    }

    /// Decode a page into flattened records and the next step
    fn parse_page(
        &self,
        page: &Page,
        partition: Option<&PartitionKey>,
    ) -> Result<(Vec<Record>, NextPage)> {
        let foreign_key = partition.map(PartitionKey::foreign_key);
        let records = page
            .records
            .iter()
            .map(|raw| Record::from_api_object(raw, foreign_key.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok((records, page.next_page()?))
    }
}
