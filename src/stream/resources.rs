//! App Store Connect resources

use super::types::Resource;
use crate::error::{Error, Result};
use crate::partition::PartitionKey;
use crate::types::QueryParams;

/// Name of the apps stream
pub const APPS: &str = "apps";

/// Name of the customer reviews stream
pub const CUSTOMER_REVIEWS: &str = "customer_reviews";

/// `GET apps`
#[derive(Debug, Clone, Copy, Default)]
pub struct Apps;

impl Resource for Apps {
    fn name(&self) -> &'static str {
        APPS
    }

    fn path(&self, _partition: Option<&PartitionKey>) -> Result<String> {
        Ok("apps".to_string())
    }
}

/// `GET apps/{id}/customerReviews`, oldest first
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerReviews;

impl Resource for CustomerReviews {
    fn name(&self) -> &'static str {
        CUSTOMER_REVIEWS
    }

    fn path(&self, partition: Option<&PartitionKey>) -> Result<String> {
        let key = partition
            .ok_or_else(|| Error::partition(CUSTOMER_REVIEWS, "an app id is required"))?;
        Ok(format!("apps/{}/customerReviews", key.value()))
    }

    fn extra_params(&self) -> QueryParams {
        vec![("sort".to_string(), "createdDate".to_string())]
    }
}
