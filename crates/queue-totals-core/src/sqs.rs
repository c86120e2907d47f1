//! SQS client seam used by the inspector.

use std::collections::HashMap;

use aws_sdk_sqs as sqs;
use sqs::types::QueueAttributeName;

use crate::InspectError;

/// A resolved queue: the name it was looked up by and the URL SQS returned.
///
/// Handles are resolved fresh for every report and never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueHandle {
    name: String,
    url: String,
}

impl QueueHandle {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The read-only queue operations the inspector depends on.
///
/// Implemented for [`aws_sdk_sqs::Client`]; tests substitute an in-memory service.
#[async_trait::async_trait]
pub trait QueueService: Send + Sync {
    /// Looks up the URL of the queue called `name`.
    ///
    /// # Errors
    ///
    /// [`InspectError::QueueNotFound`] when SQS has no queue by that name, otherwise
    /// [`InspectError::Service`] for any SDK failure.
    async fn queue_url(&self, name: &str) -> Result<QueueHandle, InspectError>;

    /// Reads the requested attributes. Attributes SQS does not report are simply
    /// absent from the returned map.
    async fn queue_attributes(
        &self,
        handle: &QueueHandle,
        names: &[QueueAttributeName],
    ) -> Result<HashMap<QueueAttributeName, String>, InspectError>;
}

#[async_trait::async_trait]
impl QueueService for sqs::Client {
    async fn queue_url(&self, name: &str) -> Result<QueueHandle, InspectError> {
        let output = self
            .get_queue_url()
            .queue_name(name)
            .send()
            .await
            .map_err(|e| InspectError::from_sdk("GetQueueUrl", name, e))?;

        let url = output.queue_url.ok_or_else(|| InspectError::MissingQueueUrl {
            queue: name.to_string(),
        })?;

        Ok(QueueHandle::new(name, url))
    }

    async fn queue_attributes(
        &self,
        handle: &QueueHandle,
        names: &[QueueAttributeName],
    ) -> Result<HashMap<QueueAttributeName, String>, InspectError> {
        let output = self
            .get_queue_attributes()
            .queue_url(handle.url())
            .set_attribute_names(Some(names.to_vec()))
            .send()
            .await
            .map_err(|e| InspectError::from_sdk("GetQueueAttributes", handle.name(), e))?;

        Ok(output.attributes.unwrap_or_default())
    }
}
