use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use aws_sdk_sqs::config::Credentials;
use aws_sdk_sqs::types::QueueAttributeName;
use testcontainers::ContainerAsync;
use testcontainers_modules::{
    localstack::LocalStack,
    testcontainers::{runners::AsyncRunner, ImageExt, TestcontainersError},
};

use crate::{CountSnapshot, InspectError, QueueHandle, QueueService};

pub fn local_config(endpoint_url: &str, region: Option<&'static str>) -> aws_config::ConfigLoader {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .endpoint_url(endpoint_url)
        .region(region.unwrap_or("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "static"))
}

pub async fn localstack() -> Result<(String, ContainerAsync<LocalStack>), TestcontainersError> {
    let request = LocalStack::default()
        .with_tag("latest")
        .with_env_var("SERVICES", "sqs")
        .with_env_var("SKIP_SSL_CERT_DOWNLOAD", "1");
    let container = request.start().await?;

    let host_ip = container.get_host().await?;
    let host_port = container.get_host_port_ipv4(4566).await?;
    let endpoint_url = format!("http://{host_ip}:{host_port}");

    Ok((endpoint_url, container))
}

/// Generate a unique queue name for testing, using a UUID suffix.
pub fn unique_queue_name(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

#[derive(Default)]
struct FakeQueue {
    attributes: HashMap<QueueAttributeName, String>,
    attribute_error: Option<String>,
}

/// In-memory stand-in for SQS keyed by queue name.
#[derive(Default)]
pub struct FakeQueueService {
    queues: HashMap<String, FakeQueue>,
    calls: AtomicUsize,
}

impl FakeQueueService {
    pub fn with_queue(mut self, name: &str, counts: CountSnapshot) -> Self {
        let queue = self.queues.entry(name.to_string()).or_default();
        for (attribute, value) in [
            (QueueAttributeName::ApproximateNumberOfMessages, counts.visible),
            (
                QueueAttributeName::ApproximateNumberOfMessagesNotVisible,
                counts.inflight,
            ),
            (
                QueueAttributeName::ApproximateNumberOfMessagesDelayed,
                counts.delayed,
            ),
        ] {
            queue.attributes.insert(attribute, value.to_string());
        }
        self
    }

    pub fn with_redrive_policy(mut self, name: &str, policy: &str) -> Self {
        self.queues
            .entry(name.to_string())
            .or_default()
            .attributes
            .insert(QueueAttributeName::RedrivePolicy, policy.to_string());
        self
    }

    /// Makes every attribute read of `name` fail with a service error.
    pub fn failing_attributes(mut self, name: &str, message: &str) -> Self {
        self.queues
            .entry(name.to_string())
            .or_default()
            .attribute_error = Some(message.to_string());
        self
    }

    /// Number of remote calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl QueueService for FakeQueueService {
    async fn queue_url(&self, name: &str) -> Result<QueueHandle, InspectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.queues.contains_key(name) {
            return Err(InspectError::QueueNotFound {
                queue: name.to_string(),
                message: "The specified queue does not exist.".to_string(),
            });
        }

        Ok(QueueHandle::new(
            name,
            format!("http://sqs.us-east-1.localhost.localstack.cloud:4566/000000000000/{name}"),
        ))
    }

    async fn queue_attributes(
        &self,
        handle: &QueueHandle,
        names: &[QueueAttributeName],
    ) -> Result<HashMap<QueueAttributeName, String>, InspectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let queue = self
            .queues
            .get(handle.name())
            .ok_or_else(|| InspectError::QueueNotFound {
                queue: handle.name().to_string(),
                message: "The specified queue does not exist.".to_string(),
            })?;

        if let Some(message) = &queue.attribute_error {
            return Err(InspectError::Service {
                operation: "GetQueueAttributes",
                queue: handle.name().to_string(),
                message: message.clone(),
            });
        }

        Ok(names
            .iter()
            .filter_map(|name| {
                queue
                    .attributes
                    .get(name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect())
    }
}
