//! Per-queue reports combining main queue and dead letter queue counts.

use aws_config::SdkConfig;
use aws_sdk_sqs as sqs;
use sqs::types::QueueAttributeName;

use crate::{
    dlq_name_from_policy, fallback_dlq_name, CountSnapshot, InspectError, QueueHandle,
    QueueService, COUNT_ATTRIBUTES,
};

/// One line of a report. Exactly one variant is produced per requested queue.
///
/// Serializes untagged, so a successful entry becomes
/// `{"queue", "main_counts", "dlq", "dlq_counts"}` and a failed one `{"queue", "error"}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ReportEntry {
    Totals {
        queue: String,
        main_counts: CountSnapshot,
        dlq: String,
        dlq_counts: CountSnapshot,
    },
    Failed {
        queue: String,
        error: String,
    },
}

impl ReportEntry {
    pub fn queue(&self) -> &str {
        match self {
            ReportEntry::Totals { queue, .. } | ReportEntry::Failed { queue, .. } => queue,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ReportEntry::Failed { error, .. } => Some(error),
            ReportEntry::Totals { .. } => None,
        }
    }
}

/// Reads message counts for queues and their dead letter queues.
///
/// # Example
///
/// ```no_run
/// use queue_totals::QueueInspector;
///
/// # async fn example() {
/// let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
/// let inspector = QueueInspector::from_config(&config);
///
/// let report = inspector.build_report(&["orders"]).await;
/// assert_eq!(report.len(), 1);
/// # }
/// ```
#[derive(Clone)]
pub struct QueueInspector<S = sqs::Client> {
    service: S,
}

impl QueueInspector<sqs::Client> {
    /// Creates an inspector from a pre-built AWS SDK config.
    ///
    /// The caller decides credentials, region and endpoint (e.g. `--local` for LocalStack).
    pub fn from_config(config: &SdkConfig) -> Self {
        Self::new(sqs::Client::new(config))
    }
}

impl<S: QueueService> QueueInspector<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Maps a queue name to the handle used for attribute reads.
    pub async fn resolve_queue_handle(&self, name: &str) -> Result<QueueHandle, InspectError> {
        if name.is_empty() {
            return Err(InspectError::EmptyQueueName);
        }

        log::debug!("resolving queue url for {name}");
        self.service.queue_url(name).await
    }

    /// Reads the visible, in-flight and delayed counts of a queue.
    pub async fn read_counts(&self, handle: &QueueHandle) -> Result<CountSnapshot, InspectError> {
        let attributes = self
            .service
            .queue_attributes(handle, &COUNT_ATTRIBUTES)
            .await?;

        let counts = CountSnapshot::from_attributes(handle.name(), &attributes)?;
        log::debug!("{}: {counts}", handle.name());
        Ok(counts)
    }

    /// Reads the queue's redrive policy and returns its dead letter queue's name.
    ///
    /// Returns `Ok(None)` when no policy is configured or it cannot be understood.
    /// Failing to read the attribute at all is still an error.
    pub async fn resolve_dlq_reference(
        &self,
        handle: &QueueHandle,
    ) -> Result<Option<String>, InspectError> {
        let attributes = self
            .service
            .queue_attributes(handle, &[QueueAttributeName::RedrivePolicy])
            .await?;

        let policy = attributes
            .get(&QueueAttributeName::RedrivePolicy)
            .map(String::as_str);

        Ok(dlq_name_from_policy(policy))
    }

    /// Builds one entry per name, in the order given.
    ///
    /// A failing main queue yields [`ReportEntry::Failed`] and the batch continues.
    /// A missing or unreadable dead letter queue is reported with zero counts.
    pub async fn build_report(&self, names: &[impl AsRef<str>]) -> Vec<ReportEntry> {
        let mut entries = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            let entry = match self.inspect(name).await {
                Ok(entry) => entry,
                Err(e) => {
                    log::info!("{name}: {e}");
                    ReportEntry::Failed {
                        queue: name.to_string(),
                        error: e.to_string(),
                    }
                }
            };
            entries.push(entry);
        }

        entries
    }

    async fn inspect(&self, name: &str) -> Result<ReportEntry, InspectError> {
        let handle = self.resolve_queue_handle(name).await?;
        let main_counts = self.read_counts(&handle).await?;

        let dlq = match self.resolve_dlq_reference(&handle).await? {
            Some(dlq) => dlq,
            None => {
                log::debug!("{name} has no redrive policy, assuming conventional dlq name");
                fallback_dlq_name(name)
            }
        };

        let dlq_counts = self.dlq_counts(&dlq).await;

        Ok(ReportEntry::Totals {
            queue: name.to_string(),
            main_counts,
            dlq,
            dlq_counts,
        })
    }

    async fn dlq_counts(&self, dlq: &str) -> CountSnapshot {
        let counts = match self.resolve_queue_handle(dlq).await {
            Ok(handle) => self.read_counts(&handle).await,
            Err(e) => Err(e),
        };

        match counts {
            Ok(counts) => counts,
            Err(e) if e.is_not_found() => {
                log::debug!("dead letter queue {dlq} does not exist");
                CountSnapshot::default()
            }
            Err(e) => {
                log::warn!("reporting zero counts for dead letter queue {dlq}: {e}");
                CountSnapshot::default()
            }
        }
    }
}

/// Reports message totals for each queue using the SQS client built from `config`.
pub async fn get_queues_message_totals(
    config: &SdkConfig,
    names: &[impl AsRef<str>],
) -> Vec<ReportEntry> {
    QueueInspector::from_config(config).build_report(names).await
}
