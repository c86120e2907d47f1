use aws_sdk_sqs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

/// Error codes SQS uses to report that a queue name or URL does not exist.
///
/// The query protocol reports `AWS.SimpleQueueService.NonExistentQueue`, the JSON
/// protocol reports `QueueDoesNotExist`.
const QUEUE_NOT_FOUND_CODES: [&str; 2] = [
    "AWS.SimpleQueueService.NonExistentQueue",
    "QueueDoesNotExist",
];

/// Failures raised while inspecting a single queue.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("queue name must not be empty")]
    EmptyQueueName,
    #[error("queue {queue} does not exist: {message}")]
    QueueNotFound { queue: String, message: String },
    #[error("{operation} failed for queue {queue}: {message}")]
    Service {
        operation: &'static str,
        queue: String,
        message: String,
    },
    #[error("queue {queue} reported a non-numeric {attribute} attribute: {value:?}")]
    InvalidAttribute {
        queue: String,
        attribute: String,
        value: String,
    },
    #[error("GetQueueUrl returned no url for queue {queue}")]
    MissingQueueUrl { queue: String },
}

impl InspectError {
    /// Classifies an SDK failure, keeping the service message when there is one.
    pub fn from_sdk<E, R>(operation: &'static str, queue: &str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        let service = err.as_service_error();
        let code = service.and_then(|e| e.code()).map(str::to_string);
        let message = service
            .and_then(|e| e.message())
            .map(str::to_string)
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

        match code.as_deref() {
            Some(code) if QUEUE_NOT_FOUND_CODES.contains(&code) => Self::QueueNotFound {
                queue: queue.to_string(),
                message,
            },
            _ => Self::Service {
                operation,
                queue: queue.to_string(),
                message,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::QueueNotFound { .. })
    }
}
