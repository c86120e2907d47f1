//! Dead letter queue discovery from a queue's `RedrivePolicy` attribute.

/// The subset of an SQS redrive policy needed to locate the dead letter queue.
///
/// The attribute is a JSON document such as
/// `{"deadLetterTargetArn":"arn:aws:sqs:us-east-1:000000000000:orders-dlq","maxReceiveCount":5}`.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedrivePolicy {
    pub dead_letter_target_arn: String,
}

impl RedrivePolicy {
    /// Parses the raw attribute value, returning `None` for anything that is not a
    /// JSON object carrying a string `deadLetterTargetArn`.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(policy) => Some(policy),
            Err(e) => {
                log::debug!("ignoring malformed redrive policy {raw:?}: {e}");
                None
            }
        }
    }

    /// The dead letter queue's short name: the last `:` segment of its ARN.
    pub fn dlq_name(&self) -> Option<&str> {
        queue_name_from_arn(&self.dead_letter_target_arn)
    }
}

/// Extracts the resource segment of an SQS ARN, or `None` when it is empty.
pub fn queue_name_from_arn(arn: &str) -> Option<&str> {
    arn.rsplit(':').next().filter(|name| !name.is_empty())
}

/// Resolves the dead letter queue name from an optional `RedrivePolicy` value.
pub fn dlq_name_from_policy(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;
    RedrivePolicy::parse(raw)?.dlq_name().map(str::to_string)
}

/// The conventional dead letter queue name used when no redrive policy is set.
pub fn fallback_dlq_name(queue: &str) -> String {
    format!("{queue}-dlq")
}
