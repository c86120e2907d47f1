//! Approximate message counts read from a queue's attributes.

use std::collections::HashMap;
use std::fmt;

use aws_sdk_sqs::types::QueueAttributeName;

use crate::InspectError;

/// The attributes requested for a [`CountSnapshot`].
pub const COUNT_ATTRIBUTES: [QueueAttributeName; 3] = [
    QueueAttributeName::ApproximateNumberOfMessages,
    QueueAttributeName::ApproximateNumberOfMessagesNotVisible,
    QueueAttributeName::ApproximateNumberOfMessagesDelayed,
];

/// Point-in-time message counts for one queue.
///
/// SQS only reports approximations, so two snapshots of an idle queue may still
/// differ for a short while after messages move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CountSnapshot {
    /// Messages available for retrieval
    pub visible: u64,
    /// Messages received but not yet deleted or expired
    pub inflight: u64,
    /// Messages waiting out a delay before becoming visible
    pub delayed: u64,
}

impl CountSnapshot {
    /// Builds a snapshot from a `GetQueueAttributes` response.
    ///
    /// Attributes missing from the response count as zero. A value that is present
    /// but not an unsigned integer is reported as [`InspectError::InvalidAttribute`].
    pub fn from_attributes(
        queue: &str,
        attributes: &HashMap<QueueAttributeName, String>,
    ) -> Result<Self, InspectError> {
        let count = |name: &QueueAttributeName| -> Result<u64, InspectError> {
            match attributes.get(name) {
                None => Ok(0),
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| InspectError::InvalidAttribute {
                        queue: queue.to_string(),
                        attribute: name.as_str().to_string(),
                        value: value.clone(),
                    }),
            }
        };

        Ok(Self {
            visible: count(&QueueAttributeName::ApproximateNumberOfMessages)?,
            inflight: count(&QueueAttributeName::ApproximateNumberOfMessagesNotVisible)?,
            delayed: count(&QueueAttributeName::ApproximateNumberOfMessagesDelayed)?,
        })
    }

    pub fn total(&self) -> u64 {
        self.visible + self.inflight + self.delayed
    }
}

impl fmt::Display for CountSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "visible={} inflight={} delayed={}",
            self.visible, self.inflight, self.delayed
        )
    }
}
