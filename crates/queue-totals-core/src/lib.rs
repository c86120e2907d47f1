//! # queue-totals-core
//!
//! Core library for reporting approximate message counts of AWS SQS queues
//! together with their dead letter queues.
//!
//! ## Features
//!
//! - **Count Snapshots**: visible, in-flight and delayed message counts per queue
//! - **DLQ Discovery**: follows the queue's `RedrivePolicy`, falling back to `<name>-dlq`
//! - **Batch Reports**: one entry per requested queue, failures reported inline
//!
//! ## Example
//!
//! ```no_run
//! use queue_totals::QueueInspector;
//!
//! # async fn example() {
//! // Load AWS configuration
//! let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//!
//! // Create an inspector backed by the SQS client
//! let inspector = QueueInspector::from_config(&config);
//!
//! for entry in inspector.build_report(&["orders", "payments"]).await {
//!     println!("{}", serde_json::to_string(&entry).unwrap());
//! }
//! # }
//! ```

mod counts;
mod error;
mod redrive;
mod report;
mod sqs;

#[cfg(test)]
mod test_utils;

pub use counts::*;
pub use error::*;
pub use redrive::*;
pub use report::*;
pub use sqs::*;
