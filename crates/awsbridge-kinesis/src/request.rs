//! Assembling a `PutRecords` input for a stream.

use std::sync::Arc;

use aws_sdk_kinesis::operation::put_records::PutRecordsInput;
use aws_sdk_kinesis::types::PutRecordsRequestEntry;
use awsbridge_core::Message;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::{RecordSplit, RequestBuilder};
use crate::error::KinesisError;
use crate::partition::PartitionKey;

/// Wrap `entries` into a `PutRecords` input addressed to `stream_name`.
///
/// # Errors
///
/// Returns [`KinesisError::MissingField`] for a blank stream name and
/// [`KinesisError::Build`] if the SDK rejects the input.
pub fn put_records_input(
    stream_name: &str,
    entries: Vec<PutRecordsRequestEntry>,
) -> Result<PutRecordsInput, KinesisError> {
    if stream_name.trim().is_empty() {
        return Err(KinesisError::MissingField("streamName"));
    }
    Ok(PutRecordsInput::builder()
        .stream_name(stream_name)
        .set_records(Some(entries))
        .build()?)
}

/// Configuration of a [`KinesisRecordBuilder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinesisConfig {
    /// Target stream.
    pub stream_name: String,
    /// Partition key source.
    pub partition_key: PartitionKey,
    /// Whether to split messages into several records.
    #[serde(default)]
    pub split: RecordSplit,
}

/// Turns a message into a complete `PutRecords` input.
#[derive(Debug, Clone)]
pub struct KinesisRecordBuilder {
    stream_name: String,
    partition_key: PartitionKey,
    builder: Arc<dyn RequestBuilder>,
}

impl KinesisRecordBuilder {
    /// Create a builder from its parts.
    pub fn new(
        stream_name: impl Into<String>,
        partition_key: PartitionKey,
        builder: Arc<dyn RequestBuilder>,
    ) -> Self {
        Self {
            stream_name: stream_name.into(),
            partition_key,
            builder,
        }
    }

    /// Create a builder from configuration.
    #[must_use]
    pub fn from_config(config: KinesisConfig) -> Self {
        Self::new(
            config.stream_name,
            config.partition_key,
            config.split.into_builder(),
        )
    }

    /// Target stream.
    #[must_use]
    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    /// Build the input for one message.
    ///
    /// # Errors
    ///
    /// Propagates partition-key, payload and SDK build failures.
    pub fn build(&self, message: &dyn Message) -> Result<PutRecordsInput, KinesisError> {
        let partition_key = self.partition_key.resolve(message)?;
        let entries = self.builder.build(partition_key, message)?;
        debug!(
            stream = %self.stream_name,
            message_id = %message.unique_id(),
            entries = entries.len(),
            "Built PutRecords input"
        );
        put_records_input(&self.stream_name, entries)
    }
}
