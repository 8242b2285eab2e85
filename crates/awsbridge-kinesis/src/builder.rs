//! Message to record-entry conversion strategies.

use std::sync::Arc;

use aws_sdk_kinesis::primitives::Blob;
use aws_sdk_kinesis::types::PutRecordsRequestEntry;
use awsbridge_core::Message;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::KinesisError;

/// Converts one message into zero or more `PutRecords` entries.
///
/// Each implementation owns its partition-key assignment scheme.
pub trait RequestBuilder: Send + Sync + std::fmt::Debug {
    /// Build entries for `message` under `partition_key`.
    ///
    /// # Errors
    ///
    /// Returns [`KinesisError::Message`] if the payload cannot be read.
    fn build(
        &self,
        partition_key: &str,
        message: &dyn Message,
    ) -> Result<Vec<PutRecordsRequestEntry>, KinesisError>;
}

/// Exactly one entry per message carrying the raw payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRequestBuilder;

impl RequestBuilder for DefaultRequestBuilder {
    fn build(
        &self,
        partition_key: &str,
        message: &dyn Message,
    ) -> Result<Vec<PutRecordsRequestEntry>, KinesisError> {
        let payload = message.payload()?;
        debug!(
            message_id = %message.unique_id(),
            bytes = payload.len(),
            "Built single Kinesis entry"
        );
        Ok(vec![entry(partition_key, payload.to_vec())?])
    }
}

/// One entry per non-empty line of the payload.
///
/// Lines are split on `\n`; a trailing `\r` is dropped. Every entry shares
/// the supplied partition key.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplittingRequestBuilder;

impl RequestBuilder for SplittingRequestBuilder {
    fn build(
        &self,
        partition_key: &str,
        message: &dyn Message,
    ) -> Result<Vec<PutRecordsRequestEntry>, KinesisError> {
        let payload = message.payload()?;
        let entries = payload
            .split(|b| *b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(|line| entry(partition_key, line.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            message_id = %message.unique_id(),
            entries = entries.len(),
            "Split message into Kinesis entries"
        );
        Ok(entries)
    }
}

/// Configured choice of [`RequestBuilder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordSplit {
    /// One entry per message.
    #[default]
    None,
    /// One entry per line.
    Lines,
}

impl RecordSplit {
    /// The strategy for this choice.
    #[must_use]
    pub fn into_builder(self) -> Arc<dyn RequestBuilder> {
        match self {
            Self::None => Arc::new(DefaultRequestBuilder),
            Self::Lines => Arc::new(SplittingRequestBuilder),
        }
    }
}

fn entry(partition_key: &str, data: Vec<u8>) -> Result<PutRecordsRequestEntry, KinesisError> {
    Ok(PutRecordsRequestEntry::builder()
        .data(Blob::new(data))
        .partition_key(partition_key)
        .build()?)
}
