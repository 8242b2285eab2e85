//! Kinesis record-entry builders.
//!
//! A [`RequestBuilder`] converts one host message and a partition key into
//! the `PutRecordsRequestEntry` values an SDK `PutRecords` call consumes.
//! [`DefaultRequestBuilder`] maps a message to exactly one entry;
//! [`SplittingRequestBuilder`] emits one entry per line. [`PartitionKey`]
//! decides where the key comes from, and [`KinesisRecordBuilder`] ties the
//! pieces into a ready-to-send [`PutRecordsInput`](aws_sdk_kinesis::operation::put_records::PutRecordsInput).
//!
//! Size limits, shard distribution and delivery are left to the service and
//! the host pipeline.

mod builder;
mod error;
mod partition;
mod request;

pub use builder::{DefaultRequestBuilder, RecordSplit, RequestBuilder, SplittingRequestBuilder};
pub use error::{KinesisError, KinesisResult};
pub use partition::PartitionKey;
pub use request::{KinesisConfig, KinesisRecordBuilder, put_records_input};
