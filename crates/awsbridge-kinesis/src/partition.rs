//! Where a record's partition key comes from.

use awsbridge_core::Message;
use serde::{Deserialize, Serialize};

use crate::error::KinesisError;

/// Partition key source.
///
/// ```json
/// { "source": "metadata", "value": "customerId" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "kebab-case")]
pub enum PartitionKey {
    /// The same key for every message.
    Fixed(String),
    /// The value of a message metadata key.
    Metadata(String),
    /// The message's unique id.
    MessageId,
}

impl PartitionKey {
    /// Resolve the key for `message`.
    ///
    /// # Errors
    ///
    /// Returns [`KinesisError::MissingPartitionKey`] when the source yields an
    /// empty value or the metadata key is absent.
    pub fn resolve<'a>(&'a self, message: &'a dyn Message) -> Result<&'a str, KinesisError> {
        let key = match self {
            Self::Fixed(key) => Some(key.as_str()),
            Self::Metadata(name) => message.metadata(name),
            Self::MessageId => Some(message.unique_id()),
        };
        key.filter(|k| !k.is_empty())
            .ok_or_else(|| KinesisError::MissingPartitionKey(self.describe()))
    }

    fn describe(&self) -> String {
        match self {
            Self::Fixed(_) => "fixed value".to_owned(),
            Self::Metadata(name) => format!("metadata key {name}"),
            Self::MessageId => "message id".to_owned(),
        }
    }
}
