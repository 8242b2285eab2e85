//! Core types shared by every awsbridge adapter.
//!
//! This crate holds the ambient building blocks used by the credential, Kinesis
//! and S3 adapters: bridge configuration, the host message abstraction that
//! adapters read payloads from, secret handling (redacted storage and the
//! injected decoder for obfuscated values), and tracing initialisation.

mod config;
mod error;
pub mod message;
pub mod secret;
pub mod telemetry;
mod types;

pub use config::BridgeConfig;
pub use error::{CoreError, CoreResult, DecodeError, MessageError};
pub use message::{FileBackedMessage, InMemoryMessage, Message};
pub use secret::{DefaultSecretDecoder, PlainSecretDecoder, SecretDecoder, SensitiveString};
pub use types::AwsRegion;
