//! Secret handling.
//!
//! Configured secrets are held as [`SensitiveString`] so they never reach logs
//! or serialized config dumps in clear text. Before use they pass through a
//! [`SecretDecoder`], which turns an obfuscated configuration value into the
//! plain secret.
//!
//! Serialization is one-way: a serialized secret is the [`REDACTED`]
//! placeholder, and decoding that placeholder fails with
//! [`DecodeError::Redacted`] instead of yielding it as a secret.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// What a [`SensitiveString`] serializes to.
pub const REDACTED: &str = "***REDACTED***";

/// A string whose value is redacted in `Debug`, `Display` and serialized form.
#[derive(Clone)]
pub struct SensitiveString(SecretString);

impl SensitiveString {
    /// Wrap a sensitive value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::new(value.into().into_boxed_str()))
    }

    /// Expose the wrapped value.
    ///
    /// Only call this where the clear value is actually consumed.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the wrapped value is the [`REDACTED`] placeholder.
    #[must_use]
    pub fn is_redacted(&self) -> bool {
        self.expose_secret() == REDACTED
    }

    /// Whether the wrapped value is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for SensitiveString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl std::fmt::Display for SensitiveString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl From<String> for SensitiveString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SensitiveString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Writes [`REDACTED`], never the value. Reading it back does not restore
/// the secret.
impl Serialize for SensitiveString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for SensitiveString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

/// Turns a configured (possibly obfuscated) secret into its plain-text value.
pub trait SecretDecoder: Send + Sync + std::fmt::Debug {
    /// Decode `encoded` into the plain secret.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the value cannot be decoded.
    fn decode(&self, encoded: &SensitiveString) -> Result<SensitiveString, DecodeError>;
}

/// A decoder that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSecretDecoder;

impl SecretDecoder for PlainSecretDecoder {
    fn decode(&self, encoded: &SensitiveString) -> Result<SensitiveString, DecodeError> {
        Ok(encoded.clone())
    }
}

/// Prefix-driven decoder.
///
/// | Form | Result |
/// |------|--------|
/// | `base64:<data>` | `<data>` base64-decoded as UTF-8 |
/// | `env:<NAME>` | value of environment variable `NAME` |
/// | anything else | the value itself |
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSecretDecoder;

impl DefaultSecretDecoder {
    const BASE64_PREFIX: &str = "base64:";
    const ENV_PREFIX: &str = "env:";

    fn decode_with(
        encoded: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<SensitiveString, DecodeError> {
        if encoded == REDACTED {
            return Err(DecodeError::Redacted);
        }
        if let Some(data) = encoded.strip_prefix(Self::BASE64_PREFIX) {
            tracing::trace!("Decoding base64 secret");
            let bytes = STANDARD.decode(data.trim())?;
            return Ok(SensitiveString::new(String::from_utf8(bytes)?));
        }
        if let Some(name) = encoded.strip_prefix(Self::ENV_PREFIX) {
            tracing::trace!(variable = name, "Resolving secret from environment");
            return lookup(name)
                .map(SensitiveString::new)
                .ok_or_else(|| DecodeError::MissingVariable(name.to_owned()));
        }
        Ok(SensitiveString::new(encoded))
    }
}

impl SecretDecoder for DefaultSecretDecoder {
    fn decode(&self, encoded: &SensitiveString) -> Result<SensitiveString, DecodeError> {
        Self::decode_with(encoded.expose_secret(), |name| std::env::var(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_redact_debug_and_display() {
        let secret = SensitiveString::new("hunter2");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(format!("{secret}"), "[REDACTED]");
        assert_eq!(secret.expose_secret(), "hunter2");
    }

    #[test]
    fn test_should_redact_serialized_form() {
        let secret = SensitiveString::new("hunter2");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"***REDACTED***\"");
    }

    #[test]
    fn test_should_reject_redacted_placeholder_after_roundtrip() {
        let json = serde_json::to_string(&SensitiveString::new("hunter2")).unwrap();
        let restored: SensitiveString = serde_json::from_str(&json).unwrap();

        assert!(restored.is_redacted());
        let result = DefaultSecretDecoder.decode(&restored);
        assert!(matches!(result, Err(DecodeError::Redacted)));
    }

    #[test]
    fn test_should_deserialize_actual_value() {
        let secret: SensitiveString = serde_json::from_str("\"hunter2\"").unwrap();
        assert_eq!(secret.expose_secret(), "hunter2");
    }

    #[test]
    fn test_should_pass_plain_value_through() {
        let decoded = DefaultSecretDecoder
            .decode(&SensitiveString::new("wJalrXUtnFEMI"))
            .unwrap();
        assert_eq!(decoded.expose_secret(), "wJalrXUtnFEMI");
    }

    #[test]
    fn test_should_decode_base64_prefixed_value() {
        // "secret-key" in base64.
        let decoded = DefaultSecretDecoder
            .decode(&SensitiveString::new("base64:c2VjcmV0LWtleQ=="))
            .unwrap();
        assert_eq!(decoded.expose_secret(), "secret-key");
    }

    #[test]
    fn test_should_reject_invalid_base64() {
        let result = DefaultSecretDecoder.decode(&SensitiveString::new("base64:!!!"));
        assert!(matches!(result, Err(DecodeError::Base64(_))));
    }

    #[test]
    fn test_should_reject_non_utf8_base64_payload() {
        // 0xff 0xfe
        let result = DefaultSecretDecoder.decode(&SensitiveString::new("base64://4="));
        assert!(matches!(result, Err(DecodeError::NotUtf8(_))));
    }

    #[test]
    fn test_should_resolve_env_reference() {
        let decoded = DefaultSecretDecoder::decode_with("env:MY_SECRET", |name| {
            (name == "MY_SECRET").then(|| "from-env".to_owned())
        })
        .unwrap();
        assert_eq!(decoded.expose_secret(), "from-env");
    }

    #[test]
    fn test_should_fail_on_unset_env_reference() {
        let result = DefaultSecretDecoder::decode_with("env:NOPE", |_| None);
        assert!(matches!(result, Err(DecodeError::MissingVariable(ref n)) if n == "NOPE"));
    }

    #[test]
    fn test_should_leave_value_unchanged_with_plain_decoder() {
        let decoded = PlainSecretDecoder
            .decode(&SensitiveString::new("base64:c2VjcmV0"))
            .unwrap();
        assert_eq!(decoded.expose_secret(), "base64:c2VjcmV0");
    }
}
