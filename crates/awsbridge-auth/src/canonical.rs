//! Canonical request construction for outgoing SigV4-signed requests.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! [`CanonicalRequest::from_parts`] reads everything from the request head, so
//! the exact set of headers present at signing time is what gets signed.
//!
//! The canonical URI depends on the service. S3 signs the object key as sent.
//! Every other service signs the dot-segment-normalized path with each
//! segment encoded a second time, so `/a%3Ab` is signed as `/a%253Ab`.

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::AuthError;

/// Everything except RFC 3986 unreserved characters is encoded.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Path encoding with `/` kept as the segment separator.
const PATH_ENCODE_SET: &AsciiSet = &URI_ENCODE_SET.remove(b'/');

/// How the request path enters the canonical URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEncoding {
    /// Segments encoded once, no normalization. Used by `s3`.
    Single,
    /// Path normalized, then the already-encoded path encoded again.
    Double,
}

impl PathEncoding {
    /// The encoding `service` expects.
    #[must_use]
    pub fn for_service(service: &str) -> Self {
        if service == "s3" {
            Self::Single
        } else {
            Self::Double
        }
    }
}

/// Headers that are never part of a signature.
///
/// Proxies and client libraries rewrite these freely in transit.
const UNSIGNED_HEADERS: &[&str] = &[
    "authorization",
    "connection",
    "expect",
    "user-agent",
    "x-amzn-trace-id",
];

/// A canonical request ready to be hashed into the string to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: String,
    uri: String,
    query: String,
    headers: BTreeMap<String, String>,
    payload_hash: String,
}

impl CanonicalRequest {
    /// Build the canonical form of a request head.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidHeader`] if a signable header value is not
    /// visible ASCII.
    pub fn from_parts(
        parts: &http::request::Parts,
        encoding: PathEncoding,
        payload_hash: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in &parts.headers {
            let name = name.as_str();
            if UNSIGNED_HEADERS.contains(&name) {
                continue;
            }
            let value = value
                .to_str()
                .map_err(|_| AuthError::InvalidHeader(name.to_owned()))?;
            let value = collapse_whitespace(value.trim());
            headers
                .entry(name.to_owned())
                .and_modify(|existing| {
                    existing.push(',');
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        Ok(Self {
            method: parts.method.as_str().to_owned(),
            uri: canonical_uri(parts.uri.path(), encoding),
            query: canonical_query_string(parts.uri.query().unwrap_or("")),
            headers,
            payload_hash: payload_hash.into(),
        })
    }

    /// Semicolon-separated, sorted list of the signed header names.
    #[must_use]
    pub fn signed_headers(&self) -> String {
        self.headers.keys().map(String::as_str).collect::<Vec<_>>().join(";")
    }

    /// Hex-encoded payload hash carried on the last line.
    #[must_use]
    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| format!("{name}:{value}"))
            .collect::<Vec<_>>()
            .join("\n");
        write!(
            f,
            "{}\n{}\n{}\n{headers}\n\n{}\n{}",
            self.method,
            self.uri,
            self.query,
            self.signed_headers(),
            self.payload_hash
        )
    }
}

/// Canonical URI of `path` under `encoding`.
///
/// With [`PathEncoding::Single`] each segment is decoded and encoded once, so
/// an already-encoded key is not encoded twice. With [`PathEncoding::Double`]
/// the path is normalized and its encoded form encoded again.
#[must_use]
pub fn canonical_uri(path: &str, encoding: PathEncoding) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_owned();
    }

    match encoding {
        PathEncoding::Single => path
            .split('/')
            .map(|segment| uri_encode(&percent_decode_str(segment).decode_utf8_lossy()))
            .collect::<Vec<_>>()
            .join("/"),
        PathEncoding::Double => {
            utf8_percent_encode(&normalize_path(path), PATH_ENCODE_SET).to_string()
        }
    }
}

/// Remove `.` and `..` segments, keeping a leading and trailing `/`.
///
/// Empty segments are kept, so `//a` stays `//a`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut normalized = segments.join("/");
    if !normalized.starts_with('/') {
        normalized.insert(0, '/');
    }
    let trailing = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");
    if trailing && !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

/// Sort query parameters by key then value, each strictly URI-encoded.
#[must_use]
pub fn canonical_query_string(query: &str) -> String {
    let mut params: Vec<(String, String)> = query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|param| {
            let (k, v) = param.split_once('=').unwrap_or((param, ""));
            (
                uri_encode(&percent_decode_str(k).decode_utf8_lossy()),
                uri_encode(&percent_decode_str(v).decode_utf8_lossy()),
            )
        })
        .collect();

    params.sort_unstable();

    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}

fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }
    result
}
