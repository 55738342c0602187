//! Deterministic request hashing

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable identifier for an endpoint + payload pair
///
/// Hex-encoded SHA-256 over the endpoint and the payload serialized with
/// object keys in sorted order, so structurally equal payloads hash equally
/// regardless of key insertion order. The endpoint is normalized exactly as
/// [`Vendor::url`](crate::core::providers::Vendor::url) does: leading slashes
/// are dropped, trailing ones are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestHash(String);

impl RequestHash {
    pub fn compute(endpoint: &str, payload: &Value) -> Self {
        let canonical = canonicalize(payload);

        let mut hasher = Sha256::new();
        hasher.update(endpoint.trim_start_matches('/').as_bytes());
        hasher.update([0u8]);
        hasher.update(canonical.to_string().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rebuild objects with their keys inserted in sorted order
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
