//! Decoding of `[tag, payload]` tuple lists.
//!
//! Merriam-Webster encodes sense sequences and defining text as arrays of
//! two-element arrays whose first element names the payload type:
//!
//! ```json
//! [["bs", {"sense": {...}}], ["sense", {...}], ["pseq", [...]]]
//! ```
//!
//! Decoding reads the tag first and only then decodes the payload for that
//! tag. Unknown tags, tuples of the wrong arity and payloads that don't decode
//! are skipped so new tags from the provider don't break lookups.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A closed set of known tags
pub trait TaggedVariant: Sized {
    /// `None` for a tag this variant doesn't know
    fn decode(tag: &str, payload: Value) -> Option<Result<Self, serde_json::Error>>;
}

/// Helper for [`TaggedVariant::decode`] implementations
pub fn payload<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(value)
}

/// The known tuples of a list, in document order
#[derive(Clone, PartialEq)]
pub struct TaggedSeq<T>(pub Vec<T>);

impl<T> Default for TaggedSeq<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: fmt::Debug> fmt::Debug for TaggedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl<T> IntoIterator for TaggedSeq<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: TaggedVariant> TaggedSeq<T> {
    pub fn from_value(value: Value) -> Self {
        let Value::Array(items) = value else {
            tracing::debug!("expected a tuple list, skipping");
            return Self::default();
        };

        let mut decoded = Vec::with_capacity(items.len());
        for item in items {
            let Some((tag, payload)) = split_tuple(item) else {
                continue;
            };
            match T::decode(&tag, payload) {
                Some(Ok(variant)) => decoded.push(variant),
                Some(Err(e)) => tracing::warn!(tag = %tag, "skipping undecodable tuple: {e}"),
                None => tracing::trace!(tag = %tag, "skipping unknown tag"),
            }
        }
        Self(decoded)
    }
}

impl<'de, T: TaggedVariant> Deserialize<'de> for TaggedSeq<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

/// `["tag", payload]` into its parts, `None` for anything else
fn split_tuple(item: Value) -> Option<(String, Value)> {
    let Value::Array(mut parts) = item else {
        return None;
    };
    if parts.len() != 2 {
        return None;
    }
    let payload = parts.pop()?;
    match parts.pop()? {
        Value::String(tag) => Some((tag, payload)),
        _ => None,
    }
}
