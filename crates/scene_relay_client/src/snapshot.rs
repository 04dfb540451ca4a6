//! Decoding a fetched snapshot into parts.
//!
//! The relay hands back exactly what the producer pushed, so nothing is
//! guaranteed about its shape. A document that is not an array is rejected
//! as a whole; inside an array, entries that cannot become a [`Part`] are
//! dropped one by one and the rest are kept.

use scene_relay_shared::Part;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Parts decoded from one poll.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedSnapshot {
    /// Usable parts, in wire order.
    pub parts: Vec<Part>,
    /// Number of entries in the document, usable or not.
    pub total: usize,
    /// Entries that were dropped.
    pub skipped: usize,
}

impl ParsedSnapshot {
    /// Decodes a fetched document.
    pub fn from_json(document: &Value) -> ClientResult<Self> {
        let entries = document
            .as_array()
            .ok_or_else(|| ClientError::MalformedSnapshot(json_kind(document)))?;

        let mut parsed = Self {
            parts: Vec::with_capacity(entries.len()),
            total: entries.len(),
            skipped: 0,
        };

        for (index, entry) in entries.iter().enumerate() {
            match Part::deserialize(entry) {
                Ok(part) => parsed.parts.push(part),
                Err(err) => {
                    parsed.skipped += 1;
                    tracing::warn!("Skipping snapshot entry {}: {}", index, err);
                }
            }
        }

        Ok(parsed)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
