// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk encoding of the item collection.
//!
//! The file is a pretty-printed JSON array. Ids are canonical UUID strings and
//! timestamps are RFC 3339 strings with an explicit `+00:00` offset and
//! microsecond precision. Decoding is strict: a missing or malformed required
//! field fails the whole file rather than being defaulted.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use shelf_core::{Item, ItemId};
use thiserror::Error;
use uuid::Uuid;

/// Why the backing file could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index}: invalid id `{value}`")]
    InvalidId { index: usize, value: String },

    #[error("record {index}: invalid {field} timestamp `{value}`: {source}")]
    InvalidTimestamp {
        index: usize,
        field: &'static str,
        value: String,
        source: chrono::ParseError,
    },

    #[error("record {index}: {field} {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: &'static str,
    },

    #[error("record {index}: updated_at precedes created_at")]
    TimestampOrder { index: usize },

    #[error("record {index}: duplicate id {id} (first seen at record {first})")]
    DuplicateId { index: usize, first: usize, id: ItemId },
}

/// One record as it appears in the file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: f64,
    created_at: String,
    updated_at: String,
}

impl From<&Item> for StoredItem {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            created_at: format_timestamp(&item.created_at),
            updated_at: format_timestamp(&item.updated_at),
        }
    }
}

impl StoredItem {
    fn into_item(self, index: usize) -> Result<Item, DecodeError> {
        let id = Uuid::parse_str(&self.id)
            .map(ItemId)
            .map_err(|_| DecodeError::InvalidId {
                index,
                value: self.id.clone(),
            })?;
        if self.name.is_empty() {
            return Err(DecodeError::InvalidField {
                index,
                field: "name",
                reason: "is empty",
            });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DecodeError::InvalidField {
                index,
                field: "price",
                reason: "is negative or not finite",
            });
        }
        let created_at = parse_timestamp(&self.created_at, index, "created_at")?;
        let updated_at = parse_timestamp(&self.updated_at, index, "updated_at")?;
        if updated_at < created_at {
            return Err(DecodeError::TimestampOrder { index });
        }
        Ok(Item {
            id,
            created_at,
            updated_at,
            name: self.name,
            description: self.description,
            price: self.price,
        })
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

fn parse_timestamp(
    value: &str,
    index: usize,
    field: &'static str,
) -> Result<DateTime<Utc>, DecodeError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|source| DecodeError::InvalidTimestamp {
            index,
            field,
            value: value.to_string(),
            source,
        })
}

/// Encode the full collection, in order, as the file's contents.
pub fn encode(items: &[Item]) -> Result<Vec<u8>, serde_json::Error> {
    let stored: Vec<StoredItem> = items.iter().map(StoredItem::from).collect();
    let mut bytes = serde_json::to_vec_pretty(&stored)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode the file's contents, preserving record order.
///
/// Besides the shape of each record, the collection must hold the item
/// invariants: unique ids, a non-empty name, a finite non-negative price and
/// `created_at <= updated_at`.
pub fn decode(bytes: &[u8]) -> Result<Vec<Item>, DecodeError> {
    let stored: Vec<StoredItem> = serde_json::from_slice(bytes)?;
    let mut seen: HashMap<ItemId, usize> = HashMap::with_capacity(stored.len());
    let mut items = Vec::with_capacity(stored.len());
    for (index, record) in stored.into_iter().enumerate() {
        let item = record.into_item(index)?;
        if let Some(&first) = seen.get(&item.id) {
            return Err(DecodeError::DuplicateId {
                index,
                first,
                id: item.id,
            });
        }
        seen.insert(item.id, index);
        items.push(item);
    }
    Ok(items)
}
