// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item model and the request shapes used to create and update items.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FieldViolation, ShelfError};

/// Maximum length of an item name, in characters.
pub const NAME_MAX_CHARS: usize = 200;

/// Maximum length of an item description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Unique identifier for an item (random 128-bit UUID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a fresh random identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ItemId {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ShelfError::InvalidId(s.to_string()))
    }
}

/// A persisted item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Build a new item with a fresh id, stamped with `now` for both timestamps.
    pub fn from_new(data: NewItem, now: DateTime<Utc>) -> Self {
        Self {
            id: ItemId::new_v4(),
            name: data.name,
            description: data.description,
            price: data.price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place.
    ///
    /// Provided fields overwrite, omitted fields are kept. `updated_at` never
    /// moves backwards, so `created_at <= updated_at` holds even if the wall
    /// clock steps back.
    pub fn apply(&mut self, patch: ItemPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        self.updated_at = now.max(self.updated_at);
    }
}

/// Current time at the precision the store persists (microseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fields supplied by a client to create an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

impl NewItem {
    /// Check field constraints, collecting every violation.
    pub fn validate(&self) -> Result<(), ShelfError> {
        let mut violations = Vec::new();
        check_name(&self.name, &mut violations);
        if let Some(description) = &self.description {
            check_description(description, &mut violations);
        }
        check_price(self.price, &mut violations);
        into_result(violations)
    }
}

/// Fields supplied by a client to update an item. `None` means "keep".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ItemPatch {
    /// Check constraints on the fields that are present.
    pub fn validate(&self) -> Result<(), ShelfError> {
        let mut violations = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut violations);
        }
        if let Some(description) = &self.description {
            check_description(description, &mut violations);
        }
        if let Some(price) = self.price {
            check_price(price, &mut violations);
        }
        into_result(violations)
    }
}

fn check_name(name: &str, violations: &mut Vec<FieldViolation>) {
    let len = name.chars().count();
    if len == 0 {
        violations.push(FieldViolation::new("name", "must not be empty"));
    } else if len > NAME_MAX_CHARS {
        violations.push(FieldViolation::new(
            "name",
            format!("must be at most {NAME_MAX_CHARS} characters, got {len}"),
        ));
    }
}

fn check_description(description: &str, violations: &mut Vec<FieldViolation>) {
    let len = description.chars().count();
    if len > DESCRIPTION_MAX_CHARS {
        violations.push(FieldViolation::new(
            "description",
            format!("must be at most {DESCRIPTION_MAX_CHARS} characters, got {len}"),
        ));
    }
}

fn check_price(price: f64, violations: &mut Vec<FieldViolation>) {
    if !price.is_finite() {
        violations.push(FieldViolation::new("price", "must be a finite number"));
    } else if price < 0.0 {
        violations.push(FieldViolation::new(
            "price",
            format!("must be non-negative, got {price}"),
        ));
    }
}

fn into_result(violations: Vec<FieldViolation>) -> Result<(), ShelfError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ShelfError::Validation { violations })
    }
}
