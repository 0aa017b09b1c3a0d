//! Domain DTOs for the item API.
//!
//! # Design
//! These types mirror the item-server's schema but are defined independently,
//! so the client core never links against Axum. Integration tests catch any
//! schema drift between the two crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Server-assigned item identifier. Never generated on the client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// A single item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
}

/// Request payload for creating a new item.
///
/// Construct through [`NewItem::from_draft`] to get the trimming and
/// non-empty checks; the server does not enforce either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub description: String,
}

impl NewItem {
    /// Trim both fields and reject the pair if either ends up empty.
    pub fn from_draft(title: &str, description: &str) -> Result<Self, ApiError> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(ApiError::Validation(
                "title and description must not be empty".to_string(),
            ));
        }
        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
        })
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
}
