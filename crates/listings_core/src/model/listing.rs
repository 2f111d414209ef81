//! Listing domain shapes and lifecycle status.
//!
//! # Invariants
//! - Newly created listings always start in `ListingStatus::NotStarted`.
//! - `created_at` has millisecond precision so it survives a store
//!   round-trip unchanged.

use crate::model::id::{record_id_to_string, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Listing lifecycle state.
///
/// Serialized with the API enum spelling (`NOT_STARTED`, ...), both in JSON
/// responses and in stored documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    /// Initial state assigned on creation.
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ListingStatus {
    /// Stable serialized name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

impl Display for ListingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// User-supplied fields for creating a listing.
///
/// There is deliberately no status field: status is owned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    /// Owner reference; existence is not checked by this layer.
    pub owner_id: String,
    pub description: String,
    pub location: String,
}

/// Persisted listing as returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Store-assigned identifier, lowercase hex.
    pub id: String,
    pub owner_id: String,
    pub description: String,
    pub location: String,
    /// Assigned by the repository at creation time (UTC, millisecond precision).
    pub created_at: DateTime<Utc>,
    pub status: ListingStatus,
}

impl Listing {
    /// Builds the listing returned after a successful insert of `input`.
    ///
    /// Status is always `NotStarted`.
    pub fn from_new(id: &RecordId, input: &NewListing, created_at: DateTime<Utc>) -> Self {
        Self {
            id: record_id_to_string(id),
            owner_id: input.owner_id.clone(),
            description: input.description.clone(),
            location: input.location.clone(),
            created_at,
            status: ListingStatus::NotStarted,
        }
    }
}
