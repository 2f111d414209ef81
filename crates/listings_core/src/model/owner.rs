//! Owner domain shapes.

use crate::model::id::{record_id_to_string, RecordId};
use serde::{Deserialize, Serialize};

/// User-supplied fields for creating an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOwner {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Persisted owner as returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Store-assigned identifier, lowercase hex.
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Owner {
    /// Builds the owner returned after a successful insert of `input`.
    pub fn from_new(id: &RecordId, input: &NewOwner) -> Self {
        Self {
            id: record_id_to_string(id),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
        }
    }
}
