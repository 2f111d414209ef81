//! Owner/listing repository contract and error taxonomy.
//!
//! # Invariants
//! - `create_listing` always returns and stores `ListingStatus::NotStarted`.
//! - Scans either return every document or an error; partial results are
//!   never handed back.
//! - A malformed stored document fails the operation with `InvalidData`
//!   instead of being skipped.

use crate::db::DbError;
use crate::model::id::InvalidIdError;
use crate::model::listing::{Listing, NewListing};
use crate::model::owner::{NewOwner, Owner};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by every repository operation.
#[derive(Debug)]
pub enum RepoError {
    /// Store transport, query or timeout failure.
    Db(DbError),
    /// Caller-supplied identifier is not a valid store identifier.
    InvalidId(InvalidIdError),
    /// No document matched the identifier.
    NotFound {
        collection: &'static str,
        id: String,
    },
    /// A stored document could not be mapped to the domain model.
    InvalidData(String),
}

impl RepoError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(DbError::Timeout { .. }) => "timeout",
            Self::Db(DbError::Mongo(_)) => "db_error",
            Self::InvalidId(_) => "invalid_id",
            Self::NotFound { .. } => "not_found",
            Self::InvalidData(_) => "invalid_data",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the failure was caused by the request rather than the store.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidId(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidId(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid stored document: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidId(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<mongodb::error::Error> for RepoError {
    fn from(value: mongodb::error::Error) -> Self {
        Self::Db(DbError::Mongo(value))
    }
}

impl From<InvalidIdError> for RepoError {
    fn from(value: InvalidIdError) -> Self {
        Self::InvalidId(value)
    }
}

/// Data access contract for owners and listings.
///
/// Implementations are shared across concurrent request handlers, so every
/// method takes `&self`.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn create_owner(&self, input: &NewOwner) -> RepoResult<Owner>;
    async fn create_listing(&self, input: &NewListing) -> RepoResult<Listing>;
    async fn get_owners(&self) -> RepoResult<Vec<Owner>>;
    async fn get_listings(&self) -> RepoResult<Vec<Listing>>;
    async fn get_owner(&self, id: &str) -> RepoResult<Owner>;
    async fn get_listing(&self, id: &str) -> RepoResult<Listing>;
}
