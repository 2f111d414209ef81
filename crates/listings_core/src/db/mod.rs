//! MongoDB connection bootstrap and per-call deadlines.
//!
//! # Responsibility
//! - Name the logical namespace (`listings-db`) and its collections.
//! - Open and health-check a client before any repository uses it.
//! - Bound every store round-trip with `OPERATION_TIMEOUT`.
//!
//! # Invariants
//! - A client is only handed out after a successful ping.
//! - No store call outlives its deadline; expiry surfaces as
//!   `DbError::Timeout`, never a hang.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::time::Duration;

mod connect;

pub use connect::connect;

/// Logical database holding every collection of this service.
pub const DATABASE_NAME: &str = "listings-db";
/// Collection storing owner documents.
pub const OWNER_COLLECTION: &str = "owner";
/// Collection storing listing documents.
pub const LISTING_COLLECTION: &str = "listing";
/// Execution window applied to each store operation.
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Mongo(mongodb::error::Error),
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mongo(err) => write!(f, "{err}"),
            Self::Timeout { operation, after } => write!(
                f,
                "{operation} timed out after {}ms",
                after.as_millis()
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Mongo(err) => Some(err),
            Self::Timeout { .. } => None,
        }
    }
}

impl From<mongodb::error::Error> for DbError {
    fn from(value: mongodb::error::Error) -> Self {
        Self::Mongo(value)
    }
}

/// Runs `future` under the standard `OPERATION_TIMEOUT` window.
pub async fn with_deadline<T, E, F>(operation: &'static str, future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DbError>,
{
    with_timeout(operation, OPERATION_TIMEOUT, future).await
}

/// Runs `future` under an explicit window.
///
/// The future is dropped when the window expires, which releases any cursor
/// or connection checkout it holds.
pub async fn with_timeout<T, E, F>(
    operation: &'static str,
    limit: Duration,
    future: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DbError>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(DbError::Timeout {
            operation,
            after: limit,
        }
        .into()),
    }
}
