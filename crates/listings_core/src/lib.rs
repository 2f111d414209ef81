//! Data access layer for the listings service.
//! Owners and listings are stored in MongoDB (`listings-db`); every
//! operation is a single bounded round-trip.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{ConfigError, StoreConfig};
pub use db::{DbError, DbResult, DATABASE_NAME, OPERATION_TIMEOUT};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::id::{parse_record_id, record_id_to_string, InvalidIdError, RecordId};
pub use model::listing::{Listing, ListingStatus, NewListing};
pub use model::owner::{NewOwner, Owner};
pub use repo::listing_repo::{ListingRepository, RepoError, RepoResult};
pub use repo::memory_repo::InMemoryRepository;
pub use repo::mongo_repo::MongoRepository;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
