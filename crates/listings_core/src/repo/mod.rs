//! Repository contract and persistence implementations.
//!
//! # Responsibility
//! - Define the owner/listing data access contract used by the API layer.
//! - Keep MongoDB query and document details inside the persistence boundary.
//!
//! # Invariants
//! - Lookups validate identifiers before any store round-trip.
//! - Repository APIs return semantic errors (`NotFound`, `InvalidId`,
//!   `InvalidData`) in addition to store transport errors.

pub mod listing_repo;
pub mod memory_repo;
pub mod mongo_repo;
