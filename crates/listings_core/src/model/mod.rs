//! Domain model for owners and listings.
//!
//! # Responsibility
//! - Define the API-facing input and output shapes (`NewOwner`, `Owner`,
//!   `NewListing`, `Listing`).
//! - Convert identifiers between their hex string form and store ObjectIds.
//!
//! # Invariants
//! - Every `Owner`/`Listing` carries a store-assigned identifier rendered as
//!   24 lowercase hex characters.
//! - Input shapes never carry identifiers, timestamps or status.

pub mod id;
pub mod listing;
pub mod owner;
