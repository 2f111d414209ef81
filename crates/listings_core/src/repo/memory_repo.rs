//! In-process repository with the same contract as `MongoRepository`.
//!
//! # Responsibility
//! - Back API-layer tests and local runs without a database server.
//!
//! # Invariants
//! - Identifiers are freshly generated ObjectIds, never reused.
//! - Lookups reject malformed identifiers before searching.
//! - Scans return documents in insertion order.

use crate::db::{LISTING_COLLECTION, OWNER_COLLECTION};
use crate::model::id::{parse_record_id, record_id_to_string, RecordId};
use crate::model::listing::{Listing, NewListing};
use crate::model::owner::{NewOwner, Owner};
use crate::repo::listing_repo::{ListingRepository, RepoError, RepoResult};
use async_trait::async_trait;
use mongodb::bson::DateTime as BsonDateTime;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    owners: RwLock<Vec<Owner>>,
    listings: RwLock<Vec<Listing>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for InMemoryRepository {
    async fn create_owner(&self, input: &NewOwner) -> RepoResult<Owner> {
        let owner = Owner::from_new(&RecordId::new(), input);
        self.owners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(owner.clone());
        Ok(owner)
    }

    async fn create_listing(&self, input: &NewListing) -> RepoResult<Listing> {
        // Millisecond precision, matching what a stored BSON datetime keeps.
        let created_at = BsonDateTime::now().to_chrono();
        let listing = Listing::from_new(&RecordId::new(), input, created_at);
        self.listings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listing.clone());
        Ok(listing)
    }

    async fn get_owners(&self) -> RepoResult<Vec<Owner>> {
        Ok(self
            .owners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn get_listings(&self) -> RepoResult<Vec<Listing>> {
        Ok(self
            .listings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn get_owner(&self, id: &str) -> RepoResult<Owner> {
        let key = record_id_to_string(&parse_record_id(id)?);
        self.owners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|owner| owner.id == key)
            .cloned()
            .ok_or(RepoError::NotFound {
                collection: OWNER_COLLECTION,
                id: key,
            })
    }

    async fn get_listing(&self, id: &str) -> RepoResult<Listing> {
        let key = record_id_to_string(&parse_record_id(id)?);
        self.listings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|listing| listing.id == key)
            .cloned()
            .ok_or(RepoError::NotFound {
                collection: LISTING_COLLECTION,
                id: key,
            })
    }
}
