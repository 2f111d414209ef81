//! MongoDB-backed repository.
//!
//! # Responsibility
//! - Map domain inputs to stored documents and back.
//! - Run each operation as one round-trip under the standard deadline.
//!
//! # Invariants
//! - `createdAt` and `status` are written at insert time, so read-after-write
//!   returns the same values as the create response.
//! - Log lines carry operation metadata only, never user field values.

use crate::db::{
    self, with_deadline, DbResult, DATABASE_NAME, LISTING_COLLECTION, OWNER_COLLECTION,
};
use crate::model::id::{parse_record_id, record_id_to_string, RecordId};
use crate::model::listing::{Listing, ListingStatus, NewListing};
use crate::model::owner::{NewOwner, Owner};
use crate::repo::listing_repo::{ListingRepository, RepoError, RepoResult};
use async_trait::async_trait;
use log::{debug, error, warn};
use mongodb::bson::{doc, Bson, DateTime as BsonDateTime};
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection, Database};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Stored shape of an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct OwnerDocument {
    /// Left empty on insert so the driver assigns a fresh ObjectId.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,
    name: String,
    email: String,
    phone: String,
}

impl OwnerDocument {
    fn from_new(input: &NewOwner) -> Self {
        Self {
            id: None,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
        }
    }

    fn into_owner(self) -> RepoResult<Owner> {
        let id = self.id.ok_or_else(|| missing_id(OWNER_COLLECTION))?;
        Ok(Owner {
            id: record_id_to_string(&id),
            name: self.name,
            email: self.email,
            phone: self.phone,
        })
    }
}

/// Stored shape of a listing.
///
/// Documents written before `createdAt`/`status` were persisted decode with
/// the ObjectId timestamp and `NotStarted`. `ownerid` is the legacy spelling
/// of `ownerId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,
    #[serde(alias = "ownerid")]
    owner_id: String,
    description: String,
    location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<BsonDateTime>,
    #[serde(default)]
    status: ListingStatus,
}

impl ListingDocument {
    fn from_new(input: &NewListing, created_at: BsonDateTime) -> Self {
        Self {
            id: None,
            owner_id: input.owner_id.clone(),
            description: input.description.clone(),
            location: input.location.clone(),
            created_at: Some(created_at),
            status: ListingStatus::NotStarted,
        }
    }

    fn into_listing(self) -> RepoResult<Listing> {
        let id = self.id.ok_or_else(|| missing_id(LISTING_COLLECTION))?;
        let created_at = self.created_at.unwrap_or_else(|| id.timestamp());
        Ok(Listing {
            id: record_id_to_string(&id),
            owner_id: self.owner_id,
            description: self.description,
            location: self.location,
            created_at: created_at.to_chrono(),
            status: self.status,
        })
    }
}

/// Repository over the `owner` and `listing` collections.
///
/// Cloning is cheap and clones share the underlying connection pool, so one
/// instance built at startup can be handed to every request handler.
#[derive(Debug, Clone)]
pub struct MongoRepository {
    database: Database,
}

impl MongoRepository {
    /// Connects to `uri` and health-checks `listings-db`.
    ///
    /// # Errors
    /// - Returns `DbError` when the URI is invalid, authentication fails, the
    ///   ping fails or the deadline expires.
    pub async fn connect(uri: &str) -> DbResult<Self> {
        Self::connect_with_database(uri, DATABASE_NAME).await
    }

    /// Same as `connect`, against a caller-chosen database name.
    ///
    /// Used for isolated environments such as integration tests.
    pub async fn connect_with_database(uri: &str, database: &str) -> DbResult<Self> {
        let client = db::connect(uri, database).await?;
        Ok(Self::from_client(&client, database))
    }

    /// Wraps an already connected client without pinging it.
    pub fn from_client(client: &Client, database: &str) -> Self {
        Self {
            database: client.database(database),
        }
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    fn owners(&self) -> Collection<OwnerDocument> {
        self.database.collection(OWNER_COLLECTION)
    }

    fn listings(&self) -> Collection<ListingDocument> {
        self.database.collection(LISTING_COLLECTION)
    }

    async fn insert_owner(&self, input: &NewOwner) -> RepoResult<Owner> {
        let inserted = self
            .owners()
            .insert_one(OwnerDocument::from_new(input), None)
            .await?;
        let id = inserted_record_id(OWNER_COLLECTION, inserted.inserted_id)?;
        Ok(Owner::from_new(&id, input))
    }

    async fn insert_listing(&self, input: &NewListing) -> RepoResult<Listing> {
        let created_at = BsonDateTime::now();
        let inserted = self
            .listings()
            .insert_one(ListingDocument::from_new(input, created_at), None)
            .await?;
        let id = inserted_record_id(LISTING_COLLECTION, inserted.inserted_id)?;
        Ok(Listing::from_new(&id, input, created_at.to_chrono()))
    }

    async fn scan_owners(&self) -> RepoResult<Vec<Owner>> {
        scan(&self.owners())
            .await?
            .into_iter()
            .map(OwnerDocument::into_owner)
            .collect()
    }

    async fn scan_listings(&self) -> RepoResult<Vec<Listing>> {
        scan(&self.listings())
            .await?
            .into_iter()
            .map(ListingDocument::into_listing)
            .collect()
    }

    async fn find_owner(&self, id: RecordId) -> RepoResult<Owner> {
        find_by_id(&self.owners(), OWNER_COLLECTION, id).await?.into_owner()
    }

    async fn find_listing(&self, id: RecordId) -> RepoResult<Listing> {
        find_by_id(&self.listings(), LISTING_COLLECTION, id).await?.into_listing()
    }
}

#[async_trait]
impl ListingRepository for MongoRepository {
    async fn create_owner(&self, input: &NewOwner) -> RepoResult<Owner> {
        let started_at = Instant::now();
        let result = with_deadline("create_owner", self.insert_owner(input)).await;
        log_outcome("create_owner", OWNER_COLLECTION, started_at, &result);
        result
    }

    async fn create_listing(&self, input: &NewListing) -> RepoResult<Listing> {
        let started_at = Instant::now();
        let result = with_deadline("create_listing", self.insert_listing(input)).await;
        log_outcome("create_listing", LISTING_COLLECTION, started_at, &result);
        result
    }

    async fn get_owners(&self) -> RepoResult<Vec<Owner>> {
        let started_at = Instant::now();
        let result = with_deadline("get_owners", self.scan_owners()).await;
        log_outcome("get_owners", OWNER_COLLECTION, started_at, &result);
        result
    }

    async fn get_listings(&self) -> RepoResult<Vec<Listing>> {
        let started_at = Instant::now();
        let result = with_deadline("get_listings", self.scan_listings()).await;
        log_outcome("get_listings", LISTING_COLLECTION, started_at, &result);
        result
    }

    async fn get_owner(&self, id: &str) -> RepoResult<Owner> {
        let started_at = Instant::now();
        let result = match parse_record_id(id) {
            Ok(record_id) => with_deadline("get_owner", self.find_owner(record_id)).await,
            Err(err) => Err(err.into()),
        };
        log_outcome("get_owner", OWNER_COLLECTION, started_at, &result);
        result
    }

    async fn get_listing(&self, id: &str) -> RepoResult<Listing> {
        let started_at = Instant::now();
        let result = match parse_record_id(id) {
            Ok(record_id) => with_deadline("get_listing", self.find_listing(record_id)).await,
            Err(err) => Err(err.into()),
        };
        log_outcome("get_listing", LISTING_COLLECTION, started_at, &result);
        result
    }
}

/// Reads every document of `collection`.
///
/// The first cursor or decode failure aborts the scan and drops what was
/// read so far.
async fn scan<D>(collection: &Collection<D>) -> RepoResult<Vec<D>>
where
    D: DeserializeOwned + Unpin + Send + Sync,
{
    let mut cursor = collection.find(doc! {}, None).await?;
    let mut documents = Vec::new();

    while cursor.advance().await? {
        let document = cursor
            .deserialize_current()
            .map_err(|err| decode_error(collection.name(), &err))?;
        documents.push(document);
    }

    Ok(documents)
}

async fn find_by_id<D>(
    collection: &Collection<D>,
    label: &'static str,
    id: RecordId,
) -> RepoResult<D>
where
    D: DeserializeOwned + Unpin + Send + Sync,
{
    match collection.find_one(doc! { "_id": id }, None).await {
        Ok(Some(document)) => Ok(document),
        Ok(None) => Err(RepoError::NotFound {
            collection: label,
            id: record_id_to_string(&id),
        }),
        Err(err) if is_decode_error(&err) => Err(decode_error(label, &err)),
        Err(err) => Err(err.into()),
    }
}

fn inserted_record_id(collection: &str, inserted_id: Bson) -> RepoResult<RecordId> {
    inserted_id.as_object_id().ok_or_else(|| {
        RepoError::InvalidData(format!(
            "{collection} insert returned a non-ObjectId _id of type {:?}",
            inserted_id.element_type()
        ))
    })
}

fn is_decode_error(err: &mongodb::error::Error) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::BsonDeserialization(_))
}

fn decode_error(collection: &str, err: &mongodb::error::Error) -> RepoError {
    RepoError::InvalidData(format!("{collection} document could not be decoded: {err}"))
}

fn missing_id(collection: &str) -> RepoError {
    RepoError::InvalidData(format!("{collection} document has no ObjectId `_id`"))
}

fn log_outcome<T>(event: &str, collection: &str, started_at: Instant, result: &RepoResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => debug!(
            "event={event} module=repo status=ok collection={collection} duration_ms={duration_ms}"
        ),
        Err(err) if err.is_caller_error() => warn!(
            "event={event} module=repo status=error collection={collection} duration_ms={duration_ms} error_code={}",
            err.code()
        ),
        Err(err) => error!(
            "event={event} module=repo status=error collection={collection} duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
    }
}
