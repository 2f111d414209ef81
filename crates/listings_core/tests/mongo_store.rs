//! Live MongoDB checks.
//!
//! Skipped unless `LISTINGS_TEST_MONGOURI` points at a reachable server. Each
//! test uses its own throwaway database.

mod support;

use listings_core::db::{DbError, DATABASE_NAME};
use listings_core::MongoRepository;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::Client;

const TEST_URI_VAR: &str = "LISTINGS_TEST_MONGOURI";

fn test_uri() -> Option<String> {
    std::env::var(TEST_URI_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

struct TestDatabase {
    client: Client,
    name: String,
    repo: MongoRepository,
}

impl TestDatabase {
    async fn open(uri: &str) -> Self {
        let name = format!("listings-test-{}", ObjectId::new().to_hex());
        let repo = MongoRepository::connect_with_database(uri, &name)
            .await
            .unwrap();
        let client = Client::with_uri_str(uri).await.unwrap();
        Self { client, name, repo }
    }

    async fn cleanup(self) {
        self.client.database(&self.name).drop(None).await.unwrap();
    }
}

macro_rules! live_contract_test {
    ($name:ident) => {
        #[tokio::test]
        async fn $name() {
            let Some(uri) = test_uri() else {
                eprintln!("skipping: {TEST_URI_VAR} is not set");
                return;
            };
            let db = TestDatabase::open(&uri).await;
            support::$name(&db.repo).await;
            db.cleanup().await;
        }
    };
}

live_contract_test!(create_owner_echoes_input_and_get_round_trips);
live_contract_test!(owner_ids_are_unique);
live_contract_test!(empty_collections_scan_to_empty);
live_contract_test!(get_owners_returns_every_inserted_owner);
live_contract_test!(create_listing_starts_not_started_and_reads_back);
live_contract_test!(invalid_ids_fail_fast);
live_contract_test!(unknown_ids_are_not_found);

#[tokio::test]
async fn connect_uses_listings_db_by_default() {
    let Some(uri) = test_uri() else {
        eprintln!("skipping: {TEST_URI_VAR} is not set");
        return;
    };
    let repo = MongoRepository::connect(&uri).await.unwrap();
    assert_eq!(repo.database_name(), DATABASE_NAME);
}

#[tokio::test]
async fn malformed_document_fails_scan_with_invalid_data() {
    let Some(uri) = test_uri() else {
        eprintln!("skipping: {TEST_URI_VAR} is not set");
        return;
    };
    let db = TestDatabase::open(&uri).await;
    db.client
        .database(&db.name)
        .collection::<Document>("owner")
        .insert_one(doc! { "name": 42, "email": "e", "phone": "p" }, None)
        .await
        .unwrap();

    let err = listings_core::ListingRepository::get_owners(&db.repo)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "invalid_data");
    db.cleanup().await;
}

#[tokio::test]
async fn connect_rejects_malformed_uri() {
    let err = MongoRepository::connect("not-a-mongodb-uri")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Mongo(_)));
}
