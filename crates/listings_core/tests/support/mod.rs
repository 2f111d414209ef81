//! Repository contract checks shared by the in-memory and MongoDB suites.

#![allow(dead_code)]

use chrono::Utc;
use listings_core::{
    ListingRepository, ListingStatus, NewListing, NewOwner, RecordId, RepoError,
};
use std::collections::HashSet;

pub fn jane() -> NewOwner {
    NewOwner {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "555-0100".to_string(),
    }
}

pub fn apartment(owner_id: &str) -> NewListing {
    NewListing {
        owner_id: owner_id.to_string(),
        description: "2BR apartment".to_string(),
        location: "Downtown".to_string(),
    }
}

fn is_lower_hex_id(value: &str) -> bool {
    value.len() == 24 && value.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

pub async fn create_owner_echoes_input_and_get_round_trips<R: ListingRepository>(repo: &R) {
    let created = repo.create_owner(&jane()).await.unwrap();
    assert!(is_lower_hex_id(&created.id), "unexpected id {}", created.id);
    assert_eq!(created.name, "Jane Doe");
    assert_eq!(created.email, "jane@example.com");
    assert_eq!(created.phone, "555-0100");

    let loaded = repo.get_owner(&created.id).await.unwrap();
    assert_eq!(loaded, created);
}

pub async fn owner_ids_are_unique<R: ListingRepository>(repo: &R) {
    let mut ids = HashSet::new();
    for _ in 0..5 {
        let owner = repo.create_owner(&jane()).await.unwrap();
        assert!(ids.insert(owner.id));
    }
}

pub async fn empty_collections_scan_to_empty<R: ListingRepository>(repo: &R) {
    assert!(repo.get_owners().await.unwrap().is_empty());
    assert!(repo.get_listings().await.unwrap().is_empty());
}

pub async fn get_owners_returns_every_inserted_owner<R: ListingRepository>(repo: &R) {
    let inputs = [
        jane(),
        NewOwner {
            name: "John Roe".to_string(),
            email: "john@example.com".to_string(),
            phone: "555-0101".to_string(),
        },
        NewOwner {
            name: "Ana Lima".to_string(),
            email: "ana@example.com".to_string(),
            phone: "555-0102".to_string(),
        },
    ];

    let mut created = Vec::new();
    for input in &inputs {
        created.push(repo.create_owner(input).await.unwrap());
    }

    let scanned = repo.get_owners().await.unwrap();
    assert_eq!(scanned.len(), inputs.len());
    for owner in &created {
        assert!(scanned.contains(owner), "missing owner {}", owner.id);
    }
}

pub async fn create_listing_starts_not_started_and_reads_back<R: ListingRepository>(repo: &R) {
    let owner = repo.create_owner(&jane()).await.unwrap();
    let before = Utc::now();
    let created = repo.create_listing(&apartment(&owner.id)).await.unwrap();
    let after = Utc::now();

    assert!(is_lower_hex_id(&created.id));
    assert_eq!(created.owner_id, owner.id);
    assert_eq!(created.description, "2BR apartment");
    assert_eq!(created.location, "Downtown");
    assert_eq!(created.status, ListingStatus::NotStarted);
    // Stored timestamps keep millisecond precision.
    assert!(created.created_at.timestamp_millis() >= before.timestamp_millis());
    assert!(created.created_at.timestamp_millis() <= after.timestamp_millis());

    let loaded = repo.get_listing(&created.id).await.unwrap();
    assert_eq!(loaded, created);

    let scanned = repo.get_listings().await.unwrap();
    assert_eq!(scanned, vec![created]);
}

pub async fn invalid_ids_fail_fast<R: ListingRepository>(repo: &R) {
    repo.create_owner(&jane()).await.unwrap();

    let err = repo.get_owner("not-a-valid-id").await.unwrap_err();
    assert!(matches!(err, RepoError::InvalidId(ref inner) if inner.value() == "not-a-valid-id"));

    let err = repo.get_listing("").await.unwrap_err();
    assert!(matches!(err, RepoError::InvalidId(_)));
}

pub async fn unknown_ids_are_not_found<R: ListingRepository>(repo: &R) {
    let missing = RecordId::new().to_hex();

    let err = repo.get_listing(&missing).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        RepoError::NotFound { collection: "listing", ref id } if *id == missing
    ));

    let err = repo.get_owner(&missing).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { collection: "owner", .. }));
}
