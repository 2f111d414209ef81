//! Startup probe for the listings data layer.
//!
//! # Responsibility
//! - Load configuration, start logging and connect the repository the way
//!   the service does at boot.
//! - Print collection counts as a quick sanity check.
//!
//! # Invariants
//! - A failed connection exits the process with status 1; there is no
//!   degraded mode without a database.

use listings_core::{
    core_version, init_logging, ListingRepository, LogTarget, MongoRepository, StoreConfig,
};
use log::error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("listings_cli: {err}");
            return ExitCode::from(2);
        }
    };

    let target = LogTarget::from_dir(config.log_dir.as_deref());
    if let Err(err) = init_logging(&config.log_level, target) {
        eprintln!("listings_cli: {err}");
        return ExitCode::from(2);
    }

    let repo = match MongoRepository::connect(&config.mongo_uri).await {
        Ok(repo) => repo,
        Err(err) => {
            error!("event=startup module=cli status=error error_code=db_connect_failed error={err}");
            eprintln!("listings_cli: cannot connect to MongoDB: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("listings_core version={}", core_version());
    println!("database={}", repo.database_name());

    match probe_counts(&repo).await {
        Ok((owners, listings)) => {
            println!("owners={owners}");
            println!("listings={listings}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("listings_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn probe_counts<R: ListingRepository>(repo: &R) -> listings_core::RepoResult<(usize, usize)> {
    let owners = repo.get_owners().await?.len();
    let listings = repo.get_listings().await?.len();
    Ok((owners, listings))
}
