//! Client bootstrap for MongoDB.
//!
//! # Invariants
//! - Returned clients answered a `ping` on `listings-db`.
//! - The connection URI is never written to logs; it may carry credentials.

use super::{with_deadline, DbResult, OPERATION_TIMEOUT};
use log::{error, info};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::time::Instant;

const APP_NAME: &str = "listings";

/// Opens a client for `uri` and verifies liveness against `database`.
///
/// # Side effects
/// - Emits `db_connect` logging events with duration and status.
///
/// # Errors
/// - URI parse, authentication, ping failures and timeouts are all returned
///   as `DbError`. Callers treat them as unrecoverable at startup.
pub async fn connect(uri: &str, database: &str) -> DbResult<Client> {
    let started_at = Instant::now();
    info!("event=db_connect module=db status=start database={database}");

    match with_deadline("db_connect", bootstrap_client(uri, database)).await {
        Ok(client) => {
            info!(
                "event=db_connect module=db status=ok database={} duration_ms={}",
                database,
                started_at.elapsed().as_millis()
            );
            Ok(client)
        }
        Err(err) => {
            error!(
                "event=db_connect module=db status=error database={} duration_ms={} error_code=db_connect_failed error={}",
                database,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

async fn bootstrap_client(uri: &str, database: &str) -> DbResult<Client> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name.get_or_insert_with(|| APP_NAME.to_string());
    options.connect_timeout = Some(OPERATION_TIMEOUT);
    options.server_selection_timeout = Some(OPERATION_TIMEOUT);

    let client = Client::with_options(options)?;
    client
        .database(database)
        .run_command(doc! { "ping": 1 }, None)
        .await?;
    Ok(client)
}
