//! A hypermedia API server for a questions-and-choices polling domain.
//!
//! Every resource representation carries its own `url` plus links to its
//! related resources; clients traverse the whole API from the root
//! resource at `/`.

#[macro_use]
extern crate log;

#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod resource;

use rocket::{Build, Rocket};

use crate::config::DatabaseFairing;
use crate::logging::LoggerFairing;

/// Construct the server, ready to ignite.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .register("/", api::catchers())
        .attach(DatabaseFairing)
        .attach(LoggerFairing)
}

/// Get a client for the test database deployment.
#[cfg(test)]
pub(crate) async fn db_client() -> mongodb::Client {
    let db_uri = std::env::var("TEST_DB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    mongodb::Client::with_uri_str(&db_uri)
        .await
        .expect("Could not connect to the test database")
}

/// Pick a fresh test database name.
#[cfg(test)]
pub(crate) fn database() -> String {
    config::database_name()
}

/// Construct the server against an existing connection, bypassing the
/// database fairing.
#[cfg(test)]
pub(crate) async fn rocket_for_db(client: mongodb::Client, db_name: &str) -> Rocket<Build> {
    let db = client.database(db_name);
    model::mongodb::ensure_indexes_exist(&db)
        .await
        .expect("Could not create indexes");
    model::mongodb::ensure_counters_exist(&db)
        .await
        .expect("Could not seed counters");
    rocket::build()
        .mount("/", api::routes())
        .register("/", api::catchers())
        .manage(client)
        .manage(db)
}
