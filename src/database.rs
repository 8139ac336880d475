//! # MongoDB
//!
//! Document store.
//!
//! Core purpose is to persist thought records and serve the sorted recent-first
//! listing. Also, used for atomic heart increments.
//!
//! ## Requirements
//!
//! - Schema-flexible documents with server-assigned ids
//! - Sort by creation time, newest first, capped at 20 per listing
//! - Atomic `$inc` so concurrent likes on the same record never lose updates
//!
//! ## Implementation
//!
//! - One client opened at process start, shared for the process lifetime
//! - Single `thoughts` collection, database name taken from the connection string
//! - `createdAt` stored as a BSON datetime so the descending sort is a real
//!   time ordering rather than a string comparison
use mongodb::{Client, Collection};

use crate::thoughts::Thought;

pub const THOUGHTS_COLLECTION: &str = "thoughts";

const DEFAULT_DATABASE: &str = "project-happy";

pub async fn init_mongo(mongo_url: &str) -> Collection<Thought> {
    let client = Client::with_uri_str(mongo_url).await.unwrap();

    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

    database.collection(THOUGHTS_COLLECTION)
}
