//! Read-only document store
//!
//! Collections are named lists of loosely shaped JSON documents. The
//! dashboard only ever reads them, so the store surface is two calls:
//! list the collection names and fetch one collection whole. Collections
//! live in memory, in a directory of JSON files or in a MongoDB database.

mod document;
mod file;
mod memory;
mod mongo;
mod store;

pub use document::{Document, Timestamp};
pub use file::FileBackedStore;
pub use memory::InMemoryStore;
pub use mongo::MongoStore;
pub use store::{is_valid_collection_name, DocumentStore};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error reading collection {collection}: {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Collection {collection} is corrupt: {message}")]
    Corrupt { collection: String, message: String },

    #[error("Query on collection {collection} failed: {message}")]
    Query { collection: String, message: String },

    #[error("Store task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
