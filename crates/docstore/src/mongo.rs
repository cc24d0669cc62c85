//! MongoDB backend: every Mongo collection of one database is a collection.
//!
//! Stored values are handed out as plain JSON: object ids become their hex
//! string and dates their RFC 3339 text, the way the labeling tools wrote
//! and read them.

use async_trait::async_trait;
use mongodb::bson;
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{is_valid_collection_name, Document, DocumentStore, Result, StoreError};

const APP_NAME: &str = "labeling-dashboard";

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Parses the connection string and builds the client. The driver
    /// connects lazily, so an unreachable server surfaces on the first call.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        options.app_name.get_or_insert_with(|| APP_NAME.to_string());

        let client = Client::with_options(options).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self::from_database(client.database(database)))
    }

    pub fn from_database(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list_collections(&self) -> Result<Vec<String>> {
        let mut names = self
            .db
            .list_collection_names(None)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        names.sort();
        Ok(names)
    }

    async fn fetch_collection(&self, name: &str) -> Result<Vec<Document>> {
        if !is_valid_collection_name(name) {
            debug!(collection = name, "not a collection name");
            return Ok(Vec::new());
        }

        let collection = self.db.collection::<bson::Document>(name);
        let mut cursor = collection.find(None, None).await.map_err(|e| store_error(name, e))?;

        let mut docs = Vec::new();
        while cursor.advance().await.map_err(|e| store_error(name, e))? {
            let raw = cursor.deserialize_current().map_err(|e| store_error(name, e))?;
            docs.push(from_bson(raw));
        }
        debug!(collection = name, count = docs.len(), "fetched collection");
        Ok(docs)
    }
}

/// Lost connections are `Unavailable`; anything else failed the query itself.
fn store_error(collection: &str, err: MongoError) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Authentication { .. } => StoreError::Unavailable(err.to_string()),
        _ => StoreError::Query {
            collection: collection.to_string(),
            message: err.to_string(),
        },
    }
}

fn from_bson(raw: bson::Document) -> Document {
    let fields: Map<String, Value> = raw
        .into_iter()
        .map(|(key, value)| (key, plain_json(value.into_relaxed_extjson())))
        .collect();
    Document::from_fields(fields)
}

fn plain_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::String(s)) = map.get("$oid").or_else(|| map.get("$date")) {
                    return Value::String(s.clone());
                }
            }
            Value::Object(map.into_iter().map(|(k, v)| (k, plain_json(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(plain_json).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;
    use mongodb::bson::{doc, oid::ObjectId, DateTime};
    use serde_json::json;

    #[test]
    fn test_bson_becomes_plain_json() {
        let id = ObjectId::parse_str("66a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let doc = from_bson(doc! {
            "_id": id,
            "score": 72_i32,
            "weight": 0.5,
            "didBy": "alice",
            "created_at": DateTime::from_millis(1_719_828_000_000),
            "labels": [{ "ref": id }],
        });

        assert_eq!(doc.get("_id"), Some(&json!("66a1f0c2e4b0a1b2c3d4e5f6")));
        assert_eq!(doc.get("labels"), Some(&json!([{"ref": "66a1f0c2e4b0a1b2c3d4e5f6"}])));
        assert_eq!(doc.score(), Some(72.0));
        assert_eq!(doc.get("score"), Some(&json!(72)));
        assert_eq!(doc.did_by(), Some("alice"));
        assert!(matches!(
            doc.created_at(),
            Some(Timestamp::Text(t)) if t.starts_with("2024-07-01T10:00:00")
        ));
    }

    #[test]
    fn test_dates_out_of_text_range_stay_millis() {
        let doc = from_bson(doc! { "created_at": DateTime::from_millis(i64::MAX) });
        assert_eq!(doc.created_at(), Some(&Timestamp::EpochMillis(i64::MAX)));
    }

    #[tokio::test]
    async fn test_bad_uri_is_unavailable() {
        let result = MongoStore::connect("not-a-connection-string", "labels").await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        let store = MongoStore::connect(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200",
            "labels",
        )
        .await
        .unwrap();

        assert!(matches!(store.list_collections().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.fetch_collection("july-01-resumes").await, Err(StoreError::Unavailable(_))));
        assert!(store.fetch_collection("a/b").await.unwrap().is_empty());
    }
}
