//! MongoDB backend for tower-sessions.
//!
//! Each session is one document in `sessions`. `expires_at` is a BSON date so
//! the TTL index from `db_init` can drop stale sessions; loads also ignore
//! anything already past its expiry.

use async_trait::async_trait;
use mongodb::{
    bson::{doc, DateTime},
    options::ReplaceOptions,
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use tower_sessions::{
    session::{Id, Record},
    session_store::{self, SessionStore},
};

pub const SESSIONS: &str = "sessions";

#[derive(Debug, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(rename = "_id")]
    id: String,
    // JSON text so the cart keeps its line order
    data: String,
    expires_at: DateTime,
}

#[derive(Debug, Clone)]
pub struct MongoSessionStore {
    db: Database,
}

impl MongoSessionStore {
    pub fn new(db: Database) -> Self {
        MongoSessionStore { db }
    }

    fn collection(&self) -> Collection<SessionDocument> {
        self.db.collection::<SessionDocument>(SESSIONS)
    }

    async fn exists(&self, id: &Id) -> session_store::Result<bool> {
        let found = self
            .collection()
            .find_one(doc! { "_id": id.to_string() }, None)
            .await
            .map_err(backend)?;
        Ok(found.is_some())
    }
}

fn backend(e: mongodb::error::Error) -> session_store::Error {
    session_store::Error::Backend(e.to_string())
}

fn expires_at(record: &Record) -> DateTime {
    let millis = record.expiry_date.unix_timestamp_nanos() / 1_000_000;
    DateTime::from_millis(i64::try_from(millis).unwrap_or(i64::MAX))
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.exists(&record.id).await? {
            record.id = Id::default();
        }
        self.save(record).await
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let document = SessionDocument {
            id: record.id.to_string(),
            data: serde_json::to_string(record)
                .map_err(|e| session_store::Error::Encode(e.to_string()))?,
            expires_at: expires_at(record),
        };

        self.collection()
            .replace_one(
                doc! { "_id": document.id.as_str() },
                &document,
                ReplaceOptions::builder().upsert(true).build(),
            )
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        let found = self
            .collection()
            .find_one(
                doc! { "_id": id.to_string(), "expires_at": { "$gt": DateTime::now() } },
                None,
            )
            .await
            .map_err(backend)?;

        let Some(document) = found else {
            return Ok(None);
        };
        let record = serde_json::from_str(&document.data)
            .map_err(|e| session_store::Error::Decode(e.to_string()))?;
        Ok(Some(record))
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.collection()
            .delete_one(doc! { "_id": id.to_string() }, None)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
