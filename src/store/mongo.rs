use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, Bson, Document as BsonDocument, doc};
use mongodb::{Client, Database};
use serde_json::Value as JsonValue;

use super::{Collection, Document, DocumentId, DocumentStore, ID_FIELD, StoredDocument, StoredId};
use crate::config::Config;

/// MongoDB-backed document store
///
/// Holds one driver client and a handle per collection, opened once at
/// startup. The driver owns connection pooling.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
    workers: mongodb::Collection<BsonDocument>,
    projects: mongodb::Collection<BsonDocument>,
    equipment: mongodb::Collection<BsonDocument>,
}

impl MongoStore {
    /// Connect to MongoDB using the provided config
    ///
    /// The driver connects lazily, so a ping is issued here to surface a bad
    /// connection string or unreachable server at startup.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let uri = config
            .mongodb_uri
            .as_deref()
            .context("MONGODB_URI is required for the mongodb store backend")?;

        let client = Client::with_uri_str(uri)
            .await
            .context("Failed to create MongoDB client")?;
        let database = client.database(&config.mongodb_database);

        let store = Self::with_database(database);
        store
            .ping()
            .await
            .context("MongoDB did not answer the startup ping")?;

        tracing::info!(
            "Successfully connected to MongoDB database: {}",
            config.mongodb_database
        );
        Ok(store)
    }

    fn with_database(database: Database) -> Self {
        Self {
            workers: database.collection(Collection::Workers.name()),
            projects: database.collection(Collection::Projects.name()),
            equipment: database.collection(Collection::Equipment.name()),
            database,
        }
    }

    fn collection(&self, collection: Collection) -> &mongodb::Collection<BsonDocument> {
        match collection {
            Collection::Workers => &self.workers,
            Collection::Projects => &self.projects,
            Collection::Equipment => &self.equipment,
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>> {
        let cursor = self
            .collection(collection)
            .find(doc! {})
            .await
            .with_context(|| format!("Failed to query collection {}", collection.name()))?;

        let documents: Vec<BsonDocument> = cursor
            .try_collect()
            .await
            .with_context(|| format!("Failed to read collection {}", collection.name()))?;

        tracing::debug!(
            "Read {} documents from {}",
            documents.len(),
            collection.name()
        );
        Ok(documents.into_iter().map(from_bson).collect())
    }

    async fn insert_one(&self, collection: Collection, document: Document) -> Result<StoredId> {
        let document = bson::to_document(&document).context("Failed to convert JSON to BSON")?;

        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .with_context(|| format!("Failed to insert into {}", collection.name()))?;

        tracing::debug!(
            "Inserted document into {} with _id {}",
            collection.name(),
            result.inserted_id
        );
        Ok(stored_id(result.inserted_id))
    }

    async fn delete_one(&self, collection: Collection, id: &DocumentId) -> Result<u64> {
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": id.object_id() })
            .await
            .with_context(|| format!("Failed to delete from {}", collection.name()))?;

        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to execute ping command")?;

        tracing::debug!("MongoDB ping succeeded");
        Ok(())
    }
}

fn stored_id(id: Bson) -> StoredId {
    match id {
        Bson::ObjectId(oid) => StoredId::Generated(oid.into()),
        other => StoredId::Supplied(other.into_relaxed_extjson()),
    }
}

/// Split a BSON document into its identifier and relaxed extended JSON fields
fn from_bson(mut document: BsonDocument) -> StoredDocument {
    let id = stored_id(document.remove(ID_FIELD).unwrap_or(Bson::Null));

    let fields = match Bson::Document(document).into_relaxed_extjson() {
        JsonValue::Object(map) => map,
        _ => Document::new(),
    };

    StoredDocument { id, fields }
}
