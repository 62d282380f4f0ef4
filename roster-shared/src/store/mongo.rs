/// MongoDB-backed user store
///
/// Users live in the `users` collection as `{ _id: ObjectId, name, email }`.
/// The driver generates `_id` on insert and its hex form becomes the API id.

use super::{StoreError, StoreResult, UserStore};
use crate::db::mongo;
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// On-disk document shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    email: String,
}

impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        User {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: document.name,
            email: document.email,
        }
    }
}

#[derive(Clone)]
pub struct MongoUserStore {
    database: Database,
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Wraps the `users` collection of an already connected database
    pub fn new(database: Database) -> Self {
        let collection = database.collection::<UserDocument>(USERS_COLLECTION);
        Self {
            database,
            collection,
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    fn backend(&self) -> &'static str {
        "mongo"
    }

    async fn list(&self, limit: u32) -> StoreResult<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .limit(i64::from(limit))
            .await?;

        let documents: Vec<UserDocument> = cursor.try_collect().await?;
        debug!(count = documents.len(), "Listed users from MongoDB");

        Ok(documents.into_iter().map(User::from).collect())
    }

    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let document = UserDocument {
            id: None,
            name: user.name.clone(),
            email: user.email.clone(),
        };

        let result = self.collection.insert_one(&document).await?;

        let id = result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .ok_or_else(|| {
                StoreError::Query(format!(
                    "insert returned a non-ObjectId _id: {}",
                    result.inserted_id
                ))
            })?;

        debug!(user_id = %id, "Inserted user into MongoDB");
        Ok(user.into_user(id))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let document = self.collection.find_one(doc! { "email": email }).await?;
        Ok(document.map(User::from))
    }

    async fn delete_by_email(&self, email: &str) -> StoreResult<u64> {
        let result = self.collection.delete_many(doc! { "email": email }).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> StoreResult<()> {
        mongo::ping(&self.database).await?;
        Ok(())
    }
}
