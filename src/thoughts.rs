//! # Thoughts
//!
//! Logic behind thought records.
//!
//! ## Schema
//! - Single `thoughts` collection
//! - Fields: message (**string**), hearts (**int**), createdAt (**datetime**)
//! - `_id` is assigned by MongoDB on insert and never changes
//!
//! ## Validation
//! - The message is trimmed first, then length-checked against [5, 140]
//! - Validation is an explicit function returning either the trimmed text or
//!   field-level errors, and it runs before any persistence request is built
//! - Clients cannot set `hearts`, `createdAt`, or `_id`; the input struct only
//!   carries `message` and everything else in the body is dropped during
//!   deserialization
//!
//! ## Likes
//! - One `findOneAndUpdate` round trip with `$inc` on `hearts`
//! - The increment is atomic at the store, so concurrent likes on the same
//!   record all land
//! - The post-update document is returned, never a stale pre-update read
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{doc, oid::ObjectId},
    options::ReturnDocument,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, FieldError};

pub const THOUGHT_ID: &str = "_id";
pub const THOUGHT_HEARTS: &str = "hearts";
pub const THOUGHT_CREATED_AT: &str = "createdAt";

pub const MESSAGE_MIN: usize = 5;
pub const MESSAGE_MAX: usize = 140;
pub const RECENT_LIMIT: i64 = 20;

/// Persisted shape of a thought.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Thought {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub message: String,
    pub hearts: i64,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,
}

impl Thought {
    pub fn new(message: String) -> Self {
        Self {
            id: None,
            message,
            hearts: 0,
            created_at: Utc::now(),
        }
    }
}

/// Request body for creating a thought. Any other fields a client sends are
/// dropped here, so counters and timestamps stay server-assigned.
#[derive(Deserialize)]
pub struct NewThought {
    pub message: String,
}

/// Wire shape of a thought. Kept separate from [`Thought`] so the JSON the
/// API emits cannot drift with the storage encoding: the id goes out as a
/// plain hex string and `createdAt` as RFC 3339.
#[derive(Serialize, Debug)]
pub struct ThoughtResponse {
    pub id: String,
    pub message: String,
    pub hearts: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Thought> for ThoughtResponse {
    fn from(thought: Thought) -> Self {
        Self {
            id: thought.id.map(|id| id.to_hex()).unwrap_or_default(),
            message: thought.message,
            hearts: thought.hearts,
            created_at: thought.created_at,
        }
    }
}

pub fn validate_message(message: &str) -> Result<String, Vec<FieldError>> {
    let trimmed = message.trim();
    let length = trimmed.chars().count();

    if length < MESSAGE_MIN {
        return Err(vec![FieldError {
            field: "message",
            message: format!("Message must be at least {MESSAGE_MIN} characters, got {length}"),
        }]);
    }

    if length > MESSAGE_MAX {
        return Err(vec![FieldError {
            field: "message",
            message: format!("Message must be at most {MESSAGE_MAX} characters, got {length}"),
        }]);
    }

    Ok(trimmed.to_string())
}

/// The thought record service. Owns the collection handle it is constructed
/// with; no ambient globals.
#[derive(Clone)]
pub struct Thoughts {
    collection: Collection<Thought>,
}

impl Thoughts {
    pub fn new(collection: Collection<Thought>) -> Self {
        Self { collection }
    }

    /// All thoughts, newest first, capped at [`RECENT_LIMIT`].
    pub async fn list_recent(&self) -> Result<Vec<Thought>, AppError> {
        self.collection
            .find(doc! {})
            .sort(doc! { THOUGHT_CREATED_AT: -1 })
            .limit(RECENT_LIMIT)
            .await
            .map_err(AppError::Retrieval)?
            .try_collect()
            .await
            .map_err(AppError::Retrieval)
    }

    /// Validates, then persists a fresh record with zero hearts and a
    /// server-side timestamp. Returns the record with its assigned id.
    pub async fn create(&self, message: &str) -> Result<Thought, AppError> {
        let message = validate_message(message).map_err(AppError::Validation)?;

        let mut thought = Thought::new(message);
        let inserted = self
            .collection
            .insert_one(&thought)
            .await
            .map_err(AppError::Persistence)?;
        thought.id = inserted.inserted_id.as_object_id();

        Ok(thought)
    }

    /// Atomically bumps `hearts` by 1 and returns the updated record. An id
    /// that does not parse as an ObjectId cannot name an existing record, so
    /// it maps to not-found rather than a store round trip.
    pub async fn like(&self, thought_id: &str) -> Result<Thought, AppError> {
        let id = ObjectId::parse_str(thought_id)
            .map_err(|_| AppError::NotFound(thought_id.to_string()))?;

        self.collection
            .find_one_and_update(doc! { THOUGHT_ID: id }, doc! { "$inc": { THOUGHT_HEARTS: 1 } })
            .return_document(ReturnDocument::After)
            .await
            .map_err(AppError::Persistence)?
            .ok_or_else(|| AppError::NotFound(thought_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{self, Bson};

    use super::*;

    #[test]
    fn test_message_bounds() {
        assert!(validate_message("1234").is_err());
        assert!(validate_message("12345").is_ok());
        assert!(validate_message(&"a".repeat(140)).is_ok());
        assert!(validate_message(&"a".repeat(141)).is_err());
    }

    #[test]
    fn test_trim_before_validation() {
        // 5 non-space characters padded with whitespace is still valid
        assert_eq!(validate_message("  hello  ").unwrap(), "hello");

        // 4 non-space characters padded to length 8 is still too short
        assert!(validate_message("  hiya  ").is_err());
        assert!(validate_message("        ").is_err());
    }

    #[test]
    fn test_validation_errors_name_the_field() {
        let errors = validate_message("hi").unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "message");
        assert!(errors[0].message.contains("at least 5"));

        let errors = validate_message(&"a".repeat(200)).unwrap_err();
        assert!(errors[0].message.contains("at most 140"));
    }

    #[test]
    fn test_new_thought_defaults() {
        let thought = Thought::new("Hello world".to_string());

        assert_eq!(thought.hearts, 0);
        assert!(thought.id.is_none());
        assert_eq!(thought.message, "Hello world");
    }

    #[test]
    fn test_insert_payload_shape() {
        let doc = bson::to_document(&Thought::new("Hello world".to_string())).unwrap();

        // the store assigns _id, so the insert payload must not carry one
        assert!(!doc.contains_key(THOUGHT_ID));
        assert_eq!(doc.get(THOUGHT_HEARTS), Some(&Bson::Int64(0)));
        assert!(matches!(
            doc.get(THOUGHT_CREATED_AT),
            Some(Bson::DateTime(_))
        ));
    }

    #[test]
    fn test_response_uses_hex_id() {
        let oid = ObjectId::new();
        let mut thought = Thought::new("Hello world".to_string());
        thought.id = Some(oid);

        let response = ThoughtResponse::from(thought);
        assert_eq!(response.id, oid.to_hex());

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["id"].is_string());
        assert_eq!(value["hearts"], 0);
        assert_eq!(value["message"], "Hello world");
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_new_thought_body_drops_extra_fields() {
        let body: NewThought = serde_json::from_str(
            r#"{"message": "Hello world", "hearts": 9000, "createdAt": "1970-01-01"}"#,
        )
        .unwrap();

        assert_eq!(body.message, "Hello world");
    }
}
