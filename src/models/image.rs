use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An uploaded image as stored in the database.
///
/// Created once by the upload pipeline and never updated. Properties hold a
/// reference to it; nothing cascades when a property goes away.
#[derive(Debug, Clone, FromRow)]
pub struct ImageRecord {
    pub id: Uuid,
    /// Original filename supplied by the uploader.
    pub name: String,
    /// Declared MIME type, restricted by the upload validator.
    pub content_type: String,
    /// Raw payload, at most 5 MiB.
    pub image_data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// Metadata view of a stored image for JSON responses. Never carries the bytes;
/// the payload is served separately with its stored content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredImage {
    pub id: Uuid,
    pub name: String,
    pub content_type: String,
}

impl From<&ImageRecord> for StoredImage {
    fn from(record: &ImageRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            content_type: record.content_type.clone(),
        }
    }
}
