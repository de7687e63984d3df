//!
//! # Upload Validation and Storage
//!
//! The gate every uploaded image passes before it reaches the database:
//! multipart parsing, file-presence and MIME-whitelist checks, and the 5 MiB
//! size ceiling. On success the image row is persisted and its identity handed
//! to the property handler. Validation failures are client errors; persistence
//! failures surface as `{ "error": "Image upload failed", "details": ... }`.
//! Single attempt, no retry.

use actix_multipart::Multipart;
use chrono::Utc;
use futures::StreamExt;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{ImageRecord, PropertyInput, StoredImage};

/// MIME types an upload may declare.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Size ceiling for an uploaded image: 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A single file attachment pulled out of a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as declared by the client.
    pub name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Raw payload.
    pub data: Vec<u8>,
}

/// The decoded property form: validated-shape text fields plus at most one
/// file attachment.
#[derive(Debug)]
pub struct PropertyFormData {
    pub input: PropertyInput,
    pub image: Option<UploadedFile>,
}

/// Checks an optional attachment against the upload rules.
///
/// Rejects when no file is attached, when the declared content type is not in
/// the whitelist, or when the payload exceeds [`MAX_IMAGE_BYTES`]. A payload of
/// exactly [`MAX_IMAGE_BYTES`] is accepted.
pub fn validate_upload(file: Option<&UploadedFile>) -> Result<&UploadedFile, AppError> {
    let file = file.ok_or_else(|| AppError::ValidationError("No file uploaded.".into()))?;

    if !ALLOWED_IMAGE_TYPES.contains(&file.content_type.as_str()) {
        return Err(AppError::ValidationError(
            "Invalid file type. Only images are allowed.".into(),
        ));
    }

    if file.data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::ValidationError(
            "File size exceeds 5MB limit.".into(),
        ));
    }

    Ok(file)
}

/// Validates the attachment and persists it as an `images` row.
///
/// Returns the stored image's metadata; the id is what property records
/// reference. Database failures are reported as [`AppError::UploadFailed`]
/// with the underlying cause.
pub async fn store_image(pool: &PgPool, file: UploadedFile) -> Result<StoredImage, AppError> {
    validate_upload(Some(&file))?;

    let record = ImageRecord {
        id: Uuid::new_v4(),
        name: file.name,
        content_type: file.content_type,
        image_data: file.data,
        created_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO images (id, name, content_type, image_data, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.content_type)
    .bind(&record.image_data)
    .bind(record.created_at)
    .execute(pool)
    .await
    .map_err(|e| AppError::UploadFailed(e.to_string()))?;

    Ok(StoredImage::from(&record))
}

/// Removes an image row that ended up orphaned because the follow-up property
/// insert failed. Best effort: a failed cleanup is logged, not surfaced, since
/// the caller is already reporting the original error.
pub async fn discard_image(pool: &PgPool, id: Uuid) {
    if let Err(e) = sqlx::query("DELETE FROM images WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
    {
        log::warn!("Failed to clean up orphaned image {}: {}", id, e);
    }
}

/// Decodes a `multipart/form-data` property submission.
///
/// Text fields: `title`, `city`, `rent`, `type`, `description`. The optional
/// `image` field is captured as an [`UploadedFile`]; an image part with no
/// filename and no bytes (an empty picker) counts as no attachment. Reading a
/// file part stops as soon as it crosses [`MAX_IMAGE_BYTES`].
pub async fn parse_property_form(mut payload: Multipart) -> Result<PropertyFormData, AppError> {
    let mut title = String::new();
    let mut city = String::new();
    let mut rent: Option<String> = None;
    let mut property_type = String::new();
    let mut description = String::new();
    let mut image: Option<UploadedFile> = None;

    while let Some(field) = payload.next().await {
        let mut field = field
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart payload: {}", e)))?;

        let field_name = field.name().to_string();
        match field_name.as_str() {
            "image" => {
                let filename = field
                    .content_disposition()
                    .get_filename()
                    .map(str::to_string);
                let content_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| {
                        AppError::BadRequest(format!("Malformed multipart payload: {}", e))
                    })?;
                    data.extend_from_slice(&chunk);
                    if data.len() > MAX_IMAGE_BYTES {
                        return Err(AppError::ValidationError(
                            "File size exceeds 5MB limit.".into(),
                        ));
                    }
                }

                // An empty picker submits a file field with no name and no bytes.
                if data.is_empty() && filename.as_deref().map_or(true, str::is_empty) {
                    continue;
                }

                image = Some(UploadedFile {
                    name: filename.unwrap_or_else(|| "upload".to_string()),
                    content_type,
                    data,
                });
            }
            "title" => title = read_text(&mut field).await?,
            "city" => city = read_text(&mut field).await?,
            "rent" => rent = Some(read_text(&mut field).await?),
            "type" => property_type = read_text(&mut field).await?,
            "description" => description = read_text(&mut field).await?,
            _ => {}
        }
    }

    let rent = rent
        .ok_or_else(|| AppError::BadRequest("rent is required".into()))?
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("rent must be a number".into()))?;

    Ok(PropertyFormData {
        input: PropertyInput {
            title,
            city,
            rent,
            property_type,
            description,
        },
        image,
    })
}

async fn read_text(field: &mut actix_multipart::Field) -> Result<String, AppError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart payload: {}", e)))?;
        buf.extend_from_slice(&chunk);
    }
    String::from_utf8(buf).map_err(|_| AppError::BadRequest("Form fields must be UTF-8".into()))
}
