use crate::{error::AppError, models::ImageRecord};
use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// Serves a stored image's raw bytes with its stored content type.
///
/// Public endpoint so listing cards can embed the URL directly.
///
/// ## Responses:
/// - `200 OK`: The image payload, `Content-Type` as uploaded.
/// - `404 Not Found`: If no image exists under the given id.
/// - `500 Internal Server Error`: For database errors.
#[get("/{id}")]
pub async fn get_image(
    pool: web::Data<PgPool>,
    image_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let image = sqlx::query_as::<_, ImageRecord>(
        "SELECT id, name, content_type, image_data, created_at FROM images WHERE id = $1",
    )
    .bind(image_id.into_inner())
    .fetch_optional(&**pool)
    .await?;

    match image {
        Some(image) => Ok(HttpResponse::Ok()
            .content_type(image.content_type.as_str())
            .body(image.image_data)),
        None => Err(AppError::NotFound("Image not found".into())),
    }
}
