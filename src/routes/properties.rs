use crate::{
    auth::caller_email,
    error::AppError,
    models::{Property, PropertyInput},
    upload::{discard_image, parse_property_form, store_image},
};
use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const PROPERTY_COLUMNS: &str =
    "id, title, city, rent, property_type, description, email, image_id, created_at, updated_at";

/// Retrieves all property listings.
///
/// Public endpoint: no token required, no pagination. Listings come back in
/// insertion order.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Property` objects.
/// - `500 Internal Server Error`: For database errors.
#[get("")]
pub async fn list_properties(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let properties = sqlx::query_as::<_, Property>(&format!(
        "SELECT {} FROM properties ORDER BY created_at",
        PROPERTY_COLUMNS
    ))
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(properties))
}

/// Creates a new property listing for the authenticated caller.
///
/// Expects a `multipart/form-data` payload with the fields `title`, `city`,
/// `rent`, `type`, `description`, and an optional `image` file. When an image
/// is attached it passes the upload validator and is stored first; the
/// resulting id is referenced by the new listing. The owner email is always
/// the authenticated caller's, never a form value.
///
/// If the property insert fails after the image was stored, the orphaned image
/// row is removed again before the error is surfaced.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Property` object as JSON.
/// - `400 Bad Request`: Invalid fields, missing/oversized/wrong-type image.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For database errors or a failed image write.
#[post("/add")]
pub async fn add_property(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let email = caller_email(&req)?;

    let form = parse_property_form(payload).await?;
    form.input.validate()?;

    let stored_image = match form.image {
        Some(file) => Some(store_image(&pool, file).await?),
        None => None,
    };

    let property = Property::new(form.input, email, stored_image.as_ref().map(|img| img.id));

    let result = sqlx::query_as::<_, Property>(&format!(
        "INSERT INTO properties (id, title, city, rent, property_type, description, email, image_id, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING {}",
        PROPERTY_COLUMNS
    ))
    .bind(property.id)
    .bind(&property.title)
    .bind(&property.city)
    .bind(property.rent)
    .bind(&property.property_type)
    .bind(&property.description)
    .bind(&property.email)
    .bind(property.image_id)
    .bind(property.created_at)
    .bind(property.updated_at)
    .fetch_one(&**pool)
    .await;

    match result {
        Ok(created) => Ok(HttpResponse::Created().json(created)),
        Err(e) => {
            // The image and property writes are not atomic; drop the image row
            // again so a failed insert leaves no orphan behind.
            if let Some(img) = stored_image {
                discard_image(&pool, img.id).await;
            }
            Err(e.into())
        }
    }
}

/// Updates an existing property listing.
///
/// Expects a JSON `PropertyInput` body and the listing's UUID in the path.
/// Only the owner may update a listing: the record's email must match the
/// authenticated caller. A foreign or unknown id yields 404 either way, so the
/// endpoint does not reveal which listings exist.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Property` object as JSON.
/// - `400 Bad Request`: If input validation fails.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: Unknown id, or the caller does not own the listing.
/// - `500 Internal Server Error`: For database errors.
#[post("/edit/{id}")]
pub async fn edit_property(
    pool: web::Data<PgPool>,
    property_id: web::Path<Uuid>,
    property_data: web::Json<PropertyInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    property_data.validate()?;
    let email = caller_email(&req)?;
    let id = property_id.into_inner();

    let updated = sqlx::query_as::<_, Property>(&format!(
        "UPDATE properties
         SET title = $1, city = $2, rent = $3, property_type = $4, description = $5, updated_at = $6
         WHERE id = $7 AND email = $8
         RETURNING {}",
        PROPERTY_COLUMNS
    ))
    .bind(&property_data.title)
    .bind(&property_data.city)
    .bind(property_data.rent)
    .bind(&property_data.property_type)
    .bind(&property_data.description)
    .bind(chrono::Utc::now())
    .bind(id)
    .bind(&email)
    .fetch_optional(&**pool)
    .await?;

    match updated {
        Some(property) => Ok(HttpResponse::Ok().json(property)),
        None => Err(AppError::NotFound(
            "Property not found or not owned by caller".into(),
        )),
    }
}

/// Deletes a property listing by its ID.
///
/// Only the owner may delete a listing; the same uniform 404 applies to
/// unknown and foreign ids. The referenced image row, if any, is left in
/// place: images are shared references, not owned by the listing.
///
/// ## Responses:
/// - `200 OK`: `{ "status": "deleted" }` on success.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: Unknown id, or the caller does not own the listing.
/// - `500 Internal Server Error`: For database errors.
#[post("/delete/{id}")]
pub async fn delete_property(
    pool: web::Data<PgPool>,
    property_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let email = caller_email(&req)?;
    let id = property_id.into_inner();

    let result = sqlx::query("DELETE FROM properties WHERE id = $1 AND email = $2")
        .bind(id)
        .bind(&email)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "Property not found or not owned by caller".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(json!({ "status": "deleted" })))
}
