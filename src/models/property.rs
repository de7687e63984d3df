use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating or updating a property listing.
/// Contains validation rules for its fields, checked at the submission boundary.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PropertyInput {
    /// The listing title.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// The city the property is located in.
    #[validate(length(min = 1, max = 100))]
    pub city: String,

    /// Monthly rent. Clients coerce text input to a number before submission.
    #[validate(range(min = 0))]
    pub rent: i64,

    /// The property type label (e.g. "1BHK", "2BHK", "Studio").
    /// Free-form text; the listing filter matches it by exact equality.
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub property_type: String,

    /// Description of the property.
    #[validate(length(max = 2000))]
    pub description: String,
}

/// Represents a property listing as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Property {
    /// Unique identifier for the listing (UUID v4).
    pub id: Uuid,
    /// The listing title.
    pub title: String,
    /// The city the property is located in.
    pub city: String,
    /// Monthly rent.
    pub rent: i64,
    /// The property type label.
    #[serde(rename = "type")]
    pub property_type: String,
    /// Description of the property.
    pub description: String,
    /// Email of the owner who created the listing. Set from the authenticated
    /// caller, never from the request body.
    pub email: String,
    /// Reference to the uploaded image, if one was attached at creation.
    pub image_id: Option<Uuid>,
    /// Timestamp of when the listing was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the listing.
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Creates a new `Property` from `PropertyInput`, the owner's email, and an
    /// optional stored-image reference.
    /// Sets `created_at` and `updated_at` to the current time and `id` to a new UUID.
    pub fn new(input: PropertyInput, email: String, image_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            city: input.city,
            rent: input.rent,
            property_type: input.property_type,
            description: input.description,
            email,
            image_id,
            created_at: now,
            updated_at: now,
        }
    }
}
