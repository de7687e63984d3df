use std::fmt;

use crate::models::{Property, PropertyInput};

/// Form state for the add/edit property dialogs.
///
/// An immutable value object: every field update is a pure function returning
/// a new value, and nothing is validated until the submission boundary. All
/// fields hold the raw text the user typed; `submit` coerces rent to a number
/// and produces the wire payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyForm {
    pub title: String,
    pub city: String,
    pub rent: String,
    pub property_type: String,
    pub description: String,
}

/// Rejections from the submission boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The rent field is empty or not a whole number.
    InvalidRent,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormError::InvalidRent => write!(f, "Rent must be a number"),
        }
    }
}

impl PropertyForm {
    /// Blank defaults for the add dialog.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Pre-populated from an existing listing for the edit dialog.
    pub fn from_property(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            city: property.city.clone(),
            rent: property.rent.to_string(),
            property_type: property.property_type.clone(),
            description: property.description.clone(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_rent(mut self, rent: impl Into<String>) -> Self {
        self.rent = rent.into();
        self
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = property_type.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validates the form and produces the wire payload.
    ///
    /// Text fields are trimmed; rent must parse as a whole number. Everything
    /// else (presence, lengths) is the server's call.
    pub fn submit(&self) -> Result<PropertyInput, FormError> {
        let rent = self
            .rent
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::InvalidRent)?;

        Ok(PropertyInput {
            title: self.title.trim().to_string(),
            city: self.city.trim().to_string(),
            rent,
            property_type: self.property_type.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}
