use crate::models::Property;

/// Filter configuration for the listing view.
///
/// An explicit immutable value: callers build one and pass it into rendering.
/// The four predicates are independent and combine with AND; an unset (or
/// blank) field matches everything. The visible set is recomputed from the
/// full fetched list on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilters {
    /// Case-insensitive substring match on the city.
    pub city: Option<String>,
    /// Exact match on the property type label.
    pub property_type: Option<String>,
    /// Inclusive lower bound on rent.
    pub rent_min: Option<i64>,
    /// Inclusive upper bound on rent.
    pub rent_max: Option<i64>,
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl ListingFilters {
    /// No filtering: every listing is visible.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = non_blank(city);
        self
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = non_blank(property_type);
        self
    }

    pub fn with_rent_min(mut self, rent_min: i64) -> Self {
        self.rent_min = Some(rent_min);
        self
    }

    pub fn with_rent_max(mut self, rent_max: i64) -> Self {
        self.rent_max = Some(rent_max);
        self
    }

    /// True when the property satisfies all four predicates.
    pub fn matches(&self, property: &Property) -> bool {
        let city_ok = self.city.as_deref().map_or(true, |city| {
            property.city.to_lowercase().contains(&city.to_lowercase())
        });
        let type_ok = self
            .property_type
            .as_deref()
            .map_or(true, |t| property.property_type == t);
        let min_ok = self.rent_min.map_or(true, |min| property.rent >= min);
        let max_ok = self.rent_max.map_or(true, |max| property.rent <= max);

        city_ok && type_ok && min_ok && max_ok
    }

    /// The visible subset of `properties`, in their original order.
    pub fn apply<'a>(&self, properties: &'a [Property]) -> Vec<&'a Property> {
        properties.iter().filter(|p| self.matches(p)).collect()
    }
}
