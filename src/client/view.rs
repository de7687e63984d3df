use uuid::Uuid;

use super::filter::ListingFilters;
use super::form::PropertyForm;
use crate::models::Property;

/// Dialog state for the listing screen.
///
/// Per modal the lifecycle is: `Closed` → open (form pre-populated with blank
/// defaults or the selected record) → submitting → `Closed` on success, or
/// back to open with an error message on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Add {
        form: PropertyForm,
        submitting: bool,
        error: Option<String>,
    },
    Edit {
        id: Uuid,
        form: PropertyForm,
        submitting: bool,
        error: Option<String>,
    },
    Info {
        id: Uuid,
    },
}

/// View model for one listing card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyCard {
    pub id: Uuid,
    pub title: String,
    pub city: String,
    pub rent: i64,
    pub property_type: String,
    pub description: String,
    pub image_id: Option<Uuid>,
    /// Whether the edit/delete/info controls are shown. Display gating only;
    /// the server enforces ownership regardless of what a client renders.
    pub can_modify: bool,
}

/// The listing screen's state: the fetched list, the current modal, the
/// transient status message, and the delete-confirmation step.
///
/// Filters are NOT part of this state. They arrive as an explicit
/// [`ListingFilters`] value at render time and the visible set is recomputed
/// from the full list on every call.
#[derive(Debug, Default)]
pub struct ListingView {
    properties: Vec<Property>,
    modal: Modal,
    message: Option<String>,
    pending_delete: Option<Uuid>,
}

impl Default for Modal {
    fn default() -> Self {
        Modal::Closed
    }
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Replaces the in-memory list, e.g. after a re-fetch.
    pub fn set_properties(&mut self, properties: Vec<Property>) {
        self.properties = properties;
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Renders the visible cards for the given filters and viewer.
    pub fn cards(&self, filters: &ListingFilters, viewer_email: &str) -> Vec<PropertyCard> {
        filters
            .apply(&self.properties)
            .into_iter()
            .map(|p| PropertyCard {
                id: p.id,
                title: p.title.clone(),
                city: p.city.clone(),
                rent: p.rent,
                property_type: p.property_type.clone(),
                description: p.description.clone(),
                image_id: p.image_id,
                can_modify: p.email == viewer_email,
            })
            .collect()
    }

    /// Opens the add dialog with blank defaults.
    pub fn open_add(&mut self) {
        self.modal = Modal::Add {
            form: PropertyForm::blank(),
            submitting: false,
            error: None,
        };
    }

    /// Opens the edit dialog pre-populated from the selected record.
    pub fn open_edit(&mut self, property: &Property) {
        self.modal = Modal::Edit {
            id: property.id,
            form: PropertyForm::from_property(property),
            submitting: false,
            error: None,
        };
    }

    /// Opens the read-only info dialog.
    pub fn open_info(&mut self, id: Uuid) {
        self.modal = Modal::Info { id };
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Applies a pure form update to the open add/edit dialog. No-op while a
    /// submission is in flight or no form dialog is open.
    pub fn update_form(&mut self, update: impl FnOnce(PropertyForm) -> PropertyForm) {
        match &mut self.modal {
            Modal::Add {
                form, submitting, ..
            }
            | Modal::Edit {
                form, submitting, ..
            } if !*submitting => {
                *form = update(std::mem::take(form));
            }
            _ => {}
        }
    }

    /// Marks the open form dialog as submitting.
    pub fn begin_submit(&mut self) {
        if let Modal::Add { submitting, .. } | Modal::Edit { submitting, .. } = &mut self.modal {
            *submitting = true;
        }
    }

    /// Submission failed: the dialog stays open with the error surfaced.
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        if let Modal::Add {
            submitting, error, ..
        }
        | Modal::Edit {
            submitting, error, ..
        } = &mut self.modal
        {
            *submitting = false;
            *error = Some(message.into());
        }
    }

    /// Submission succeeded: the dialog closes.
    pub fn submit_succeeded(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Records that the user asked to delete a listing; nothing is sent until
    /// [`Self::take_pending_delete`] confirms it.
    pub fn request_delete(&mut self, id: Uuid) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Consumes the pending confirmation, handing back the id to delete.
    pub fn take_pending_delete(&mut self) -> Option<Uuid> {
        self.pending_delete.take()
    }
}
