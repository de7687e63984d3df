use uuid::Uuid;

use super::api::PropertyClient;
use super::attachment::ImageAttachment;
use super::view::{ListingView, Modal};

/// Where logout navigates to.
pub const LOGIN_ROUTE: &str = "/login";

/// Drives the listing screen against the API.
///
/// Each user action issues exactly one network call, and every successful
/// mutation is followed by a full re-fetch of the list; there are no
/// optimistic updates. Failures become the screen's status message with the
/// underlying cause discarded.
#[derive(Debug)]
pub struct ListingPage {
    client: PropertyClient,
    pub view: ListingView,
    attachment: Option<ImageAttachment>,
}

impl ListingPage {
    pub fn new(client: PropertyClient) -> Self {
        Self {
            client,
            view: ListingView::new(),
            attachment: None,
        }
    }

    /// The viewer identity used for ownership gating of card controls.
    pub fn viewer_email(&self) -> &str {
        self.client.session().email()
    }

    pub fn client(&self) -> &PropertyClient {
        &self.client
    }

    /// Re-fetches the property list into the view.
    pub async fn refresh(&mut self) {
        match self.client.fetch_all().await {
            Ok(properties) => self.view.set_properties(properties),
            Err(_) => self.view.set_message("Failed to fetch properties"),
        }
    }

    /// Stages a locally selected image for the next add submission and hands
    /// back its preview data URL.
    pub fn attach_image(&mut self, attachment: ImageAttachment) -> String {
        let preview = attachment.preview_data_url();
        self.attachment = Some(attachment);
        preview
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    /// Submits the open add/edit dialog.
    ///
    /// Validation happens here, at the submission boundary: a bad form keeps
    /// the dialog open with the error surfaced and sends nothing. On success
    /// the dialog closes and the list is re-fetched.
    pub async fn submit(&mut self) {
        let (editing, form) = match self.view.modal() {
            Modal::Add { form, .. } => (None, form.clone()),
            Modal::Edit { id, form, .. } => (Some(*id), form.clone()),
            _ => return,
        };

        let payload = match form.submit() {
            Ok(payload) => payload,
            Err(e) => {
                self.view.submit_failed(e.to_string());
                return;
            }
        };

        self.view.begin_submit();
        let result = match editing {
            Some(id) => self
                .client
                .update(id, &payload)
                .await
                .map(|_| "Property updated!"),
            None => self
                .client
                .create(&payload, self.attachment.as_ref())
                .await
                .map(|_| "Property added!"),
        };

        match result {
            Ok(message) => {
                self.view.submit_succeeded();
                self.view.set_message(message);
                self.attachment = None;
                self.refresh().await;
            }
            Err(_) => self.view.submit_failed("Failed to submit property"),
        }
    }

    /// Asks for confirmation before any delete goes out.
    pub fn request_delete(&mut self, id: Uuid) {
        self.view.request_delete(id);
    }

    /// Issues the confirmed delete, if one is pending, then re-fetches.
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.view.take_pending_delete() else {
            return;
        };

        match self.client.delete(id).await {
            Ok(()) => {
                self.view.set_message("Property deleted");
                self.refresh().await;
            }
            Err(_) => self.view.set_message("Failed to delete property"),
        }
    }

    /// Drops the session state and hands back the route to navigate to.
    pub fn logout(self) -> &'static str {
        LOGIN_ROUTE
    }
}
