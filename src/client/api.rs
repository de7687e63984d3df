use serde::de::DeserializeOwned;
use std::fmt;
use uuid::Uuid;

use super::attachment::ImageAttachment;
use super::session::Session;
use crate::models::{Property, PropertyInput};

/// Errors surfaced by [`PropertyClient`].
#[derive(Debug)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, bad body).
    /// Callers show a generic message; the cause is kept for logs only.
    Network(String),
    /// The server answered with an error body.
    Api { status: u16, message: String },
    /// A local file could not be read for attachment.
    Io(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            ClientError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Network(error.to_string())
    }
}

/// HTTP client for the property API.
///
/// Reads are anonymous; every write carries the session's bearer token. Each
/// method issues exactly one request: no retry, no de-duplication, no timeout
/// beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct PropertyClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl PropertyClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
    }

    /// URL a rendered card can embed to display the listing's image.
    pub fn image_url(&self, image_id: Uuid) -> String {
        self.url(&format!("/image/{}", image_id))
    }

    /// Fetches the full property list.
    pub async fn fetch_all(&self) -> Result<Vec<Property>, ClientError> {
        let resp = self.http.get(self.url("/properties")).send().await?;
        Self::decode(resp).await
    }

    /// Creates a listing from the form payload plus an optional attachment,
    /// submitted as multipart form data.
    pub async fn create(
        &self,
        payload: &PropertyInput,
        image: Option<&ImageAttachment>,
    ) -> Result<Property, ClientError> {
        let mut form = reqwest::multipart::Form::new()
            .text("title", payload.title.clone())
            .text("city", payload.city.clone())
            .text("rent", payload.rent.to_string())
            .text("type", payload.property_type.clone())
            .text("description", payload.description.clone());

        if let Some(att) = image {
            let part = reqwest::multipart::Part::bytes(att.data().to_vec())
                .file_name(att.name().to_string())
                .mime_str(att.content_type())?;
            form = form.part("image", part);
        }

        let resp = self
            .http
            .post(self.url("/properties/add"))
            .bearer_auth(self.session.token())
            .multipart(form)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Updates a listing with the full field set, as JSON.
    pub async fn update(&self, id: Uuid, payload: &PropertyInput) -> Result<Property, ClientError> {
        let resp = self
            .http
            .post(self.url(&format!("/properties/edit/{}", id)))
            .bearer_auth(self.session.token())
            .json(payload)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Deletes a listing by id.
    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url(&format!("/properties/delete/{}", id)))
            .bearer_auth(self.session.token())
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        if resp.status().is_success() {
            Ok(resp.json::<T>().await?)
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn api_error(resp: reqwest::Response) -> ClientError {
        let status = resp.status().as_u16();
        let message = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body["error"].as_str().map(str::to_string))
            .unwrap_or_else(|| "Unexpected server response".to_string());
        ClientError::Api { status, message }
    }
}
