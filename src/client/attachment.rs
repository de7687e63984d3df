use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::path::Path;

use super::api::ClientError;

/// A locally selected image, ready to ride along with a create submission.
///
/// Selection reads the file once; the preview is produced from those bytes
/// with no network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    name: String,
    content_type: String,
    data: Vec<u8>,
}

fn content_type_for(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string()
}

impl ImageAttachment {
    /// Reads the file at `path`, inferring the MIME type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| ClientError::Io(e.to_string()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        Ok(Self {
            name,
            content_type: content_type_for(path),
            data,
        })
    }

    /// Builds an attachment from in-memory parts (pickers that already know
    /// the MIME type, tests).
    pub fn from_parts(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// A `data:` URL for the selection preview, built locally.
    pub fn preview_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.data)
        )
    }
}
