//! Profile picture uploads.

use crate::error::CommerceError;

/// Largest accepted avatar, in bytes.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// An image file picked for the profile picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Content type guessed from the extension; unknown extensions get
    /// `application/octet-stream` and fail [`validate`](Self::validate).
    pub fn from_file_name(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let content_type = match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        };
        Self::new(file_name, content_type, bytes)
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        if !self.content_type.starts_with("image/") {
            return Err(CommerceError::Validation(
                "Please select an image file (JPEG, PNG, GIF, WebP)".into(),
            ));
        }
        if self.bytes.len() > MAX_AVATAR_BYTES {
            return Err(CommerceError::Validation("Image must be less than 5MB".into()));
        }
        Ok(())
    }
}
