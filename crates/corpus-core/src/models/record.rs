//! Request and response bodies of the corpus API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use super::draft::UploadDraft;
use super::user::UserProfile;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// Response of `POST /auth/login`. Fields other than the token are kept as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Form-encoded body of `POST /records/upload`.
///
/// The record is always sent as one chunk with no location, and only the file
/// name travels; the file content is never part of this request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadPayload {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub user_id: String,
    pub media_type: String,
    pub upload_uuid: Uuid,
    pub filename: String,
    pub total_chunks: u32,
    pub latitude: u8,
    pub longitude: u8,
    pub release_rights: String,
    pub language: String,
    pub use_uid_filename: bool,
}

impl UploadPayload {
    pub fn new(draft: &UploadDraft, profile: &UserProfile, upload_uuid: Uuid) -> Self {
        Self {
            title: draft.title().to_string(),
            description: draft.description().to_string(),
            category_id: draft.category_id().to_string(),
            user_id: profile.user_id.clone(),
            media_type: draft.media_type().as_str().to_string(),
            upload_uuid,
            filename: draft.upload_filename(),
            total_chunks: 1,
            latitude: 0,
            longitude: 0,
            release_rights: draft.release_rights().as_str().to_string(),
            language: draft.language().to_lowercase(),
            use_uid_filename: true,
        }
    }
}
