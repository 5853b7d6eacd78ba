//! Domain methods for the corpus API client.

use corpus_core::{AppError, UploadPayload, UserProfile};
use corpus_core::models::{LoginRequest, LoginResponse};
use serde_json::Value as JsonValue;

use crate::{ApiClient, Session};

/// Version prefix of every endpoint.
pub const API_PREFIX: &str = "/api/v1";

impl ApiClient {
    /// Exchange phone and password for an access token.
    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginResponse, AppError> {
        let body = LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
        };
        self.post_json(&format!("{}/auth/login", API_PREFIX), &body)
            .await
    }

    /// Profile record of the session's user, exactly as the server returns it.
    pub async fn fetch_profile_raw(&self, session: &Session) -> Result<JsonValue, AppError> {
        self.get(&format!("{}/auth/me", API_PREFIX), session).await
    }

    /// Fetch and normalize the session user's profile.
    pub async fn fetch_profile(&self, session: &Session) -> Result<UserProfile, AppError> {
        let raw = self.fetch_profile_raw(session).await?;
        UserProfile::from_value(raw)
    }

    /// Submit a record. The response body is returned untouched.
    pub async fn upload_record(
        &self,
        session: &Session,
        payload: &UploadPayload,
    ) -> Result<JsonValue, AppError> {
        tracing::info!(
            upload_uuid = %payload.upload_uuid,
            media_type = %payload.media_type,
            language = %payload.language,
            filename = %payload.filename,
            "Uploading record"
        );
        self.post_form(&format!("{}/records/upload", API_PREFIX), session, payload)
            .await
    }
}
