//! Dashboard: profile summary and the record upload workflow.
//!
//! A [`UploadWorkflow`] lives as long as the dashboard view. It fetches the
//! profile once on mount, holds the draft while the user edits it, and
//! submits it as a single request. Every method that awaits takes `&mut self`,
//! so a response can only land on a live workflow; dropping the future
//! abandons the request and its result.

use corpus_api_client::{ApiClient, Session};
use corpus_core::{
    validate_draft, AppError, UploadDraft, UploadPayload, UserProfile, ValidationError,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

const PROFILE_FAILED: &str = "Failed to load user profile";
const UPLOAD_OK: &str = "Upload successful!";

/// Profile fetch status for the current view.
#[derive(Debug)]
pub enum ProfileState {
    Loading,
    Loaded(UserProfile),
    /// Terminal for this view; the form cannot be submitted.
    Unavailable(AppError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Editing,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Result of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Draft rejected locally; nothing was sent.
    Rejected(ValidationError),
    /// Server accepted the record.
    Uploaded(JsonValue),
    /// Request failed; the draft is kept for correction.
    Failed(AppError),
}

/// Marks an upload as in flight for as long as it lives.
///
/// Dropping it clears the flag, including when the submit future is abandoned
/// mid-request, so the form is always resubmittable.
struct InFlight<'a> {
    uploading: &'a mut bool,
    state: &'a mut UploadState,
}

impl<'a> InFlight<'a> {
    fn start(uploading: &'a mut bool, state: &'a mut UploadState) -> Self {
        *uploading = true;
        *state = UploadState::Submitting;
        Self { uploading, state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.uploading = false;
        if *self.state == UploadState::Submitting {
            *self.state = UploadState::Editing;
        }
    }
}

#[derive(Debug)]
pub struct UploadWorkflow {
    draft: UploadDraft,
    profile: ProfileState,
    state: UploadState,
    uploading: bool,
    message: Option<String>,
}

impl UploadWorkflow {
    pub fn new(default_category_id: impl Into<String>) -> Self {
        Self {
            draft: UploadDraft::with_category(default_category_id),
            profile: ProfileState::Loading,
            state: UploadState::Editing,
            uploading: false,
            message: None,
        }
    }

    /// Fetch the user's profile. Called once when the view opens.
    pub async fn mount(&mut self, client: &ApiClient, session: &Session) -> &ProfileState {
        self.profile = ProfileState::Loading;
        self.profile = match client.fetch_profile(session).await {
            Ok(profile) => {
                tracing::debug!(user_id = %profile.user_id, "Loaded user profile");
                ProfileState::Loaded(profile)
            }
            Err(err) => {
                err.log("Error fetching user");
                self.message = Some(match &err {
                    AppError::MissingUserId => format!("{}: {}", PROFILE_FAILED, err),
                    _ => PROFILE_FAILED.to_string(),
                });
                ProfileState::Unavailable(err)
            }
        };
        &self.profile
    }

    pub fn profile_state(&self) -> &ProfileState {
        &self.profile
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match &self.profile {
            ProfileState::Loaded(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn draft(&self) -> &UploadDraft {
        &self.draft
    }

    /// Apply a field edit. Any edit puts the workflow back into editing.
    pub fn edit<F: FnOnce(&mut UploadDraft)>(&mut self, f: F) {
        f(&mut self.draft);
        self.state = UploadState::Editing;
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Messages mentioning a failure are shown as errors.
    pub fn message_is_error(&self) -> bool {
        self.message
            .as_deref()
            .is_some_and(|m| m.to_lowercase().contains("failed"))
    }

    pub fn submit_label(&self) -> &'static str {
        if self.uploading {
            "Uploading..."
        } else {
            "Submit"
        }
    }

    /// Validate and upload the draft.
    ///
    /// Taking `&mut self` rules out a second submit while one is in flight.
    pub async fn submit(&mut self, client: &ApiClient, session: &Session) -> SubmitOutcome {
        self.state = UploadState::Validating;
        let payload = match validate_draft(&self.draft, self.profile()) {
            Ok(profile) => UploadPayload::new(&self.draft, profile, Uuid::new_v4()),
            Err(err) => {
                tracing::debug!(error = %err, "Upload draft rejected");
                self.message = Some(err.to_string());
                self.state = UploadState::Editing;
                return SubmitOutcome::Rejected(err);
            }
        };

        self.message = None;
        let result = {
            let _in_flight = InFlight::start(&mut self.uploading, &mut self.state);
            client.upload_record(session, &payload).await
        };

        match result {
            Ok(response) => {
                tracing::info!(upload_uuid = %payload.upload_uuid, "Upload success");
                self.message = Some(UPLOAD_OK.to_string());
                self.draft.reset();
                self.state = UploadState::Succeeded;
                SubmitOutcome::Uploaded(response)
            }
            Err(err) => {
                err.log("Upload error");
                self.message = Some(format!(
                    "Upload failed: {}",
                    err.response_message("detail")
                ));
                self.state = UploadState::Failed;
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Text lines of the dashboard header.
    pub fn summary_lines(&self) -> Vec<String> {
        match &self.profile {
            ProfileState::Loading => vec!["Loading your profile...".to_string()],
            ProfileState::Unavailable(_) => vec!["Failed to load user data.".to_string()],
            ProfileState::Loaded(profile) => vec![
                format!("Welcome, {}!", profile.display_name()),
                format!("Phone: {}", profile.phone.as_deref().unwrap_or_default()),
                format!("Email: {}", profile.email.as_deref().unwrap_or("N/A")),
            ],
        }
    }
}
