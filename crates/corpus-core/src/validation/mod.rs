//! Upload draft validation
//!
//! Checks run in a fixed order and stop at the first violation; the error's
//! display text is the message shown to the user.

use crate::models::language::{is_allowed_language, ALLOWED_LANGUAGES};
use crate::models::{UploadDraft, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required.")]
    MissingTitle,

    #[error("Category ID is required.")]
    MissingCategory,

    #[error("Language is required.")]
    MissingLanguage,

    #[error("Language must be one of: {}", ALLOWED_LANGUAGES.join(", "))]
    UnsupportedLanguage(String),

    #[error("Please provide a description or upload a file.")]
    MissingContent,

    #[error("User info not loaded.")]
    ProfileNotLoaded,
}

/// Validate a draft before submission.
///
/// Returns the loaded profile so the caller can build the payload without
/// unwrapping it a second time.
pub fn validate_draft<'a>(
    draft: &UploadDraft,
    profile: Option<&'a UserProfile>,
) -> Result<&'a UserProfile, ValidationError> {
    if draft.title().trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if draft.category_id().trim().is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    if draft.language().trim().is_empty() {
        return Err(ValidationError::MissingLanguage);
    }
    if !is_allowed_language(draft.language()) {
        return Err(ValidationError::UnsupportedLanguage(
            draft.language().to_string(),
        ));
    }
    if draft.file().is_none() && draft.description().trim().is_empty() {
        return Err(ValidationError::MissingContent);
    }
    profile.ok_or(ValidationError::ProfileNotLoaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttachedFile;
    use serde_json::json;

    fn profile() -> UserProfile {
        UserProfile::from_value(json!({ "uid": "u-1" })).unwrap()
    }

    fn valid_draft() -> UploadDraft {
        let mut draft = UploadDraft::default();
        draft.set_title("Story");
        draft.set_description("Once upon a time");
        draft.set_language("hindi");
        draft
    }

    #[test]
    fn valid_text_draft_passes() {
        let profile = profile();
        assert!(validate_draft(&valid_draft(), Some(&profile)).is_ok());
    }

    #[test]
    fn empty_title_rejected_first() {
        let mut draft = UploadDraft::with_category("");
        draft.set_title("   ");
        assert_eq!(
            validate_draft(&draft, None).unwrap_err(),
            ValidationError::MissingTitle
        );
    }

    #[test]
    fn blank_category_rejected() {
        let mut draft = valid_draft();
        draft.set_category_id(" ");
        assert_eq!(
            validate_draft(&draft, None).unwrap_err(),
            ValidationError::MissingCategory
        );
    }

    #[test]
    fn missing_language_rejected() {
        let mut draft = valid_draft();
        draft.set_language("");
        assert_eq!(
            validate_draft(&draft, None).unwrap_err(),
            ValidationError::MissingLanguage
        );
    }

    #[test]
    fn unknown_language_lists_allowed_ones() {
        let mut draft = valid_draft();
        draft.set_language("English");
        let err = validate_draft(&draft, Some(&profile())).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedLanguage("English".into()));
        let message = err.to_string();
        assert!(message.starts_with("Language must be one of: assamese, bengali,"));
        assert!(message.ends_with("telugu, urdu"));
    }

    #[test]
    fn language_check_ignores_case() {
        let mut draft = valid_draft();
        draft.set_language("HiNdI");
        assert!(validate_draft(&draft, Some(&profile())).is_ok());
    }

    #[test]
    fn description_required_without_file() {
        let mut draft = UploadDraft::default();
        draft.set_title("Story");
        draft.set_language("Hindi");
        let err = validate_draft(&draft, Some(&profile())).unwrap_err();
        assert_eq!(err, ValidationError::MissingContent);
        assert_eq!(
            err.to_string(),
            "Please provide a description or upload a file."
        );
    }

    #[test]
    fn file_without_description_passes() {
        let mut draft = UploadDraft::default();
        draft.set_title("Song");
        draft.set_language("telugu");
        draft.attach_file(Some(AttachedFile::new("song.mp3", "audio/mp3")));
        assert!(validate_draft(&draft, Some(&profile())).is_ok());
    }

    #[test]
    fn profile_checked_last() {
        assert_eq!(
            validate_draft(&valid_draft(), None).unwrap_err(),
            ValidationError::ProfileNotLoaded
        );
    }
}
