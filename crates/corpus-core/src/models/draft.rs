//! In-progress upload form state.
//!
//! Field setters enforce the coupling between description, attached file and
//! media type, so a draft can never hold both a file and a description, and
//! an attached file always decides the media type.

use std::path::Path;

use serde::Serialize;

use super::media::{content_type_for_path, MediaType, ReleaseRights};
use crate::error::AppError;

/// Category used when the user does not pick one.
pub const DEFAULT_CATEGORY_ID: &str = "ab9fa2ce-1f83-4e91-b89d-cca18e8b301e";

/// File chosen for upload. Only its name and type reach the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachedFile {
    pub name: String,
    pub mime_type: String,
}

impl AttachedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Describe a local file. `mime_override` wins over the extension lookup.
    pub fn from_path(path: &Path, mime_override: Option<&str>) -> Result<Self, AppError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            AppError::InvalidInput(format!("Cannot read file {}: {}", path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(AppError::InvalidInput(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid file name: {}", path.display())))?
            .to_string();

        let mime_type = mime_override
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for_path(path).to_string());

        Ok(Self { name, mime_type })
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from_mime(&self.mime_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadDraft {
    title: String,
    description: String,
    category_id: String,
    media_type: MediaType,
    language: String,
    release_rights: ReleaseRights,
    file: Option<AttachedFile>,
}

impl Default for UploadDraft {
    fn default() -> Self {
        Self::with_category(DEFAULT_CATEGORY_ID)
    }
}

impl UploadDraft {
    /// Empty draft preselecting `category_id`.
    pub fn with_category(category_id: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category_id: category_id.into(),
            media_type: MediaType::Text,
            language: String::new(),
            release_rights: ReleaseRights::Creator,
            file: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn release_rights(&self) -> ReleaseRights {
        self.release_rights
    }

    pub fn file(&self) -> Option<&AttachedFile> {
        self.file.as_ref()
    }

    /// Description and manual media type are locked while a file is attached.
    pub fn is_description_enabled(&self) -> bool {
        self.file.is_none()
    }

    pub fn is_media_type_selectable(&self) -> bool {
        self.file.is_none()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Ignored while a file is attached.
    pub fn set_description(&mut self, description: impl Into<String>) {
        if self.is_description_enabled() {
            self.description = description.into();
        }
    }

    pub fn set_category_id(&mut self, category_id: impl Into<String>) {
        self.category_id = category_id.into();
    }

    /// Manual media type selection. Ignored while a file is attached, so the
    /// draft never holds a file under a manually chosen type.
    ///
    /// Moving away from text drops the description.
    pub fn set_media_type(&mut self, media_type: MediaType) {
        if !self.is_media_type_selectable() {
            return;
        }
        if media_type != MediaType::Text {
            self.description.clear();
        }
        self.media_type = media_type;
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn set_release_rights(&mut self, release_rights: ReleaseRights) {
        self.release_rights = release_rights;
    }

    /// Attach or detach a file.
    ///
    /// Attaching clears the description and forces the media type from the
    /// file's MIME type. Detaching leaves the media type as it was.
    pub fn attach_file(&mut self, file: Option<AttachedFile>) {
        match file {
            Some(file) => {
                self.description.clear();
                self.media_type = file.media_type();
                self.file = Some(file);
            }
            None => self.file = None,
        }
    }

    /// Back to an empty draft after a successful upload, keeping the category.
    pub fn reset(&mut self) {
        *self = Self::with_category(std::mem::take(&mut self.category_id));
    }

    /// Name sent to the server: the file's name, or `<title>.txt`.
    pub fn upload_filename(&self) -> String {
        match &self.file {
            Some(file) => file.name.clone(),
            None => format!("{}.txt", self.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story_draft() -> UploadDraft {
        let mut draft = UploadDraft::default();
        draft.set_title("Story");
        draft.set_description("Once upon a time");
        draft.set_language("hindi");
        draft
    }

    #[test]
    fn defaults() {
        let draft = UploadDraft::default();
        assert_eq!(draft.category_id(), DEFAULT_CATEGORY_ID);
        assert_eq!(draft.media_type(), MediaType::Text);
        assert_eq!(draft.release_rights(), ReleaseRights::Creator);
        assert!(draft.file().is_none());
    }

    #[test]
    fn attaching_file_clears_description_and_derives_media_type() {
        let mut draft = story_draft();
        draft.attach_file(Some(AttachedFile::new("song.mp3", "audio/mp3")));
        assert_eq!(draft.description(), "");
        assert_eq!(draft.media_type(), MediaType::Audio);
        assert!(!draft.is_description_enabled());

        draft.attach_file(Some(AttachedFile::new("clip.mp4", "video/mp4")));
        assert_eq!(draft.media_type(), MediaType::Video);

        draft.attach_file(Some(AttachedFile::new("photo.png", "image/png")));
        assert_eq!(draft.media_type(), MediaType::Text);
    }

    #[test]
    fn description_locked_while_file_attached() {
        let mut draft = UploadDraft::default();
        draft.attach_file(Some(AttachedFile::new("a.wav", "audio/wav")));
        draft.set_description("ignored");
        assert_eq!(draft.description(), "");
    }

    #[test]
    fn file_overrides_manual_media_type() {
        let mut draft = UploadDraft::default();
        draft.attach_file(Some(AttachedFile::new("a.wav", "audio/wav")));
        draft.set_media_type(MediaType::Video);
        assert_eq!(draft.media_type(), MediaType::Audio);
        assert!(draft.file().is_some());
    }

    #[test]
    fn switching_away_from_text_clears_description() {
        let mut draft = story_draft();
        draft.set_media_type(MediaType::Audio);
        assert_eq!(draft.description(), "");
        assert_eq!(draft.media_type(), MediaType::Audio);
    }

    #[test]
    fn detaching_file_reenables_description() {
        let mut draft = UploadDraft::default();
        draft.attach_file(Some(AttachedFile::new("a.wav", "audio/wav")));
        draft.attach_file(None);
        assert!(draft.is_description_enabled());
        assert_eq!(draft.media_type(), MediaType::Audio);
        draft.set_media_type(MediaType::Text);
        assert_eq!(draft.media_type(), MediaType::Text);
    }

    #[test]
    fn reset_keeps_category() {
        let mut draft = story_draft();
        draft.set_category_id("custom-category");
        draft.set_release_rights(ReleaseRights::FamilyOrFriend);
        draft.reset();
        assert_eq!(draft, UploadDraft::with_category("custom-category"));
        assert_eq!(draft.release_rights(), ReleaseRights::Creator);
    }

    #[test]
    fn upload_filename() {
        let mut draft = story_draft();
        assert_eq!(draft.upload_filename(), "Story.txt");
        draft.attach_file(Some(AttachedFile::new("tale.ogg", "audio/ogg")));
        assert_eq!(draft.upload_filename(), "tale.ogg");
    }

    #[test]
    fn from_path_reads_name_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recording.mp3");
        std::fs::write(&path, b"ID3").unwrap();

        let file = AttachedFile::from_path(&path, None).unwrap();
        assert_eq!(file.name, "recording.mp3");
        assert_eq!(file.mime_type, "audio/mpeg");

        let file = AttachedFile::from_path(&path, Some("video/mp4")).unwrap();
        assert_eq!(file.media_type(), MediaType::Video);
    }

    #[test]
    fn selecting_text_keeps_description_and_file() {
        let mut draft = story_draft();
        draft.set_media_type(MediaType::Text);
        assert_eq!(draft.description(), "Once upon a time");

        draft.attach_file(Some(AttachedFile::new("a.wav", "audio/wav")));
        draft.set_media_type(MediaType::Text);
        assert_eq!(draft.media_type(), MediaType::Audio);
        assert_eq!(draft.file().map(|f| f.name.as_str()), Some("a.wav"));
    }

    #[test]
    fn from_path_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = AttachedFile::from_path(dir.path(), None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AttachedFile::from_path(&dir.path().join("nope.txt"), None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
