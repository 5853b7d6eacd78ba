pub mod draft;
pub mod language;
pub mod media;
pub mod record;
pub mod user;

pub use draft::{AttachedFile, UploadDraft, DEFAULT_CATEGORY_ID};
pub use language::{display_name, is_allowed_language, ALLOWED_LANGUAGES};
pub use media::{content_type_for_path, MediaType, ReleaseRights};
pub use record::{LoginRequest, LoginResponse, UploadPayload};
pub use user::{UserProfile, USER_ID_KEYS};
