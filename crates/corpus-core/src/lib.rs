//! Corpus Core Library
//!
//! This crate provides the domain models, upload-draft validation, error types
//! and configuration shared by the corpus API client and CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ApiError, AppError, LogLevel};
pub use models::{
    AttachedFile, MediaType, ReleaseRights, UploadDraft, UploadPayload, UserProfile,
    ALLOWED_LANGUAGES, DEFAULT_CATEGORY_ID,
};
pub use validation::{validate_draft, ValidationError};
