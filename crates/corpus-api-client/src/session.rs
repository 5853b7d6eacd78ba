//! Session handling.
//!
//! The [`SessionManager`] owns the bearer token for the lifetime of the
//! process and mirrors it to a small JSON file so a later run can restore it.
//! Every authenticated call borrows a [`Session`] from the manager.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use corpus_core::AppError;
use serde::{Deserialize, Serialize};

/// Authenticated session: an opaque bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// On-disk shape of the session file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    access_token: String,
}

#[derive(Debug)]
pub struct SessionManager {
    path: PathBuf,
    current: Option<Session>,
}

impl SessionManager {
    /// Manager backed by `path`. Nothing is read until [`restore`](Self::restore).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: None,
        }
    }

    /// Manager with the persisted session (if any) already loaded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let mut manager = Self::new(path);
        manager.restore()?;
        Ok(manager)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted token. A missing file means no session.
    ///
    /// An unreadable or malformed file is treated as no session and removed.
    pub fn restore(&mut self) -> Result<Option<&Session>, AppError> {
        self.current = match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<StoredSession>(&contents) {
                Ok(stored) if !stored.access_token.is_empty() => {
                    Some(Session::new(stored.access_token))
                }
                _ => {
                    tracing::warn!(path = %self.path.display(), "Discarding malformed session file");
                    self.remove_file()?;
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(AppError::Session(e)),
        };

        tracing::debug!(restored = self.current.is_some(), "Session restored");
        Ok(self.current.as_ref())
    }

    /// Persist `token` and make it the current session.
    pub fn establish(&mut self, token: impl Into<String>) -> Result<&Session, AppError> {
        let token = token.into();
        if token.is_empty() {
            return Err(AppError::InvalidResponse(
                "server returned an empty access token".to_string(),
            ));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            access_token: token.clone(),
        };
        write_private(&self.path, &serde_json::to_vec(&stored)?)?;

        tracing::info!(path = %self.path.display(), "Session stored");
        Ok(self.current.insert(Session::new(token)))
    }

    /// Forget the current session and delete the persisted token.
    pub fn clear(&mut self) -> Result<(), AppError> {
        self.current = None;
        self.remove_file()?;
        tracing::info!("Session cleared");
        Ok(())
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    fn remove_file(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Session(e)),
        }
    }
}

/// Write `contents` to a file only the owner can read.
///
/// Permissions are restricted before any byte is written.
fn write_private(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        // `mode` only applies to newly created files.
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)?;
    Ok(())
}
