//! Login form.

use corpus_api_client::{ApiClient, SessionManager};

use crate::guard::Route;

const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Logged in; continue to this route.
    Navigate(Route),
    /// Stay on the login view; the form's error says why.
    Stay,
}

/// Holds `loading` set until dropped, even when the login future is abandoned.
struct Loading<'a>(&'a mut bool);

impl<'a> Loading<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub phone: String,
    pub password: String,
    loading: bool,
    error: Option<String>,
}

impl LoginForm {
    pub fn new(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading {
            "Logging in..."
        } else {
            "Login"
        }
    }

    /// Exchange the credentials for a session.
    ///
    /// On success the token is persisted through `sessions` and the caller is
    /// sent to the dashboard. Failures never escape: they become the form's
    /// error text and the form stays usable.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        sessions: &mut SessionManager,
    ) -> LoginOutcome {
        self.error = None;

        if self.phone.is_empty() || self.password.is_empty() {
            self.error = Some("Phone number and password are required.".to_string());
            return LoginOutcome::Stay;
        }

        let result = {
            let _loading = Loading::start(&mut self.loading);
            client.login(&self.phone, &self.password).await
        };

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                err.log("Login failed");
                self.error = Some(
                    err.api_error()
                        .and_then(|api| api.field("message"))
                        .unwrap_or_else(|| LOGIN_FAILED.to_string()),
                );
                return LoginOutcome::Stay;
            }
        };

        if let Err(err) = sessions.establish(response.access_token) {
            err.log("Could not store session");
            self.error = Some(format!("{}: {}", LOGIN_FAILED, err));
            return LoginOutcome::Stay;
        }

        tracing::info!("Login successful");
        LoginOutcome::Navigate(Route::Dashboard)
    }
}
