//! Route table and access guard.
//!
//! Protected views render only when a session is present; everything else
//! lands on the login view. Token validity is not checked here, an expired
//! token is only noticed when an authenticated call fails.

use std::fmt;

use corpus_api_client::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Dashboard,
    Unknown(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Route::Root,
            "/login" => Route::Login,
            "/dashboard" => Route::Dashboard,
            _ => Route::Unknown(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Unknown(path) => path,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(View),
    Redirect(Route),
}

/// Decide what a request for `route` shows, given the current session.
pub fn resolve(route: &Route, session: Option<&Session>) -> Navigation {
    match route {
        Route::Login => Navigation::Render(View::Login),
        Route::Dashboard => protect(View::Dashboard, session),
        Route::Root | Route::Unknown(_) => Navigation::Redirect(Route::Login),
    }
}

/// Render `view` only for an authenticated session.
pub fn protect(view: View, session: Option<&Session>) -> Navigation {
    match session {
        Some(_) => Navigation::Render(view),
        None => Navigation::Redirect(Route::Login),
    }
}

/// Follow redirects until a view renders.
pub fn land(route: &Route, session: Option<&Session>) -> View {
    let mut current = route.clone();
    loop {
        match resolve(&current, session) {
            Navigation::Render(view) => return view,
            Navigation::Redirect(next) => {
                tracing::debug!(from = %current, to = %next, "Redirecting");
                current = next;
            }
        }
    }
}
