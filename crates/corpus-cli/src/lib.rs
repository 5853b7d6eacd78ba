pub mod dashboard;
pub mod guard;
pub mod login;

pub use dashboard::{ProfileState, SubmitOutcome, UploadState, UploadWorkflow};
pub use guard::{land, resolve, Navigation, Route, View};
pub use login::{LoginForm, LoginOutcome};

/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
