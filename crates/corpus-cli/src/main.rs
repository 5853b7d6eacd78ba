//! Corpus CLI: contribute records to the Swecha corpus from the terminal.
//!
//! Configure with CORPUS_API_URL, CORPUS_SESSION_FILE, CORPUS_DEFAULT_CATEGORY_ID
//! and CORPUS_HTTP_TIMEOUT_SECS (all optional). Log in once; the session is
//! kept on disk for later commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use corpus_api_client::{ApiClient, Session, SessionManager};
use corpus_cli::{
    init_tracing, land, resolve, LoginForm, LoginOutcome, Navigation, ProfileState, Route,
    SubmitOutcome, UploadWorkflow, View,
};
use corpus_core::models::display_name;
use corpus_core::{AttachedFile, ClientConfig, MediaType, ReleaseRights, ALLOWED_LANGUAGES};

#[derive(Parser)]
#[command(name = "corpus", about = "Swecha corpus contribution CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with phone number and password
    Login {
        /// Registered phone number
        #[arg(long)]
        phone: String,
        /// Account password
        #[arg(long, env = "CORPUS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user's profile
    Dashboard,
    /// Upload a new record
    Upload {
        /// Record title
        #[arg(long)]
        title: String,
        /// Text content; required unless a file is given
        #[arg(long, default_value = "")]
        description: String,
        /// Category UUID (defaults to CORPUS_DEFAULT_CATEGORY_ID)
        #[arg(long)]
        category_id: Option<String>,
        /// text, audio or video; ignored when a file is given
        #[arg(long)]
        media_type: Option<MediaType>,
        /// One of the supported languages (see `corpus languages`)
        #[arg(long)]
        language: String,
        /// creator or family_or_friend
        #[arg(long, default_value = "creator")]
        release_rights: ReleaseRights,
        /// File to attach
        #[arg(long)]
        file: Option<PathBuf>,
        /// MIME type of the file, overriding the extension lookup
        #[arg(long, requires = "file")]
        mime: Option<String>,
        /// Print the server response as JSON
        #[arg(long)]
        json: bool,
    },
    /// List supported languages
    Languages,
    /// Show which view a route leads to with the current session
    Open {
        /// Route path, e.g. /dashboard
        route: String,
    },
}

struct UploadArgs {
    title: String,
    description: String,
    category_id: Option<String>,
    media_type: Option<MediaType>,
    language: String,
    release_rights: ReleaseRights,
    file: Option<PathBuf>,
    mime: Option<String>,
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    let client = ApiClient::from_config(&config).context("Failed to create API client")?;
    let mut sessions =
        SessionManager::open(&config.session_file).context("Failed to restore session")?;

    match cli.command {
        Commands::Login { phone, password } => {
            let mut form = LoginForm::new(phone, password);
            eprintln!("{}", form.button_label());
            match form.submit(&client, &mut sessions).await {
                LoginOutcome::Navigate(route) => {
                    println!("Logged in.");
                    if land(&route, sessions.current()) == View::Dashboard {
                        show_dashboard(&client, &mut sessions, &config).await?;
                    }
                }
                LoginOutcome::Stay => {
                    anyhow::bail!("{}", form.error().unwrap_or("Login failed"));
                }
            }
        }
        Commands::Logout => {
            sessions.clear().context("Failed to clear session")?;
            println!("Logged out.");
        }
        Commands::Dashboard => {
            show_dashboard(&client, &mut sessions, &config).await?;
        }
        Commands::Upload {
            title,
            description,
            category_id,
            media_type,
            language,
            release_rights,
            file,
            mime,
            json,
        } => {
            let args = UploadArgs {
                title,
                description,
                category_id,
                media_type,
                language,
                release_rights,
                file,
                mime,
                json,
            };
            upload(&client, &mut sessions, &config, args).await?;
        }
        Commands::Languages => {
            for language in ALLOWED_LANGUAGES {
                println!("{:<10} {}", language, display_name(language));
            }
        }
        Commands::Open { route } => {
            let route = Route::parse(&route);
            let view = land(&route, sessions.current());
            println!("{} -> {:?}", route, view);
        }
    }

    Ok(())
}

/// Pass the dashboard guard, yielding the session to authenticate with.
fn enter_dashboard(sessions: &SessionManager) -> anyhow::Result<Session> {
    match (resolve(&Route::Dashboard, sessions.current()), sessions.current()) {
        (Navigation::Render(View::Dashboard), Some(session)) => Ok(session.clone()),
        _ => anyhow::bail!("Not logged in. Run `corpus login --phone <PHONE>` first."),
    }
}

/// Mount the dashboard. Clears the session when the server rejects it.
async fn mount_dashboard(
    client: &ApiClient,
    sessions: &mut SessionManager,
    config: &ClientConfig,
) -> anyhow::Result<(Session, UploadWorkflow)> {
    let session = enter_dashboard(sessions)?;
    let mut workflow = UploadWorkflow::new(config.default_category_id.clone());
    eprintln!("{}", workflow.summary_lines().join("\n"));

    let unauthorized = match workflow.mount(client, &session).await {
        ProfileState::Unavailable(err) => Some(err.is_unauthorized()),
        _ => None,
    };
    if let Some(unauthorized) = unauthorized {
        if unauthorized {
            sessions.clear()?;
            anyhow::bail!("Session expired. Run `corpus login` again.");
        }
        for line in workflow.summary_lines() {
            eprintln!("{}", line);
        }
        anyhow::bail!("{}", workflow.message().unwrap_or("Failed to load user profile"));
    }

    Ok((session, workflow))
}

async fn show_dashboard(
    client: &ApiClient,
    sessions: &mut SessionManager,
    config: &ClientConfig,
) -> anyhow::Result<()> {
    let (_, workflow) = mount_dashboard(client, sessions, config).await?;
    for line in workflow.summary_lines() {
        println!("{}", line);
    }
    Ok(())
}

async fn upload(
    client: &ApiClient,
    sessions: &mut SessionManager,
    config: &ClientConfig,
    args: UploadArgs,
) -> anyhow::Result<()> {
    let attached = args
        .file
        .as_deref()
        .map(|path| AttachedFile::from_path(path, args.mime.as_deref()))
        .transpose()?;

    let (session, mut workflow) = mount_dashboard(client, sessions, config).await?;

    if attached.is_some() && !args.description.is_empty() {
        tracing::warn!("A file is attached; the description is ignored");
    }
    if attached.is_some() && args.media_type.is_some() {
        tracing::warn!("A file is attached; its type decides the media type");
    }
    if attached.is_some() {
        tracing::warn!("Only the file name is submitted; the file content is not uploaded");
    }

    workflow.edit(|draft| {
        draft.set_title(args.title);
        if let Some(category_id) = args.category_id {
            draft.set_category_id(category_id);
        }
        if let Some(media_type) = args.media_type {
            draft.set_media_type(media_type);
        }
        draft.set_description(args.description);
        draft.set_language(args.language);
        draft.set_release_rights(args.release_rights);
        draft.attach_file(attached);
    });

    eprintln!("{}", workflow.submit_label());
    let outcome = tokio::select! {
        outcome = workflow.submit(client, &session) => outcome,
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("Upload cancelled");
        }
    };

    match outcome {
        SubmitOutcome::Uploaded(response) => {
            println!("{}", workflow.message().unwrap_or("Upload successful!"));
            if args.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            Ok(())
        }
        SubmitOutcome::Failed(err) if err.is_unauthorized() => {
            sessions.clear()?;
            anyhow::bail!(
                "{} (session cleared, run `corpus login` again)",
                workflow.message().unwrap_or("Upload failed")
            );
        }
        SubmitOutcome::Rejected(_) | SubmitOutcome::Failed(_) => {
            anyhow::bail!("{}", workflow.message().unwrap_or("Upload failed"));
        }
    }
}
