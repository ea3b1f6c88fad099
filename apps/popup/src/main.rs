mod api;
mod cache;
mod config;
mod decoder;
mod errors;
mod history;
mod render;
mod session;
mod store;
mod stream;
mod view;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::ApiClient;
use crate::config::Config;
use crate::errors::ClientError;
use crate::render::TerminalRenderer;
use crate::session::Session;
use crate::store::LocalStore;
use crate::view::PopupView;

#[derive(Parser)]
#[command(name = "salary-popup", version, about = "Salary estimates for Ashby job postings")]
struct Cli {
    /// Base URL of the prediction API [overrides API_BASE]
    #[arg(long)]
    api_base: Option<String>,

    /// Directory for persisted history [overrides POPUP_STORE_DIR]
    #[arg(long)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a posting and stream its salary estimate
    Predict {
        url: String,
        /// Ask again after the first estimate; the repeat is served from cache
        #[arg(long)]
        twice: bool,
    },
    /// Load a posting and show its details
    Lookup { url: String },
    /// List recently viewed postings
    History,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout belongs to the popup output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env().with_overrides(cli.api_base, cli.store_dir);
    debug!(?config, "Popup configuration");

    let http = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    let api = ApiClient::new(http, config.api_base.clone());
    let mut session = Session::open(api, LocalStore::new(&config.store_dir));
    let mut view = PopupView::new(TerminalRenderer::new(io::stdout()));

    match cli.command {
        Command::History => show_history(&session, &mut view),
        Command::Lookup { url } => {
            if load(&mut session, &mut view, &url).await {
                if let Some(job) = session.current() {
                    view.show_description(&job.posting);
                }
            }
        }
        Command::Predict { url, twice } => {
            if load(&mut session, &mut view, &url).await {
                let rounds = if twice { 2 } else { 1 };
                for _ in 0..rounds {
                    // Failures are already shown inline.
                    match session.predict(&mut view).await {
                        Ok(source) => {
                            info!(?source, cached = view.is_from_cache(), "Prediction shown")
                        }
                        Err(e) => debug!(shown = ?view.error(), "Prediction not completed: {e}"),
                    }
                    debug_assert!(!view.is_busy());
                }
            }
        }
    }

    Ok(())
}

/// Looks up `url` and shows the job. Returns whether a job is now loaded.
async fn load(
    session: &mut Session,
    view: &mut PopupView<TerminalRenderer<io::Stdout>>,
    url: &str,
) -> bool {
    match session.lookup(url).await {
        Ok(job) => {
            view.show_job(&job.posting);
            true
        }
        Err(ClientError::NotAshbyUrl) => {
            view.show_notice(&ClientError::NotAshbyUrl.to_string());
            false
        }
        Err(e) => {
            view.show_error(&e.to_string());
            false
        }
    }
}

fn show_history(session: &Session, view: &mut PopupView<TerminalRenderer<io::Stdout>>) {
    if session.history().is_empty() {
        view.show_notice("No recent postings.");
        return;
    }
    view.show_notice("Recent:");
    for item in session.history() {
        view.show_notice(&format!("  {}  {}", item.title, item.url));
    }
}
