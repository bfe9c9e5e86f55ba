//! Blogcrew binary: loads `.env`, builds the blog crew once, then serves the
//! form or runs a single topic from the terminal.

use anyhow::{bail, Context};
use blogcrew_core::blog::blog_crew;
use blogcrew_core::crew::{Orchestrator, RadkitExecutor};
use blogcrew_core::generation::{generate_blog, BlogOutcome};
use blogcrew_server::config::ServerConfig;
use blogcrew_server::pages::Pages;
use blogcrew_server::{failure_message, run_server, AppState, TOPIC_REQUIRED};
use clap::{ArgAction, Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Clone)]
#[command(author, version, about = "Blogcrew - research a topic and draft a blog post")]
struct Args {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Start the web server (default)
    Serve {
        /// Address to listen on (overrides BLOGCREW_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides BLOGCREW_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Generate one blog post and print it
    Run {
        /// The topic to write about
        topic: String,
    },
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = dotenvy::dotenv();
    let args = Args::parse();
    init_logging(args.verbose);

    match &env_file {
        Ok(path) => tracing::info!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => tracing::warn!(error = %e, "failed to load .env file"),
    }

    let mut config = ServerConfig::from_env()?;
    let crew = blog_crew(&config.blog_settings(), Arc::new(RadkitExecutor))
        .context("failed to build the blog crew")?;
    tracing::debug!(?crew, "blog crew ready");
    let orchestrator: Arc<dyn Orchestrator> = Arc::new(crew);

    match args.command {
        Some(CliCommand::Run { topic }) => {
            let topic = topic.trim();
            if topic.is_empty() {
                bail!(TOPIC_REQUIRED);
            }
            match generate_blog(orchestrator.as_ref(), topic).await {
                BlogOutcome::Generated(content) => println!("{content}"),
                BlogOutcome::Failed(message) => bail!(failure_message(&message)),
            }
            Ok(())
        }
        Some(CliCommand::Serve { host, port }) => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(&config, orchestrator).await
        }
        None => serve(&config, orchestrator).await,
    }
}

async fn serve(config: &ServerConfig, orchestrator: Arc<dyn Orchestrator>) -> anyhow::Result<()> {
    let pages = Pages::load().context("failed to load page templates")?;
    let state = Arc::new(AppState::new(orchestrator, pages));
    run_server(config.addr()?, state).await
}
