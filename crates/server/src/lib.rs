//! Blogcrew Server
//!
//! Axum front-end for the blog crew: one page, one form field. `GET /`
//! shows the form; `POST /` runs the crew for the submitted topic and
//! shows the post or the error on the same page.

pub mod config;
pub mod pages;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use blogcrew_core::crew::Orchestrator;
use blogcrew_core::generation::{generate_blog, BlogOutcome};
use serde::Deserialize;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

use pages::{IndexView, Pages};

/// Shown when the form is submitted without a topic
pub const TOPIC_REQUIRED: &str = "Please enter a topic.";

/// Application state
pub struct AppState {
    orchestrator: Arc<dyn Orchestrator>,
    pages: Pages,
}

impl AppState {
    pub fn new(orchestrator: Arc<dyn Orchestrator>, pages: Pages) -> Self {
        Self { orchestrator, pages }
    }
}

pub type SharedState = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct TopicForm {
    topic: Option<String>,
}

/// Message shown for a failed generation
pub fn failure_message(message: &str) -> String {
    format!("An error occurred: {message}")
}

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_topic))
        .with_state(state)
}

/// Render the empty form
async fn show_form(State(state): State<SharedState>) -> Response {
    render(&state, &IndexView::default())
}

/// Run the crew for the submitted topic.
///
/// A body that isn't a url-encoded form carries no topic, so it gets the
/// same page as an empty field rather than a rejection status.
async fn submit_topic(
    State(state): State<SharedState>,
    form: Result<Form<TopicForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable form body");
            TopicForm { topic: None }
        }
    };
    let topic = form.topic.as_deref().map(str::trim).unwrap_or_default();
    if topic.is_empty() {
        return render(&state, &IndexView::error(TOPIC_REQUIRED));
    }

    tracing::info!(%topic, "generating blog post");
    let view = match generate_blog(state.orchestrator.as_ref(), topic).await {
        BlogOutcome::Generated(content) => {
            tracing::info!(%topic, chars = content.len(), "blog post ready");
            IndexView::content(topic, content)
        }
        BlogOutcome::Failed(message) => {
            tracing::warn!(%topic, error = %message, "blog generation failed");
            IndexView::error(failure_message(&message))
        }
    };
    render(&state, &view)
}

fn render(state: &AppState, view: &IndexView) -> Response {
    match state.pages.index(view) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

/// Serve the app until the process is stopped
pub async fn run_server(addr: SocketAddr, state: SharedState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Blogcrew running at http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
