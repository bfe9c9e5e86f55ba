//! End-to-end tests of the index page against a recording stub crew.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use blogcrew_core::crew::{CrewError, CrewOutput, Inputs, Orchestrator};
use blogcrew_server::pages::Pages;
use blogcrew_server::{app, AppState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// What the stub crew does when run
enum Reply {
    Outputs(Vec<(&'static str, &'static str)>),
    Fail(&'static str),
}

struct StubCrew {
    reply: Reply,
    topics: Mutex<Vec<String>>,
}

impl StubCrew {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            topics: Mutex::new(Vec::new()),
        })
    }

    fn topics(&self) -> Vec<String> {
        self.topics.lock().unwrap().clone()
    }
}

#[async_trait]
impl Orchestrator for StubCrew {
    async fn run(&self, inputs: &Inputs) -> Result<CrewOutput, CrewError> {
        self.topics
            .lock()
            .unwrap()
            .push(inputs.get("topic").cloned().unwrap_or_default());
        match &self.reply {
            Reply::Outputs(pairs) => Ok(CrewOutput {
                outputs: pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<HashMap<_, _>>(),
                ..CrewOutput::default()
            }),
            Reply::Fail(message) => Err(CrewError::Unsupported(message.to_string())),
        }
    }
}

fn router(crew: &Arc<StubCrew>) -> Router {
    let orchestrator: Arc<dyn Orchestrator> = crew.clone();
    app(Arc::new(AppState::new(orchestrator, Pages::load().unwrap())))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn post(body: &'static str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn get() -> Request<Body> {
    Request::builder().uri("/").body(Body::empty()).unwrap()
}

#[tokio::test]
async fn get_renders_empty_form_without_running_crew() {
    let crew = StubCrew::new(Reply::Outputs(vec![("write_task_output", "unused")]));

    let (status, body) = send(router(&crew), get()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"topic\""));
    assert!(!body.contains("class=\"error\""));
    assert!(!body.contains("class=\"blog\""));
    assert!(crew.topics().is_empty());
}

#[tokio::test]
async fn post_topic_renders_blog_content() {
    let crew = StubCrew::new(Reply::Outputs(vec![("write_task_output", "Cats are great.")]));

    let (status, body) = send(router(&crew), post("topic=cats")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Cats are great."));
    assert!(body.contains("value=\"cats\""));
    assert_eq!(crew.topics(), vec!["cats".to_string()]);
}

#[tokio::test]
async fn empty_and_blank_topics_are_rejected() {
    let crew = StubCrew::new(Reply::Outputs(vec![("write_task_output", "unused")]));

    for body in ["topic=", "topic=+++", "topic=%20%09", ""] {
        let (status, page) = send(router(&crew), post(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Please enter a topic."), "body {body:?}");
    }

    assert!(crew.topics().is_empty());
}

#[tokio::test]
async fn post_without_form_body_asks_for_topic() {
    let crew = StubCrew::new(Reply::Outputs(vec![("write_task_output", "unused")]));
    let bare = Request::builder()
        .method(Method::POST)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let multipart = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=X")
        .body(Body::from("--X--\r\n"))
        .unwrap();

    for request in [bare, multipart] {
        let (status, page) = send(router(&crew), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Please enter a topic."));
    }

    assert!(crew.topics().is_empty());
}

#[tokio::test]
async fn topic_is_trimmed_before_running() {
    let crew = StubCrew::new(Reply::Outputs(vec![("write_task_output", "Espresso.")]));

    send(router(&crew), post("topic=++espresso+history++")).await;

    assert_eq!(crew.topics(), vec!["espresso history".to_string()]);
}

#[tokio::test]
async fn missing_output_key_shows_fallback() {
    let crew = StubCrew::new(Reply::Outputs(vec![("research_task_output", "notes only")]));

    let (status, body) = send(router(&crew), post("topic=cats")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Blog generation failed."));
    assert!(!body.contains("notes only"));
}

#[tokio::test]
async fn crew_failure_is_rendered_and_server_keeps_serving() {
    let crew = StubCrew::new(Reply::Fail("provider offline"));
    let router = router(&crew);

    let (status, body) = send(router.clone(), post("topic=cats")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An error occurred: unsupported: provider offline"));
    assert!(!body.contains("class=\"blog\""));

    let (status, body) = send(router, get()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"topic\""));
    assert_eq!(crew.topics().len(), 1);
}
