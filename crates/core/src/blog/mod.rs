//! # Blog Crew
//!
//! The two-agent crew behind the web front-end: a researcher gathers notes
//! on the topic, then a writer drafts the post from them.
//!
//! ```rust,ignore
//! use blogcrew_core::blog::{blog_crew, BlogSettings};
//! use blogcrew_core::crew::RadkitExecutor;
//!
//! let crew = blog_crew(&BlogSettings::default(), Arc::new(RadkitExecutor))?;
//! let output = crew.kickoff(&inputs).await?;
//! ```

pub mod prompts;

use std::sync::Arc;

use crate::crew::{Agent, AgentExecutor, AgentTool, Crew, CrewConfig, CrewError, Process, Task};
use crate::models::ModelConfig;

/// Role of the research agent
pub const RESEARCHER_ROLE: &str = "researcher";
/// Role of the writing agent
pub const WRITER_ROLE: &str = "writer";
/// Name of the research stage
pub const RESEARCH_TASK: &str = "research_task";
/// Name of the writing stage; its result is `write_task_output`
pub const WRITE_TASK: &str = "write_task";
/// Requests-per-minute ceiling of the blog crew
pub const DEFAULT_MAX_RPM: u32 = 100;

/// Knobs of the blog crew that vary per deployment
#[derive(Debug, Clone)]
pub struct BlogSettings {
    /// Model shared by both agents
    pub model: ModelConfig,
    pub max_rpm: u32,
    /// Log agent prompts and answers at debug level
    pub verbose: bool,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            max_rpm: DEFAULT_MAX_RPM,
            verbose: false,
        }
    }
}

/// Researcher agent with web search
pub fn blog_researcher(model: ModelConfig) -> Agent {
    Agent::new(
        RESEARCHER_ROLE,
        "Uncover accurate, current and interesting information about {topic}",
    )
    .with_backstory(prompts::RESEARCHER)
    .with_model(model)
    .with_tool(AgentTool::WebSearch)
}

/// Writer agent
pub fn blog_writer(model: ModelConfig) -> Agent {
    Agent::new(
        WRITER_ROLE,
        "Write a compelling, well-structured blog post about {topic}",
    )
    .with_backstory(prompts::WRITER)
    .with_model(model)
}

pub fn research_task() -> Task {
    Task::new(RESEARCH_TASK, RESEARCHER_ROLE)
        .with_description(
            "Research the topic '{topic}'. Identify the key facts, recent developments, \
             notable examples and any open debates. Record the sources you used.",
        )
        .with_expected_output(
            "Structured research notes on {topic}: key facts, examples, debates and a source list.",
        )
}

pub fn write_task() -> Task {
    Task::new(WRITE_TASK, WRITER_ROLE)
        .with_description(
            "Using the research notes, write a blog post about '{topic}' for a general audience.",
        )
        .with_expected_output(
            "A complete blog post in Markdown of four to six paragraphs with a title and headings.",
        )
}

/// Crew configuration: sequential, memory and cache on, shared telemetry
pub fn blog_crew_config(settings: &BlogSettings) -> CrewConfig {
    CrewConfig {
        agents: vec![
            blog_researcher(settings.model.clone()).verbose(settings.verbose),
            blog_writer(settings.model.clone()).verbose(settings.verbose),
        ],
        tasks: vec![research_task(), write_task()],
        process: Process::Sequential,
        memory: true,
        cache: true,
        max_rpm: Some(settings.max_rpm),
        share_crew: true,
    }
}

/// Build the blog crew around an executor
pub fn blog_crew(
    settings: &BlogSettings,
    executor: Arc<dyn AgentExecutor>,
) -> Result<Crew, CrewError> {
    Crew::new(blog_crew_config(settings), executor)
}
