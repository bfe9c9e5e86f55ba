//! # Blog Generation
//!
//! Thin adapter between a caller holding a topic and an [`Orchestrator`].
//! Every outcome is a value: callers branch on [`BlogOutcome`] instead of
//! handling errors themselves.

use crate::crew::{Inputs, Orchestrator};

/// Result key holding the writer's post
pub const BLOG_OUTPUT_KEY: &str = "write_task_output";

/// Content shown when a run completes without a post
pub const MISSING_OUTPUT: &str = "Blog generation failed.";

/// Outcome of one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogOutcome {
    /// The run completed; the post, or [`MISSING_OUTPUT`] if the run had none
    Generated(String),
    /// The run failed with this message
    Failed(String),
}

/// Run the orchestrator for `topic` and extract the blog post.
pub async fn generate_blog(orchestrator: &dyn Orchestrator, topic: &str) -> BlogOutcome {
    let inputs: Inputs = [("topic".to_string(), topic.to_string())].into_iter().collect();

    match orchestrator.run(&inputs).await {
        Ok(output) => {
            let content = output.get(BLOG_OUTPUT_KEY).unwrap_or(MISSING_OUTPUT);
            BlogOutcome::Generated(content.to_string())
        }
        Err(e) => BlogOutcome::Failed(e.to_string()),
    }
}
