//! Errors raised while building or running a crew.

use thiserror::Error;

/// Failure of a crew construction or kickoff
#[derive(Debug, Error)]
pub enum CrewError {
    /// The crew definition is inconsistent (duplicate roles, unknown agents, ...)
    #[error("invalid crew configuration: {0}")]
    InvalidConfig(String),

    /// A configured feature this engine does not run
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A `{placeholder}` in a task or agent has no matching input
    #[error("missing input '{0}'")]
    MissingInput(String),

    /// An agent failed while executing a task
    #[error("task '{task}' failed: {source}")]
    TaskFailed {
        task: String,
        #[source]
        source: anyhow::Error,
    },
}

impl CrewError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        CrewError::InvalidConfig(reason.into())
    }
}
