//! # Crew Orchestration
//!
//! A crew is a fixed set of agents and an ordered list of tasks. A kickoff
//! interpolates the inputs into every task and runs the tasks one after the
//! other, each seeing the outputs of the tasks before it.
//!
//! ```text
//! inputs → research_task (researcher) → write_task (writer) → CrewOutput
//! ```
//!
//! Callers outside this module depend on [`Orchestrator`], so tests can swap
//! the crew for a stub.

pub mod agent;
pub mod cache;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod executor;
pub mod memory;
pub mod pipeline;
pub mod rate_limit;
pub mod task;

use async_trait::async_trait;
use std::collections::HashMap;

pub use agent::{Agent, AgentTool};
pub use coordinator::{Crew, CrewConfig, CrewOutput, Process};
pub use error::CrewError;
pub use events::{CrewEvent, CrewEventKind};
pub use executor::{AgentExecutor, RadkitExecutor};
pub use pipeline::{Pipeline, PipelineStage};
pub use task::{Task, TaskOutput};

/// Kickoff inputs, substituted into `{placeholders}`
pub type Inputs = HashMap<String, String>;

/// Anything that can run a crew to completion for a set of inputs.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn run(&self, inputs: &Inputs) -> Result<CrewOutput, CrewError>;
}
