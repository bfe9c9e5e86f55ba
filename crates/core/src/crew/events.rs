//! # Crew Events
//!
//! Events recorded while a crew runs. They are attached to every
//! [`CrewOutput`](super::CrewOutput) and, when the crew shares its
//! activity, mirrored to the `blogcrew::telemetry` tracing target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of crew event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CrewEventKind {
    /// Kickoff accepted its inputs
    KickoffStarted,
    /// Agent started working on a task
    TaskStarted,
    /// Task output served from the crew cache
    TaskCacheHit,
    /// Agent completed a task
    TaskCompleted,
    /// Agent failed a task
    TaskFailed,
    /// Every task completed
    KickoffCompleted,
    /// Kickoff stopped on a failure
    KickoffFailed,
}

/// An event in a crew run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewEvent {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Kind of event
    pub kind: CrewEventKind,
    /// Agent role that produced this event (empty for crew-level events)
    pub agent: String,
    /// Task name, if the event concerns a single task
    #[serde(default)]
    pub task: Option<String>,
    /// Associated data (JSON)
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl CrewEvent {
    /// Create a new event
    pub fn new(kind: CrewEventKind, agent: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            agent: agent.to_string(),
            task: None,
            data: None,
        }
    }

    /// Crew-level event with no agent attached
    pub fn crew(kind: CrewEventKind) -> Self {
        Self::new(kind, "")
    }

    /// Add the task name to the event
    pub fn with_task(mut self, task: &str) -> Self {
        self.task = Some(task.to_string());
        self
    }

    /// Add data to the event
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
