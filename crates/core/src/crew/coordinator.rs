//! # Crew Coordinator
//!
//! Runs a crew's tasks in order, feeding each task the outputs of the tasks
//! before it. Memory, cache and the RPM ceiling wrap every agent execution.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::agent::Agent;
use super::cache::CrewCache;
use super::error::CrewError;
use super::events::{CrewEvent, CrewEventKind};
use super::executor::AgentExecutor;
use super::memory::{CrewMemory, MemoryEntry};
use super::pipeline::Pipeline;
use super::rate_limit::RpmController;
use super::task::{interpolate, Task, TaskOutput};
use super::{Inputs, Orchestrator};

/// Memories appended to a single task prompt
const RECALL_LIMIT: usize = 3;

/// Input values of a run in key order, used to relate runs in memory
fn subject(inputs: &Inputs) -> String {
    let mut pairs: Vec<(&String, &String)> = inputs.iter().collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(_, value)| value.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// How tasks are scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Process {
    /// Each task completes before the next starts
    #[default]
    Sequential,
    /// Manager-delegated execution (not supported)
    Hierarchical,
}

/// Configuration for a crew
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewConfig {
    pub agents: Vec<Agent>,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub process: Process,
    /// Recall outputs of earlier kickoffs
    #[serde(default)]
    pub memory: bool,
    /// Reuse answers for identical agent prompts
    #[serde(default = "default_cache")]
    pub cache: bool,
    /// Ceiling on agent executions per minute
    #[serde(default)]
    pub max_rpm: Option<u32>,
    /// Mirror crew events to the telemetry log target
    #[serde(default)]
    pub share_crew: bool,
}

fn default_cache() -> bool {
    true
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            agents: Vec::new(),
            tasks: Vec::new(),
            process: Process::Sequential,
            memory: false,
            cache: default_cache(),
            max_rpm: None,
            share_crew: false,
        }
    }
}

/// Result of a kickoff
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrewOutput {
    /// Task results keyed by `<task name>_output`
    pub outputs: HashMap<String, String>,
    /// Task results in execution order
    pub tasks: Vec<TaskOutput>,
    /// Events recorded during the run
    pub events: Vec<CrewEvent>,
}

impl CrewOutput {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.outputs.get(key).map(String::as_str)
    }
}

/// Collects events and mirrors them to telemetry when sharing is on
struct EventRecorder {
    share: bool,
    events: Vec<CrewEvent>,
}

impl EventRecorder {
    fn new(share: bool) -> Self {
        Self {
            share,
            events: Vec::new(),
        }
    }

    fn emit(&mut self, event: CrewEvent) {
        if self.share {
            match serde_json::to_string(&event) {
                Ok(payload) => tracing::info!(target: "blogcrew::telemetry", event = %payload),
                Err(e) => tracing::warn!(target: "blogcrew::telemetry", error = %e, "unserializable event"),
            }
        }
        self.events.push(event);
    }
}

/// A configured crew: the process-wide orchestration handle
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    process: Process,
    share_crew: bool,
    memory: Option<CrewMemory>,
    cache: Option<CrewCache>,
    rpm: Option<RpmController>,
    executor: Arc<dyn AgentExecutor>,
    runs: AtomicU64,
}

impl std::fmt::Debug for Crew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crew")
            .field("agents", &self.agents.iter().map(|a| &a.role).collect::<Vec<_>>())
            .field("tasks", &self.tasks.iter().map(|t| &t.name).collect::<Vec<_>>())
            .field("process", &self.process)
            .field("memory", &self.memory.is_some())
            .field("cache", &self.cache.is_some())
            .field("max_rpm", &self.max_rpm())
            .field("share_crew", &self.share_crew)
            .finish()
    }
}

impl Crew {
    /// Validate the configuration and build the crew
    pub fn new(config: CrewConfig, executor: Arc<dyn AgentExecutor>) -> Result<Self, CrewError> {
        if config.process == Process::Hierarchical {
            return Err(CrewError::Unsupported(
                "hierarchical process; use sequential".to_string(),
            ));
        }
        if config.agents.is_empty() {
            return Err(CrewError::invalid("a crew needs at least one agent"));
        }
        if config.tasks.is_empty() {
            return Err(CrewError::invalid("a crew needs at least one task"));
        }
        if config.max_rpm == Some(0) {
            return Err(CrewError::invalid("max_rpm must be greater than zero"));
        }

        let mut roles = HashSet::new();
        for agent in &config.agents {
            if !roles.insert(agent.role.as_str()) {
                return Err(CrewError::invalid(format!("duplicate agent role '{}'", agent.role)));
            }
        }
        let mut names = HashSet::new();
        for task in &config.tasks {
            if !names.insert(task.name.as_str()) {
                return Err(CrewError::invalid(format!("duplicate task name '{}'", task.name)));
            }
            if !roles.contains(task.agent.as_str()) {
                return Err(CrewError::invalid(format!(
                    "task '{}' is bound to unknown agent '{}'",
                    task.name, task.agent
                )));
            }
        }

        Ok(Self {
            memory: config.memory.then(CrewMemory::default),
            cache: config.cache.then(CrewCache::new),
            rpm: config.max_rpm.map(RpmController::new),
            agents: config.agents,
            tasks: config.tasks,
            process: config.process,
            share_crew: config.share_crew,
            executor,
            runs: AtomicU64::new(0),
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn process(&self) -> Process {
        self.process
    }

    pub fn memory_enabled(&self) -> bool {
        self.memory.is_some()
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub fn max_rpm(&self) -> Option<u32> {
        self.rpm.as_ref().map(RpmController::max_rpm)
    }

    pub fn share_crew(&self) -> bool {
        self.share_crew
    }

    fn agent(&self, role: &str) -> Result<&Agent, CrewError> {
        self.agents
            .iter()
            .find(|a| a.role == role)
            .ok_or_else(|| CrewError::invalid(format!("unknown agent '{role}'")))
    }

    /// Every placeholder used by the crew must be satisfiable before any agent runs.
    fn check_inputs(&self, inputs: &Inputs) -> Result<(), CrewError> {
        for agent in &self.agents {
            interpolate(&agent.goal, inputs)?;
            interpolate(&agent.backstory, inputs)?;
        }
        for task in &self.tasks {
            interpolate(&task.description, inputs)?;
            interpolate(&task.expected_output, inputs)?;
        }
        Ok(())
    }

    /// Run every task to completion, or stop at the first failure.
    pub async fn kickoff(&self, inputs: &Inputs) -> Result<CrewOutput, CrewError> {
        self.check_inputs(inputs)?;

        let run = self.runs.fetch_add(1, Ordering::Relaxed) + 1;
        let mut recorder = EventRecorder::new(self.share_crew);
        recorder.emit(CrewEvent::crew(CrewEventKind::KickoffStarted).with_data(json!({
            "run": run,
            "inputs": inputs,
        })));
        tracing::info!(run, tasks = self.tasks.len(), "crew kickoff");

        let subject = subject(inputs);
        let recalled = match &self.memory {
            Some(memory) => memory.recall(&subject, run, RECALL_LIMIT).await,
            None => Vec::new(),
        };

        let mut pipeline = Pipeline::new(self.tasks.len());
        let mut completed: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());
        let mut failure = None;

        while let Some(index) = pipeline.current() {
            let task = &self.tasks[index];
            let result = match self.agent(&task.agent) {
                Ok(agent) => {
                    self.execute_task(task, agent, inputs, &completed, &recalled, &mut recorder)
                        .await
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(output) => {
                    completed.push(output);
                    pipeline.advance();
                }
                Err(err) => {
                    pipeline.fail();
                    recorder.emit(
                        CrewEvent::crew(CrewEventKind::KickoffFailed)
                            .with_task(&task.name)
                            .with_data(json!({ "error": err.to_string() })),
                    );
                    tracing::warn!(run, task = %task.name, error = %err, "crew kickoff failed");
                    failure = Some(err);
                }
            }
        }

        if !pipeline.is_success() {
            return Err(failure
                .unwrap_or_else(|| CrewError::invalid("crew stopped before its last task")));
        }

        if let Some(memory) = &self.memory {
            for output in &completed {
                memory
                    .remember(MemoryEntry {
                        run,
                        subject: subject.clone(),
                        task: output.task.clone(),
                        content: output.content.clone(),
                    })
                    .await;
            }
            let entries = memory.len().await;
            tracing::debug!(run, entries, "crew memory updated");
        }

        recorder.emit(CrewEvent::crew(CrewEventKind::KickoffCompleted));
        tracing::info!(run, "crew kickoff completed");

        let outputs = self
            .tasks
            .iter()
            .zip(&completed)
            .map(|(task, output)| (task.output_key(), output.content.clone()))
            .collect();

        Ok(CrewOutput {
            outputs,
            tasks: completed,
            events: recorder.events,
        })
    }

    async fn execute_task(
        &self,
        task: &Task,
        agent: &Agent,
        inputs: &Inputs,
        context: &[TaskOutput],
        recalled: &[MemoryEntry],
        recorder: &mut EventRecorder,
    ) -> Result<TaskOutput, CrewError> {
        let system_prompt = agent.system_prompt(inputs)?;
        let mut prompt = task.render_prompt(inputs, context)?;

        if !recalled.is_empty() {
            prompt.push_str("\n\nRelevant memory from earlier runs:");
            for entry in recalled {
                prompt.push_str(&format!("\n- ({}) {}", entry.task, entry.content));
            }
        }

        let output = |content: String| TaskOutput {
            task: task.name.clone(),
            agent: agent.role.clone(),
            content,
        };

        let cache_key = CrewCache::key(&agent.role, &system_prompt, &prompt);
        if let Some(cache) = &self.cache {
            if let Some(content) = cache.get(&cache_key).await {
                recorder.emit(CrewEvent::new(CrewEventKind::TaskCacheHit, &agent.role).with_task(&task.name));
                return Ok(output(content));
            }
        }

        if let Some(rpm) = &self.rpm {
            rpm.acquire().await;
        }

        recorder.emit(CrewEvent::new(CrewEventKind::TaskStarted, &agent.role).with_task(&task.name));
        if agent.verbose {
            tracing::debug!(agent = %agent.role, task = %task.name, %prompt, "agent prompt");
        }

        match self.executor.execute(agent, &system_prompt, &prompt).await {
            Ok(content) => {
                if agent.verbose {
                    tracing::debug!(agent = %agent.role, task = %task.name, %content, "agent answer");
                }
                if let Some(cache) = &self.cache {
                    cache.insert(cache_key, content.clone()).await;
                    let entries = cache.len().await;
                    tracing::trace!(entries, "cached agent answer");
                }
                recorder.emit(
                    CrewEvent::new(CrewEventKind::TaskCompleted, &agent.role)
                        .with_task(&task.name)
                        .with_data(json!({ "output": content })),
                );
                Ok(output(content))
            }
            Err(source) => {
                recorder.emit(
                    CrewEvent::new(CrewEventKind::TaskFailed, &agent.role)
                        .with_task(&task.name)
                        .with_data(json!({ "error": source.to_string() })),
                );
                Err(CrewError::TaskFailed {
                    task: task.name.clone(),
                    source,
                })
            }
        }
    }
}

#[async_trait]
impl Orchestrator for Crew {
    async fn run(&self, inputs: &Inputs) -> Result<CrewOutput, CrewError> {
        self.kickoff(inputs).await
    }
}
