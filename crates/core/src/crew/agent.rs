//! # Agents
//!
//! Participants of a crew. An agent is identified by its role and carries
//! the goal, backstory, model and tools that shape its system prompt.

use serde::{Deserialize, Serialize};

use super::error::CrewError;
use super::task::interpolate;
use super::Inputs;
use crate::models::ModelConfig;

/// Tools an agent may call while working
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentTool {
    /// SearXNG-backed web search
    WebSearch,
}

/// A named participant of a crew
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique role, used to bind tasks (e.g. "researcher")
    pub role: String,
    /// What the agent is trying to achieve (may contain `{input}` placeholders)
    pub goal: String,
    /// Persona and working style
    #[serde(default)]
    pub backstory: String,
    /// LLM used by this agent
    #[serde(default)]
    pub model: ModelConfig,
    /// Tools available to the agent
    #[serde(default)]
    pub tools: Vec<AgentTool>,
    /// Log prompts and answers at debug level
    #[serde(default)]
    pub verbose: bool,
}

impl Agent {
    pub fn new(role: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: String::new(),
            model: ModelConfig::default(),
            tools: Vec::new(),
            verbose: false,
        }
    }

    pub fn with_backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = backstory.into();
        self
    }

    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    pub fn with_tool(mut self, tool: AgentTool) -> Self {
        if !self.tools.contains(&tool) {
            self.tools.push(tool);
        }
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn has_tool(&self, tool: AgentTool) -> bool {
        self.tools.contains(&tool)
    }

    /// System instructions for this agent, with inputs interpolated
    pub fn system_prompt(&self, inputs: &Inputs) -> Result<String, CrewError> {
        let goal = interpolate(&self.goal, inputs)?;
        let backstory = interpolate(&self.backstory, inputs)?;

        let mut prompt = format!("You are the {} of this crew.", self.role);
        if !backstory.trim().is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(backstory.trim());
        }
        prompt.push_str("\n\nYour personal goal is: ");
        prompt.push_str(goal.trim());
        if self.has_tool(AgentTool::WebSearch) {
            prompt.push_str("\n\nUse the search_web tool to gather current sources before answering.");
        }
        Ok(prompt)
    }
}
