//! # Tasks
//!
//! A task is one stage of a crew run: a description and an expected output,
//! both templates over the kickoff inputs, bound to one agent by role.

use serde::{Deserialize, Serialize};

use super::error::CrewError;
use super::Inputs;

/// One unit of work bound to an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique name; the task's result is stored under `<name>_output`
    pub name: String,
    /// What the agent must do (may contain `{input}` placeholders)
    pub description: String,
    /// Shape of the answer (may contain `{input}` placeholders)
    pub expected_output: String,
    /// Role of the agent that runs this task
    pub agent: String,
}

impl Task {
    pub fn new(name: impl Into<String>, agent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            expected_output: String::new(),
            agent: agent.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_expected_output(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = expected_output.into();
        self
    }

    /// Key under which the task's result appears in the crew output
    pub fn output_key(&self) -> String {
        format!("{}_output", self.name)
    }

    /// Build the prompt sent to the agent.
    ///
    /// Outputs of earlier tasks in the same run are appended as context.
    pub fn render_prompt(&self, inputs: &Inputs, context: &[TaskOutput]) -> Result<String, CrewError> {
        let mut prompt = interpolate(&self.description, inputs)?;

        let expected = interpolate(&self.expected_output, inputs)?;
        if !expected.trim().is_empty() {
            prompt.push_str("\n\nExpected output: ");
            prompt.push_str(expected.trim());
        }

        if !context.is_empty() {
            prompt.push_str("\n\nContext from previous tasks:");
            for output in context {
                prompt.push_str(&format!("\n\n## {}\n{}", output.task, output.content));
            }
        }

        Ok(prompt)
    }
}

/// Result of a single completed task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutput {
    pub task: String,
    pub agent: String,
    pub content: String,
}

/// Replace `{name}` placeholders with kickoff inputs.
///
/// `{{` and `}}` produce literal braces. An unterminated `{` is kept as text.
pub fn interpolate(template: &str, inputs: &Inputs) -> Result<String, CrewError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut key = String::new();
                let mut closed = false;
                for k in chars.by_ref() {
                    if k == '}' {
                        closed = true;
                        break;
                    }
                    key.push(k);
                }
                if !closed {
                    out.push('{');
                    out.push_str(&key);
                    continue;
                }
                let name = key.trim();
                let value = inputs
                    .get(name)
                    .ok_or_else(|| CrewError::MissingInput(name.to_string()))?;
                out.push_str(value);
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
