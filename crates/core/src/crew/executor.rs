//! # Agent Executor
//!
//! The seam between the crew engine and the LLM. [`RadkitExecutor`] runs an
//! agent through radkit, choosing the provider from the agent's
//! [`ModelConfig`](crate::models::ModelConfig):
//! - agents without tools go through `LlmFunction`
//! - agents with tools go through `LlmWorker` with those tools attached

use async_trait::async_trait;
use radkit::agent::{LlmFunction, LlmWorker};
use radkit::macros::LLMOutput;
use radkit::models::providers::{
    AnthropicLlm, DeepSeekLlm, GeminiLlm, GrokLlm, OpenAILlm, OpenRouterLlm,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, AgentTool};
use crate::models::LlmProvider;
use crate::tools::web_search;

/// Runs one agent turn: system prompt plus task prompt in, answer text out.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    async fn execute(&self, agent: &Agent, system_prompt: &str, prompt: &str)
        -> anyhow::Result<String>;
}

/// Structured answer requested from the LLM
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct AgentAnswer {
    /// The complete deliverable for the task, in Markdown
    pub content: String,
}

/// Bind `$llm` to the provider client selected by `$config`, then evaluate `$body`.
/// `$body` is expanded once per provider so it can use each concrete client type.
macro_rules! with_provider_llm {
    ($config:expr, |$llm:ident| $body:expr) => {{
        let config = $config;
        match config.provider {
            LlmProvider::Anthropic => {
                let $llm = AnthropicLlm::from_env(&config.model)?;
                $body
            }
            LlmProvider::OpenAI => {
                let client = OpenAILlm::from_env(&config.model)?;
                let $llm = match &config.base_url {
                    Some(base_url) => client.with_base_url(base_url),
                    None => client,
                };
                $body
            }
            LlmProvider::Gemini => {
                let $llm = GeminiLlm::from_env(&config.model)?;
                $body
            }
            LlmProvider::OpenRouter => {
                let $llm = OpenRouterLlm::from_env(&config.model)?;
                $body
            }
            LlmProvider::Grok => {
                let $llm = GrokLlm::from_env(&config.model)?;
                $body
            }
            LlmProvider::DeepSeek => {
                let $llm = DeepSeekLlm::from_env(&config.model)?;
                $body
            }
        }
    }};
}

/// Executor backed by radkit LLM providers
#[derive(Debug, Clone, Copy, Default)]
pub struct RadkitExecutor;

#[async_trait]
impl AgentExecutor for RadkitExecutor {
    async fn execute(
        &self,
        agent: &Agent,
        system_prompt: &str,
        prompt: &str,
    ) -> anyhow::Result<String> {
        let answer: AgentAnswer = if agent.has_tool(AgentTool::WebSearch) {
            with_provider_llm!(&agent.model, |llm| {
                let worker = LlmWorker::<AgentAnswer>::builder(llm)
                    .with_system_instructions(system_prompt)
                    .with_tool(web_search::search_web)
                    .build();
                worker.run(prompt.to_string()).await?
            })
        } else {
            with_provider_llm!(&agent.model, |llm| {
                let func = LlmFunction::<AgentAnswer>::new_with_system_instructions(llm, system_prompt);
                func.run(prompt.to_string()).await?
            })
        };

        Ok(answer.content)
    }
}
