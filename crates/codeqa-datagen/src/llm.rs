//! OpenAI-compatible model provider built on [Rig](https://github.com/0xPlaygrounds/rig).
//!
//! Supports any OpenAI-compatible endpoint (OpenAI, Ollama, vLLM, etc.). The
//! provider owns a single-threaded tokio runtime and drives the async client
//! to completion, so the generation pass itself stays synchronous.

use std::env;

use rig::agent::Agent;
use rig::completion::Prompt;
use rig::providers::openai;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::model::TextModel;

/// Configuration for an LLM endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResolver {
    /// Base URL for the API (e.g., "https://api.openai.com/v1")
    pub api_url: String,

    /// API key for authentication
    pub api_key: String,

    /// Model name to use (e.g., "gpt-4o-mini", "llama3", "phi3")
    pub model_name: String,
}

impl LlmResolver {
    /// Create a new resolver.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            model_name: model_name.into(),
        }
    }

    /// Create a resolver for local Ollama.
    pub fn ollama(model_name: impl Into<String>) -> Self {
        Self {
            api_url: "http://localhost:11434/v1".to_string(),
            api_key: "ollama".to_string(),
            model_name: model_name.into(),
        }
    }

    /// Create a resolver from `OPENAI_API_URL` / `OPENAI_API_KEY` /
    /// `OPENAI_MODEL_NAME` environment variables.
    pub fn from_env() -> Option<Self> {
        let api_url = env::var("OPENAI_API_URL").ok()?;
        let api_key = env::var("OPENAI_API_KEY").ok()?;
        let model_name =
            env::var("OPENAI_MODEL_NAME").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Some(Self {
            api_url,
            api_key,
            model_name,
        })
    }
}

/// Create an OpenAI-compatible Rig client.
pub fn create_openai_client(resolver: &LlmResolver) -> openai::Client {
    openai::Client::from_url(&resolver.api_key, &resolver.api_url)
}

/// A [`TextModel`] backed by a Rig agent against an OpenAI-compatible API.
pub struct RigModel {
    agent: Agent<openai::CompletionModel>,
    runtime: tokio::runtime::Runtime,
}

impl RigModel {
    /// Build a provider for the endpoint a resolver describes.
    pub fn from_resolver(resolver: &LlmResolver) -> ModelResult<Self> {
        let client = create_openai_client(resolver);
        let agent = client.agent(&resolver.model_name).build();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ModelError::Initialization {
                message: e.to_string(),
            })?;

        Ok(Self { agent, runtime })
    }

    /// Build a provider from environment variables, if they are set.
    pub fn from_env() -> Option<ModelResult<Self>> {
        LlmResolver::from_env().map(|resolver| Self::from_resolver(&resolver))
    }
}

impl TextModel for RigModel {
    fn complete(&self, prompt: &str) -> ModelResult<String> {
        debug!(prompt_len = prompt.len(), "model_completion_start");

        let response = self
            .runtime
            .block_on(self.agent.prompt(prompt.to_string()))
            .map_err(|e| ModelError::Invocation {
                message: e.to_string(),
            })?;

        debug!(response_len = response.len(), "model_completion_complete");
        Ok(response)
    }
}
