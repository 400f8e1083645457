//! Deterministic `ModelInvoker` doubles shared by the pipeline tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{InvokeError, ModelInvoker};

/// Replays a fixed script of responses in order. An exhausted script yields
/// API errors, which doubles as an always-failing invoker when constructed
/// with an empty script.
pub struct ScriptedInvoker {
    script: Mutex<VecDeque<Result<String, InvokeError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInvoker {
    pub fn new(script: Vec<Result<String, InvokeError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// An invoker whose every call fails at the transport level.
    pub fn always_failing() -> Self {
        Self::new(vec![])
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// The prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelInvoker for ScriptedInvoker {
    async fn invoke(&self, prompt: &str, _system: &str) -> Result<String, InvokeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(InvokeError::Api {
                    status: 503,
                    message: "scripted invoker exhausted".to_string(),
                })
            })
    }
}

/// Answers each call with the response whose key appears in the prompt.
/// Stateless across calls, so repeated identical requests get identical
/// responses — the double used by the determinism tests.
pub struct KeyedInvoker {
    rules: Vec<(String, String)>,
    stall_keys: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl KeyedInvoker {
    pub fn new(rules: Vec<(&str, String)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            stall_keys: Vec::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts containing `key` hang until cancelled, so callers can
    /// exercise their deadline handling. Checked before the rules.
    pub fn stall_on(mut self, key: &str) -> Self {
        self.stall_keys.push(key.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelInvoker for KeyedInvoker {
    async fn invoke(&self, prompt: &str, _system: &str) -> Result<String, InvokeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.stall_keys.iter().any(|key| prompt.contains(key)) {
            futures::future::pending::<()>().await;
        }
        self.rules
            .iter()
            .find(|(key, _)| prompt.contains(key))
            .map(|(_, response)| Ok(response.clone()))
            .unwrap_or_else(|| {
                Err(InvokeError::Api {
                    status: 503,
                    message: "no keyed response for prompt".to_string(),
                })
            })
    }
}

/// Never resolves. Exercises the path where every call outlives its deadline.
pub struct StalledInvoker;

#[async_trait]
impl ModelInvoker for StalledInvoker {
    async fn invoke(&self, _prompt: &str, _system: &str) -> Result<String, InvokeError> {
        futures::future::pending().await
    }
}

/// A `DimensionResult`-shaped JSON payload for scripting invokers.
pub fn dimension_json(score: u8, analysis: &str) -> String {
    serde_json::json!({ "score": score, "analysis": analysis }).to_string()
}

/// A `QuestionCritique`-shaped JSON payload for scripting invokers.
pub fn critique_json(score: u8, areas: &[&str], suggested: &str) -> String {
    serde_json::json!({
        "score": score,
        "areasOfImprovement": areas,
        "suggestedAnswer": suggested,
    })
    .to_string()
}
