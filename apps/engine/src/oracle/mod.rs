//! AI Oracle — the single point of entry for all model calls in Sift.
//!
//! ARCHITECTURAL RULE: no other module may call the Anthropic API directly.
//! The core treats the oracle as an opaque text-to-JSON capability behind
//! the `Oracle` trait; the pipeline recovers from any oracle failure by
//! degrading to heuristic-only operation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

use crate::models::analysis::{AnalysisResult, MatchResult};
use crate::models::profile::ExtractedProfile;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

/// Models probed in order until one answers.
pub const DEFAULT_MODELS: &[&str] = &["claude-sonnet-4-5", "claude-haiku-4-5"];

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("all {attempted} configured models failed")]
    ModelsExhausted { attempted: usize },

    #[error("model returned empty content")]
    EmptyContent,
}

/// The black-box text-to-JSON capability the pipeline consumes. Implemented
/// by `ClaudeOracle` in production and by in-memory fakes in tests.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Maps résumé text to an `ExtractedProfile`-shaped JSON value.
    async fn extract_structured(&self, text: &str) -> Result<Value, OracleError>;

    /// Evaluates a profile into an `AnalysisResult`.
    async fn evaluate(&self, profile: &ExtractedProfile) -> Result<AnalysisResult, OracleError>;

    /// Matches a profile against a job description.
    async fn match_job(
        &self,
        profile: &ExtractedProfile,
        job_description: &str,
    ) -> Result<MatchResult, OracleError>;
}

/// Retry policy for the oracle: ordered model list, per-attempt timeout,
/// and the fixed delay inserted after a rate-limit-class failure.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub models: Vec<String>,
    pub request_timeout: std::time::Duration,
    pub rate_limit_backoff: std::time::Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            request_timeout: std::time::Duration::from_secs(120),
            rate_limit_backoff: std::time::Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl ApiResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Claude-backed oracle with sequential model fallback.
#[derive(Clone)]
pub struct ClaudeOracle {
    client: Client,
    api_key: String,
    config: OracleConfig,
}

impl ClaudeOracle {
    pub fn new(api_key: String, config: OracleConfig) -> Result<Self, OracleError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Probes the configured models in order, returning the first successful
    /// text response. A rate-limit-class failure (429/529) waits out the
    /// configured backoff before the next attempt; other failures move on
    /// immediately.
    async fn call(&self, prompt: &str, system: &str) -> Result<String, OracleError> {
        let mut last_error: Option<OracleError> = None;

        for model in &self.config.models {
            match self.call_model(model, prompt, system).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    warn!("model {model} failed: {err}");
                    let rate_limited =
                        matches!(&err, OracleError::Api { status, .. } if *status == 429 || *status == 529);
                    last_error = Some(err);
                    if rate_limited {
                        tokio::time::sleep(self.config.rate_limit_backoff).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or(OracleError::ModelsExhausted {
            attempted: self.config.models.len(),
        }))
    }

    async fn call_model(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, OracleError> {
        let request_body = AnthropicRequest {
            model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(OracleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: ApiResponse = response.json().await?;
        debug!(
            "oracle call succeeded: model={model}, input_tokens={}, output_tokens={}",
            api_response.usage.input_tokens, api_response.usage.output_tokens
        );

        api_response
            .text()
            .map(str::to_string)
            .ok_or(OracleError::EmptyContent)
    }

    async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, OracleError> {
        let text = self.call(prompt, system).await?;
        parse_oracle_json(&text)
    }
}

#[async_trait]
impl Oracle for ClaudeOracle {
    async fn extract_structured(&self, text: &str) -> Result<Value, OracleError> {
        let prompt = prompts::EXTRACT_PROMPT.replace("{resume_text}", text);
        self.call_json(&prompt, prompts::EXTRACT_SYSTEM).await
    }

    async fn evaluate(&self, profile: &ExtractedProfile) -> Result<AnalysisResult, OracleError> {
        let profile_json = serde_json::to_string_pretty(profile)?;
        let prompt = prompts::EVALUATE_PROMPT.replace("{profile_json}", &profile_json);
        self.call_json(&prompt, prompts::EVALUATE_SYSTEM).await
    }

    async fn match_job(
        &self,
        profile: &ExtractedProfile,
        job_description: &str,
    ) -> Result<MatchResult, OracleError> {
        let profile_json = serde_json::to_string_pretty(profile)?;
        let prompt = prompts::MATCH_PROMPT
            .replace("{profile_json}", &profile_json)
            .replace("{job_description}", job_description);
        self.call_json(&prompt, prompts::MATCH_SYSTEM).await
    }
}

/// Parses model output into JSON, tolerating markdown fences and prose
/// around the object. Falls back to the largest balanced `{...}` span
/// before giving up.
pub fn parse_oracle_json<T: DeserializeOwned>(text: &str) -> Result<T, OracleError> {
    let stripped = strip_json_fences(text);
    match serde_json::from_str(stripped) {
        Ok(value) => Ok(value),
        Err(first_err) => match largest_json_object(stripped) {
            Some(span) => serde_json::from_str(span).map_err(OracleError::Parse),
            None => Err(OracleError::Parse(first_err)),
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or_else(|| stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or_else(|| stripped.trim_start())
    } else {
        text
    }
}

/// Finds the largest balanced `{...}` span, skipping braces inside string
/// literals. Returns `None` when no balanced object exists.
fn largest_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut best: Option<(usize, usize)> = None;
    let mut start: Option<usize> = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            b'}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        let s = start.take().unwrap_or(i);
                        let span = (s, i + 1);
                        if best.map_or(true, |(bs, be)| span.1 - span.0 > be - bs) {
                            best = Some(span);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    best.map(|(s, e)| &text[s..e])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_largest_object_in_prose() {
        let input = "Here is the result you asked for: {\"a\": 1} — hope it helps!";
        assert_eq!(largest_json_object(input), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_largest_object_picks_biggest() {
        let input = "{\"a\":1} then {\"b\": {\"nested\": true}, \"c\": 2}";
        assert_eq!(
            largest_json_object(input),
            Some("{\"b\": {\"nested\": true}, \"c\": 2}")
        );
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let input = "{\"text\": \"has a } brace\"}";
        assert_eq!(largest_json_object(input), Some(input));
    }

    #[test]
    fn test_no_object_is_none() {
        assert_eq!(largest_json_object("no json here"), None);
    }

    #[test]
    fn test_parse_oracle_json_recovers_wrapped_object() {
        let wrapped = "Sure! The profile is: {\"name\": \"Jane\"} Let me know.";
        let value: Value = parse_oracle_json(wrapped).unwrap();
        assert_eq!(value["name"], "Jane");
    }

    #[test]
    fn test_parse_oracle_json_plain() {
        let value: Value = parse_oracle_json("{\"ok\": true}").unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_parse_oracle_json_unparseable_is_error() {
        let result: Result<Value, _> = parse_oracle_json("not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_models_ordered() {
        let config = OracleConfig::default();
        assert_eq!(config.models.len(), 2);
        assert_eq!(config.models[0], "claude-sonnet-4-5");
        assert_eq!(config.rate_limit_backoff, std::time::Duration::from_secs(1));
    }
}
