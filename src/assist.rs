//! AI assist
//!
//! Sends the user's instruction plus the current document to a remote
//! text-generation endpoint and turns the reply into replacement content.
//! The caller applies the replacement only on success; a failed call leaves
//! the document untouched.
//!
//! Overlapping calls are neither cancelled nor de-duplicated: if two
//! requests are in flight, the last response to resolve wins.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A hung endpoint should not leave the caller waiting forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure modes of one assist invocation.
#[derive(Debug)]
pub enum AssistError {
    /// The endpoint answered with a non-success status.
    RequestFailed { status: u16 },
    /// The response body did not contain generated text where expected.
    MalformedResponse,
    /// Network-level failure (connect, timeout, body read, decode).
    Transport(reqwest::Error),
}

impl fmt::Display for AssistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssistError::RequestFailed { status } => {
                write!(f, "API request failed with status {}", status)
            }
            AssistError::MalformedResponse => {
                write!(f, "API response did not contain generated text")
            }
            AssistError::Transport(err) => write!(f, "API request error: {}", err),
        }
    }
}

impl std::error::Error for AssistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssistError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AssistError {
    fn from(err: reqwest::Error) -> Self {
        AssistError::Transport(err)
    }
}

/// Request body: `{ contents: [{ parts: [{ text }] }] }`.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Success body carries generated text at `candidates[0].content.parts[0].text`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Client for the remote generation endpoint.
#[derive(Debug, Clone)]
pub struct AssistClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AssistClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, AssistError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Send instruction + current content; return the replacement content.
    pub async fn generate(
        &self,
        instruction: &str,
        current_content: &str,
    ) -> Result<String, AssistError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: combine_prompt(instruction, current_content),
                }],
            }],
        };

        let url = if self.api_key.is_empty() {
            self.endpoint.clone()
        } else {
            format!("{}?key={}", self.endpoint, self.api_key)
        };

        log::debug!("assist request to {}", self.endpoint);
        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let data: GenerateResponse = response.json().await?;
        let text = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(AssistError::MalformedResponse)?;

        Ok(extract_replacement(&text))
    }
}

/// Combine the instruction and the current document into the single
/// natural-language request the endpoint expects.
pub fn combine_prompt(instruction: &str, current_content: &str) -> String {
    format!(
        "Prompt: {}\n\nCurrent HTML Code:\n```html\n{}\n```",
        instruction, current_content
    )
}

/// Extract replacement content from the model's reply: the first fenced
/// block tagged `html` if one exists, otherwise the whole reply verbatim.
///
/// This is a heuristic over unstructured model output; with multiple fenced
/// blocks only the first is taken.
pub fn extract_replacement(response: &str) -> String {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| {
        Regex::new(r"(?s)```html\n(.*?)\n```").expect("fence pattern compiles")
    });

    match fence.captures(response) {
        Some(caps) => caps[1].to_string(),
        None => response.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_prompt_shape() {
        let prompt = combine_prompt("Add a footer", "<p>x</p>");
        assert!(prompt.starts_with("Prompt: Add a footer\n\n"));
        assert!(prompt.contains("```html\n<p>x</p>\n```"));
    }

    #[test]
    fn test_extract_fenced_block() {
        let reply = "Here you go:\n```html\n<h1>done</h1>\n```\nLet me know!";
        assert_eq!(extract_replacement(reply), "<h1>done</h1>");
    }

    #[test]
    fn test_extract_without_fence_is_verbatim() {
        let reply = "<h1>just markup</h1>";
        assert_eq!(extract_replacement(reply), reply);
    }

    #[test]
    fn test_extract_first_of_multiple_blocks() {
        let reply = "```html\n<p>one</p>\n```\ntext\n```html\n<p>two</p>\n```";
        assert_eq!(extract_replacement(reply), "<p>one</p>");
    }

    #[test]
    fn test_extract_multiline_block() {
        let reply = "```html\n<div>\n  <p>a</p>\n</div>\n```";
        assert_eq!(extract_replacement(reply), "<div>\n  <p>a</p>\n</div>");
    }

    #[test]
    fn test_response_text_path() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"hello"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).expect("parse response");
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text);
        assert_eq!(text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_response_missing_candidates_is_malformed() {
        let body = r#"{"promptFeedback":{}}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).expect("parse response");
        assert!(parsed.candidates.is_empty());
    }
}
