//! Short reflective and nudge messages from a text-generation backend.
//!
//! Every failure here is absorbed: callers always receive displayable text,
//! either the generated message or a themed fallback.

pub mod broker;
pub mod gemini;

use crate::domain::MentalState;
use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

pub use broker::{Broker, MessageTag, Reply};
pub use gemini::GeminiClient;

/// Shown when a reflection request fails
pub const REFLECTION_FALLBACK: &str = "A quiet end to a meaningful verse. Sleep well.";
/// Shown when a reflection request succeeds with no text
pub const REFLECTION_EMPTY: &str = "May your intentional rest bring peace to the coming dawn.";
/// Shown when a drift request fails
pub const DRIFT_FALLBACK: &str = "Chirp... your focus is wandering. Shall we return to the song?";
/// Shown when a drift request succeeds with no text
pub const DRIFT_EMPTY: &str = "This verse awaits its ending. Shall we return?";

const REFLECTION_TEMPERATURE: f32 = 0.7;
const DRIFT_TEMPERATURE: f32 = 0.8;

/// Errors from a text-generation backend
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("no API key configured (set {0})")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed reply: {0}")]
    Malformed(String),
}

/// A text-generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, OracleError>;
}

/// Inputs for an end-of-slot reflection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionRequest {
    /// Zero-based day index
    pub day_index: usize,
    pub completed_tasks: usize,
    /// Slots logged today per mode
    pub mode_usage: BTreeMap<MentalState, u32>,
}

impl ReflectionRequest {
    pub fn prompt(&self) -> String {
        let usage = serde_json::to_string(&self.mode_usage).unwrap_or_else(|_| "{}".to_string());
        format!(
            "Generate a short, supportive, and elegant reflection message for a user finishing day {} \
             of their \"Twelve Days of Christmas\" intentionality journey. They completed {} tasks and \
             used modes like {}. Keep the tone bird or carol-inspired, subtle, and poetic. Max 2 sentences.",
            self.day_index + 1,
            self.completed_tasks,
            usage
        )
    }
}

fn drift_prompt(mode_label: &str) -> String {
    format!(
        "The user has drifted away from their {} session. Generate a gentle, carol-inspired nudge \
         to return to their task. Phrasing should be soft like \"Chirp... this song isn't finished yet\". \
         Max 15 words.",
        mode_label
    )
}

/// Ask for a reflection; never fails
pub async fn reflection_message(generator: &dyn TextGenerator, request: &ReflectionRequest) -> String {
    let reply = generator
        .generate(&request.prompt(), REFLECTION_TEMPERATURE)
        .await;
    settle(reply, REFLECTION_EMPTY, REFLECTION_FALLBACK, "reflection")
}

/// Ask for a drift nudge; never fails
pub async fn drift_message(generator: &dyn TextGenerator, mode_label: &str) -> String {
    let reply = generator
        .generate(&drift_prompt(mode_label), DRIFT_TEMPERATURE)
        .await;
    settle(reply, DRIFT_EMPTY, DRIFT_FALLBACK, "drift")
}

fn settle(
    reply: Result<String, OracleError>,
    empty: &str,
    fallback: &str,
    kind: &str,
) -> String {
    match reply {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => empty.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, kind, "text generation failed, using fallback");
            fallback.to_string()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedGenerator;
    use super::*;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_reflection_prompt_mentions_day_and_usage() {
        let mut usage = BTreeMap::new();
        usage.insert(MentalState::Soft, 2);
        usage.insert(MentalState::Sprint, 1);
        let request = ReflectionRequest {
            day_index: 0,
            completed_tasks: 3,
            mode_usage: usage,
        };
        let prompt = request.prompt();
        assert!(prompt.contains("finishing day 1 "));
        assert!(prompt.contains("completed 3 tasks"));
        assert!(prompt.contains(r#"{"SOFT":2,"SPRINT":1}"#));
    }

    #[test]
    fn test_reflection_uses_generated_text() {
        let generator = ScriptedGenerator::answering("  The doves settle softly.  ");
        let request = ReflectionRequest {
            day_index: 2,
            completed_tasks: 0,
            mode_usage: BTreeMap::new(),
        };
        let text = block_on(reflection_message(&generator, &request));
        assert_eq!(text, "The doves settle softly.");
    }

    #[test]
    fn test_reflection_fallback_on_failure() {
        let generator = ScriptedGenerator::failing();
        let request = ReflectionRequest {
            day_index: 2,
            completed_tasks: 0,
            mode_usage: BTreeMap::new(),
        };
        let text = block_on(reflection_message(&generator, &request));
        assert_eq!(text, REFLECTION_FALLBACK);
    }

    #[test]
    fn test_empty_replies_use_empty_fallbacks() {
        let generator = ScriptedGenerator::answering("   ");
        let request = ReflectionRequest {
            day_index: 0,
            completed_tasks: 0,
            mode_usage: BTreeMap::new(),
        };
        assert_eq!(block_on(reflection_message(&generator, &request)), REFLECTION_EMPTY);
        assert_eq!(block_on(drift_message(&generator, "Focus Mode")), DRIFT_EMPTY);
    }

    #[test]
    fn test_drift_prompt_and_fallback() {
        let generator = ScriptedGenerator::failing();
        let text = block_on(drift_message(&generator, "Sprint Mode"));
        assert_eq!(text, DRIFT_FALLBACK);

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("their Sprint Mode session"));
    }
}
