// src/llm/emotion.rs
// Emotion classification on top of the Gemini client. Detection is total:
// every failure path degrades to a neutral result instead of an error so the
// expression endpoint always answers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::gemini::{GeminiClient, GenerationConfig};

/// Closed label set the classifier is allowed to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Anxious,
    Neutral,
    Confused,
    Excited,
    Fearful,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Anxious => "anxious",
            Emotion::Neutral => "neutral",
            Emotion::Confused => "confused",
            Emotion::Excited => "excited",
            Emotion::Fearful => "fearful",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy" => Ok(Emotion::Happy),
            "sad" => Ok(Emotion::Sad),
            "angry" => Ok(Emotion::Angry),
            "anxious" => Ok(Emotion::Anxious),
            "neutral" => Ok(Emotion::Neutral),
            "confused" => Ok(Emotion::Confused),
            "excited" => Ok(Emotion::Excited),
            "fearful" => Ok(Emotion::Fearful),
            _ => Err(()),
        }
    }
}

/// Classification outcome. `details` carries a diagnostic when the result is
/// a fallback rather than a model answer.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionResult {
    pub emotion: Emotion,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl EmotionResult {
    fn fallback(details: &str) -> Self {
        Self {
            emotion: Emotion::Neutral,
            confidence: 0.5,
            details: Some(details.to_string()),
        }
    }
}

// Greedy span from the first `{` to the last `}`, tolerant of prose the
// model wraps around the JSON object.
static JSON_OBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{.*\}").unwrap_or_else(|e| panic!("invalid JSON object regex: {e}"))
});

fn extract_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT_RE.find(text).map(|m| m.as_str())
}

#[derive(Debug, Deserialize)]
struct RawEmotion {
    emotion: String,
    confidence: f64,
    details: Option<String>,
}

fn parse_emotion_reply(raw: &str) -> Result<EmotionResult, String> {
    let json_str =
        extract_json_object(raw).ok_or_else(|| "reply contained no JSON object".to_string())?;

    let parsed: RawEmotion =
        serde_json::from_str(json_str).map_err(|e| format!("reply JSON did not parse: {e}"))?;

    let emotion = Emotion::from_str(parsed.emotion.trim())
        .map_err(|_| format!("unknown emotion label '{}'", parsed.emotion))?;

    Ok(EmotionResult {
        emotion,
        confidence: parsed.confidence.clamp(0.0, 1.0),
        details: parsed.details,
    })
}

pub struct EmotionDetector {
    client: Arc<GeminiClient>,
}

impl EmotionDetector {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }

    fn build_instruction(message: &str) -> String {
        format!(
            "Analyze the following message and determine the primary emotion expressed.\n\n\
             Message: \"{message}\"\n\n\
             Respond with a JSON object containing:\n\
             1. \"emotion\": One of [happy, sad, angry, anxious, neutral, confused, excited, fearful]\n\
             2. \"confidence\": A number between 0 and 1 indicating confidence in the assessment\n\n\
             Only respond with the JSON object, nothing else."
        )
    }

    /// Classify `text` into one of the known emotions. Provider failures and
    /// malformed replies both degrade to neutral at confidence 0.5 with a
    /// diagnostic in `details`.
    pub async fn detect(&self, text: &str) -> EmotionResult {
        info!(text_len = text.len(), "Sending emotion detection request");

        let instruction = Self::build_instruction(text);
        let raw = match self
            .client
            .generate(&instruction, &[], &GenerationConfig::default())
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Emotion detection request failed");
                return EmotionResult::fallback("Error occurred during emotion detection");
            }
        };

        match parse_emotion_reply(&raw) {
            Ok(result) => {
                info!(
                    emotion = %result.emotion,
                    confidence = result.confidence,
                    "Emotion detected"
                );
                result
            }
            Err(reason) => {
                warn!(%reason, "Failed to parse emotion detection response");
                EmotionResult::fallback("Failed to parse emotion detection response")
            }
        }
    }
}
