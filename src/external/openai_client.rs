// ABOUTME: OpenAI chat completion client for activity description suggestions
// ABOUTME: Any failure degrades to a fixed set of fallback suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-3.5-turbo";

/// Suggestions returned whenever generation is unavailable or fails
pub const DEFAULT_SUGGESTIONS: [&str; 4] = [
    "I love exploring new walking routes and discovering hidden gems in the city.",
    "Looking for motivated fitness companions who enjoy morning walks and healthy conversations.",
    "Passionate about wellness and building meaningful connections through shared activities.",
    "Training for my fitness goals and would love accountability buddies for regular activities.",
];

/// Context supplied for suggestion generation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    /// Selected activities, by title
    #[serde(default)]
    pub activities: Vec<ActivityContext>,
    pub location: Option<String>,
    pub preferred_time: Option<String>,
}

/// A single selected activity
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityContext {
    /// Display title, e.g. "Running"
    pub title: String,
}

/// Stateless prompt/response client for profile-description suggestions
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    content: String,
}

impl OpenAiClient {
    /// Create a client; a `None` key disables generation entirely
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Generate four brief personal activity descriptions
    ///
    /// Infallible by design: a missing key, HTTP failure, or unparseable
    /// completion all fall back to [`DEFAULT_SUGGESTIONS`].
    pub async fn generate_description_suggestions(
        &self,
        request: &SuggestionRequest,
    ) -> Vec<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return default_suggestions();
        };

        match self.request_suggestions(api_key, request).await {
            Ok(suggestions) => suggestions,
            Err(reason) => {
                warn!(%reason, "Suggestion generation failed, using fallback");
                default_suggestions()
            }
        }
    }

    async fn request_suggestions(
        &self,
        api_key: &str,
        request: &SuggestionRequest,
    ) -> Result<Vec<String>, String> {
        let prompt = build_prompt(request);

        let body = json!({
            "model": MODEL,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a helpful assistant that creates engaging, personal \
                                activity descriptions for a fitness buddy matching app. \
                                Keep responses brief and authentic."
                },
                { "role": "user", "content": prompt }
            ],
            "temperature": 0.8,
            "max_tokens": 400,
        });

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?
            .error_for_status()
            .map_err(|e| format!("API error: {e}"))?;

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| format!("malformed response: {e}"))?;

        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("[]");

        let suggestions: Vec<String> = serde_json::from_str(content)
            .map_err(|e| format!("completion is not a JSON string array: {e}"))?;
        if suggestions.is_empty() {
            return Err("completion contained no suggestions".to_owned());
        }
        Ok(suggestions)
    }
}

fn build_prompt(request: &SuggestionRequest) -> String {
    let activities_text = if request.activities.is_empty() {
        "walking and fitness activities".to_owned()
    } else {
        request
            .activities
            .iter()
            .map(|a| a.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let location_text = request
        .location
        .as_deref()
        .map(|l| format!(" in {l}"))
        .unwrap_or_default();
    let time_text = request
        .preferred_time
        .as_deref()
        .map(|t| format!(" who prefers {t}"))
        .unwrap_or_default();

    format!(
        "Generate 4 brief, engaging personal descriptions for someone interested in \
         {activities_text}{location_text}{time_text}.\n\n\
         Each suggestion should:\n\
         - Be 1-2 sentences long\n\
         - Sound personal and authentic\n\
         - Highlight motivation or interests\n\
         - Be suitable for a fitness/activity matching app\n\n\
         Return only the 4 suggestions as a JSON array of strings, no other text."
    )
}

fn default_suggestions() -> Vec<String> {
    DEFAULT_SUGGESTIONS.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::{build_prompt, ActivityContext, OpenAiClient, SuggestionRequest};

    #[test]
    fn prompt_includes_context() {
        let request = SuggestionRequest {
            activities: vec![
                ActivityContext {
                    title: "Running".to_owned(),
                },
                ActivityContext {
                    title: "Cycling".to_owned(),
                },
            ],
            location: Some("Lisbon".to_owned()),
            preferred_time: Some("mornings".to_owned()),
        };

        let prompt = build_prompt(&request);
        assert!(prompt.contains("Running, Cycling"));
        assert!(prompt.contains("in Lisbon"));
        assert!(prompt.contains("who prefers mornings"));
    }

    #[test]
    fn prompt_defaults_without_activities() {
        let prompt = build_prompt(&SuggestionRequest::default());
        assert!(prompt.contains("walking and fitness activities"));
    }

    #[tokio::test]
    async fn missing_key_falls_back() {
        let client = OpenAiClient::new(None);
        let suggestions = client
            .generate_description_suggestions(&SuggestionRequest::default())
            .await;
        assert_eq!(suggestions.len(), 4);
    }
}
