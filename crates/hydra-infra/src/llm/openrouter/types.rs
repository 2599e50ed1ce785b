//! OpenAI-compatible chat completions wire types.
//!
//! These are the HTTP request/response structures for the
//! `/chat/completions` endpoint. `Turn` already serializes to the wire
//! message shape, so the request body embeds it directly.

use serde::{Deserialize, Serialize};

use hydra_types::chat::Turn;

/// Request body for `POST {base_url}/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Response body: a list of choices, of which only the first is read.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydra_types::chat::{ContentPart, ImageUrl};

    #[test]
    fn test_request_wire_shape_with_chart() {
        let request = ChatCompletionRequest {
            model: "meta-llama/llama-4-maverick:free".to_string(),
            messages: vec![
                Turn::system("You are Shadow."),
                Turn::user_parts(vec![
                    ContentPart::Text {
                        text: "Analyze this trading chart: SPY".to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: "data:image/jpeg;base64,aGk=".to_string(),
                        },
                    },
                ]),
            ],
            temperature: 0.2,
            max_tokens: 800,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["content"], "You are Shadow.");
        assert_eq!(json["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,aGk="
        );
        assert_eq!(json["temperature"], 0.2);
    }

    #[test]
    fn test_response_parses_first_choice() {
        let body = r#"{
            "id": "gen-123",
            "model": "meta-llama/llama-4-maverick:free",
            "choices": [
                {"message": {"role": "assistant", "content": "Buy the dip."}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("Buy the dip.")
        );
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.choices.is_empty());
        assert!(response.model.is_none());
    }
}
