//! Conversation turn types.
//!
//! A [`Turn`] is one role-tagged message in a session's history. Turns
//! serialize directly to the OpenAI chat wire shape: content is either a
//! plain string or an ordered list of typed parts (`text`, `image_url`),
//! so the same type flows from the session store to the request body.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// An image reference inside a multimodal content part.
///
/// For chart uploads the URL is a `data:image/jpeg;base64,...` URI carrying
/// the encoded bytes inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// One typed part of a multimodal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// Message content: plain text or an ordered list of typed parts.
///
/// Untagged so the wire form is either a JSON string or a JSON array,
/// matching the OpenAI chat completions schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl TurnContent {
    /// The text carried by this content: the string itself, or the first
    /// text part of a multimodal list. Empty string if neither exists.
    pub fn text(&self) -> &str {
        match self {
            TurnContent::Text(text) => text,
            TurnContent::Parts(parts) => parts
                .iter()
                .find_map(|p| match p {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::ImageUrl { .. } => None,
                })
                .unwrap_or(""),
        }
    }
}

/// A single message in a conversation. Immutable once appended to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: MessageRole,
    pub content: TurnContent,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: TurnContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: TurnContent::Text(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: TurnContent::Text(content.into()),
        }
    }

    /// A user turn built from an ordered list of multimodal parts.
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::User,
            content: TurnContent::Parts(parts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_text_turn_wire_shape() {
        let turn = Turn::user("BTC outlook?");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "user", "content": "BTC outlook?"})
        );
    }

    #[test]
    fn test_multimodal_turn_wire_shape() {
        let turn = Turn::user_parts(vec![
            ContentPart::Text {
                text: "Analyze this trading chart: SPY daily".to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "data:image/jpeg;base64,aGk=".to_string(),
                },
            },
        ]);
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "Analyze this trading chart: SPY daily"},
                    {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,aGk="}}
                ]
            })
        );
    }

    #[test]
    fn test_turn_content_untagged_deserialize() {
        let text: TurnContent = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(text, TurnContent::Text("hello".to_string()));

        let parts: TurnContent =
            serde_json::from_str(r#"[{"type": "text", "text": "hi"}]"#).unwrap();
        assert!(matches!(parts, TurnContent::Parts(ref p) if p.len() == 1));
    }

    #[test]
    fn test_turn_content_text_accessor() {
        assert_eq!(TurnContent::Text("abc".into()).text(), "abc");

        let parts = TurnContent::Parts(vec![
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "data:image/jpeg;base64,".to_string(),
                },
            },
            ContentPart::Text {
                text: "caption".to_string(),
            },
        ]);
        assert_eq!(parts.text(), "caption");

        assert_eq!(TurnContent::Parts(Vec::new()).text(), "");
    }
}
