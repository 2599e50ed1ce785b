//! Message assembler.
//!
//! Combines the fresh system prompt, the bounded history window, and the
//! new user turn (text-only or text+chart) into the ordered message list
//! the backend expects. Pure given its inputs; the engine performs the
//! window fetch.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use hydra_types::chat::{ContentPart, ImageUrl, Turn};

/// Text prefix prepended to the user's message when a chart is attached.
pub const CHART_PROMPT_PREFIX: &str = "Analyze this trading chart: ";

/// The assembled request messages plus the standalone user turn.
///
/// The user turn is kept separately because it is what gets persisted into
/// history after a successful exchange -- the system turn never is.
#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    /// System turn first, then the window, then the new user turn.
    pub messages: Vec<Turn>,
    /// The new user turn on its own, for later history persistence.
    pub user_turn: Turn,
    /// Whether the user turn carries a chart image.
    pub has_image: bool,
}

/// Assemble the ordered message list for one inbound turn.
///
/// With an image, the user turn becomes a two-part multimodal message: a
/// text part (`"Analyze this trading chart: " + text`) followed by an
/// `image_url` part carrying the base64-encoded bytes as a `data:` URI.
/// Uploads are labeled JPEG regardless of actual source format.
pub fn assemble(
    window: Vec<Turn>,
    system_prompt: String,
    text: &str,
    image: Option<&[u8]>,
) -> AssembledPrompt {
    let has_image = image.is_some();

    let user_turn = match image {
        None => Turn::user(text),
        Some(bytes) => Turn::user_parts(vec![
            ContentPart::Text {
                text: format!("{CHART_PROMPT_PREFIX}{text}"),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:image/jpeg;base64,{}", BASE64.encode(bytes)),
                },
            },
        ]),
    };

    let mut messages = Vec::with_capacity(window.len() + 2);
    messages.push(Turn::system(system_prompt));
    messages.extend(window);
    messages.push(user_turn.clone());

    AssembledPrompt {
        messages,
        user_turn,
        has_image,
    }
}
