//! Chat-message boundary: text in, reply out.
//!
//! This is what a chat integration calls for every incoming message. It does
//! not talk to any chat platform itself; it tells the caller what to send:
//! nothing, an image attachment, or a failure notice quoting the expression
//! and LaTeX's complaint.

use crate::config::RenderConfig;
use crate::error::{ExtractError, RenderError};
use crate::extract::{extract, RenderRequest};
use crate::output::RenderedImage;
use crate::render::render;
use tracing::info;

/// Short usage hint, suitable for a bot's status line.
pub const USAGE_HINT: &str = "$$ <LaTeX> $$";

/// What the integration should post in response to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Attach `image` (as `image/png`, named `render.png`) with `caption`.
    Image {
        caption: String,
        image: RenderedImage,
    },
    /// Post `text` as a reply to the original message.
    Failure { text: String },
}

/// Extract, render, and compose the reply for one chat message.
///
/// # Returns
/// - `Ok(None)` — the message contains no expression; say nothing
/// - `Ok(Some(reply))` — post `reply`
/// - `Err(ExtractError)` — the expression's `[N]` suffix is unusable
pub async fn handle_message(
    text: &str,
    config: &RenderConfig,
) -> Result<Option<Reply>, ExtractError> {
    let Some(request) = extract(text)? else {
        return Ok(None);
    };
    info!("Expression detected in message: {}", text);

    let result = render(request.clone(), config).await;
    Ok(Some(compose_reply(&request, result)))
}

/// Turn a render result into the reply for `request`.
pub fn compose_reply(request: &RenderRequest, result: Result<RenderedImage, RenderError>) -> Reply {
    match result {
        Ok(image) => Reply::Image {
            caption: format!("`{}`", request.expression()),
            image,
        },
        Err(e) => Reply::Failure {
            text: failure_text(request.expression(), e.diagnostic().unwrap_or("")),
        },
    }
}

/// ``Couldn't render expression: `expr` ```diagnostic``` ``
pub fn failure_text(expression: &str, diagnostic: &str) -> String {
    format!("Couldn't render expression: `{expression}` ```{diagnostic}```")
}
