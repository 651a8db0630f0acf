// Plain-text rendering of the card area for the terminal client

use crate::client::form::FormErrors;
use crate::client::state::{CardSession, CardState, Notification};
use crate::types::GenerationResult;

const CARD_WIDTH: usize = 64;
const AI_BADGE: &str = "✨ AI Generated";

/// Word-wrap `text` to `width` columns (counted in chars).
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn render_card(result: &GenerationResult, regenerating: bool) -> String {
    let rule = "─".repeat(CARD_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("╭{}\n", rule));
    out.push_str(&format!("│ {}   {}\n", result.title, AI_BADGE));
    out.push_str("│\n");
    for line in wrap(&result.description, CARD_WIDTH - 2) {
        out.push_str(&format!("│ {}\n", line));
    }
    out.push_str("│\n");
    let tags: Vec<String> = result.tags.iter().map(|tag| format!("[{}]", tag)).collect();
    for line in wrap(&tags.join(" "), CARD_WIDTH - 2) {
        out.push_str(&format!("│ {}\n", line));
    }
    out.push_str("│\n");
    if regenerating {
        out.push_str("│ ⟳ Regenerating...\n");
    } else {
        out.push_str("│ [r] Regenerate\n");
    }
    out.push_str(&format!("╰{}\n", rule));
    out
}

pub fn render_skeleton() -> String {
    let rule = "─".repeat(CARD_WIDTH);
    format!(
        "╭{rule}\n│ ░░░░░░░░░░░░░░░░░░░░\n│\n│ ░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░\n│ ░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░\n│\n│ ░░░░░ ░░░░░ ░░░░░ ░░░░░ ░░░░░\n│ Generating...\n╰{rule}\n",
        rule = rule
    )
}

pub fn render_empty() -> String {
    "Your generated card will appear here.\nFill the form and click Generate →\n".to_string()
}

pub fn render_state(state: &CardState) -> String {
    match state {
        CardState::Idle => render_empty(),
        CardState::Loading => render_skeleton(),
        CardState::Ready(result) => render_card(result, false),
        CardState::Regenerating(result) => render_card(result, true),
    }
}

pub fn render_notification(notification: &Notification) -> String {
    format!("⚠ {}\n  {}\n", notification.title, notification.description)
}

pub fn render_field_errors(errors: &FormErrors) -> String {
    let mut out = String::new();
    if let Some(message) = errors.product_name {
        out.push_str(&format!("  Product Name: {}\n", message));
    }
    if let Some(message) = errors.category {
        out.push_str(&format!("  Category: {}\n", message));
    }
    out
}

/// Card area followed by any pending notification.
pub fn render_session(session: &CardSession) -> String {
    let mut out = render_state(session.state());
    if let Some(notification) = session.notification() {
        out.push_str(&render_notification(notification));
    }
    out
}
