//! Persona prompt and the per-turn prompt layout.
//!
//! Every model call is laid out the same way:
//!
//! ```text
//! system: <persona>
//! system: Context summary: <summary>
//! <short-term history, oldest first>
//! ```

use crate::types::ChatMessage;

/// The assistant persona. `{assistant_name}` is filled in at render time.
pub const DEFAULT_PERSONA: &str = r"You are {assistant_name}: helpful, smart, slightly flirty, teasing, and motivational depending on the user's mood.
Keep replies natural and concise, and avoid combining multiple unrelated sentences.
Do NOT generate long paragraphs unless required.";

/// Wraps the computed context summary.
pub const CONTEXT_TEMPLATE: &str = "Context summary: {summary}";

/// Render a template by replacing `{key}` placeholders with values.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// The persona system prompt: `custom` if configured, else
/// [`DEFAULT_PERSONA`]. Both may use `{assistant_name}`.
#[must_use]
pub fn persona(custom: Option<&str>, assistant_name: &str) -> String {
    let template = custom.filter(|c| !c.trim().is_empty()).unwrap_or(DEFAULT_PERSONA);
    render_template(template, &[("assistant_name", assistant_name)])
}

/// The full transcript for one model call.
#[must_use]
pub fn build_messages(persona: &str, summary: &str, history: impl IntoIterator<Item = ChatMessage>) -> Vec<ChatMessage> {
    let mut messages = vec![
        ChatMessage::system(persona),
        ChatMessage::system(render_template(CONTEXT_TEMPLATE, &[("summary", summary)])),
    ];
    messages.extend(history);
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatRole;

    #[test]
    fn render_replaces_every_occurrence() {
        assert_eq!(render_template("{a} and {a}, {b}", &[("a", "x"), ("b", "y")]), "x and x, y");
        assert_eq!(render_template("{missing}", &[]), "{missing}");
    }

    #[test]
    fn persona_falls_back_to_default() {
        let text = persona(None, "Azrion");
        assert!(text.starts_with("You are Azrion:"));
        assert_eq!(persona(Some("  "), "Azrion"), text);
        assert_eq!(persona(Some("I am {assistant_name}."), "Nyx"), "I am Nyx.");
    }

    #[test]
    fn layout_is_persona_summary_history() {
        let messages = build_messages(
            "persona",
            "Top topics: rust. Habits: code:1.",
            vec![ChatMessage::user("hi"), ChatMessage::assistant("hey")],
        );
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], ChatMessage::system("persona"));
        assert_eq!(messages[1].content, "Context summary: Top topics: rust. Habits: code:1.");
        assert_eq!(messages[1].role, ChatRole::System);
        assert_eq!(messages[3].role, ChatRole::Assistant);
    }
}
