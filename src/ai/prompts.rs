use super::model::ChatMessage;
use super::sanitize::MAX_DESCRIPTION_CHARS;

pub const DEFAULT_LANGUAGE: &str = "English";

/// Prompt for the live tag preview shown while the user types.
pub fn suggest_tag(description: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(format!(
        "From this task description:\n\"{}\"\n\nReturn ONLY one short tag (1-3 words).\nNo explanation.",
        description
    ))]
}

/// Prompt used when a task is saved. Stricter about the shape of the answer
/// since the reply is stored as-is after sanitizing.
pub fn tag_for_task(description: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(format!(
        "From the task description below:\n\"{}\"\n\nReturn ONLY ONE short tag (1-3 words).\nNo explanation. No sentence. No punctuation.",
        description
    ))]
}

pub fn describe(title: &str, language: &str) -> Vec<ChatMessage> {
    let mut rules = vec![
        format!("- Write ONLY in {}", language),
        "- Minimum 3 paragraphs".to_string(),
        format!("- Maximum {} characters", MAX_DESCRIPTION_CHARS),
        "- Professional tone".to_string(),
        "- Do NOT repeat the title".to_string(),
    ];
    if !language.eq_ignore_ascii_case(DEFAULT_LANGUAGE) {
        rules.insert(
            1,
            format!("- Do NOT use {} words; the whole text must be in {}", DEFAULT_LANGUAGE, language),
        );
    }

    vec![
        ChatMessage::system(format!(
            "You are a multilingual assistant. You MUST respond ONLY in {}.",
            language
        )),
        ChatMessage::user(format!(
            "Generate a detailed task description based on the title below.\n\nTitle:\n\"{}\"\n\nRules:\n{}",
            title,
            rules.join("\n")
        )),
    ]
}
