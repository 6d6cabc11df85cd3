// Prompt text for writing suggestions.

/// System prompt for every suggestion call.
pub const SUGGEST_SYSTEM: &str = "You are a concise résumé and cover-letter writing assistant. \
    Answer with the requested text only, ready to paste into the document. \
    Do NOT add headings, explanations, or markdown formatting. \
    Do NOT invent employers, dates, degrees, or metrics the user did not provide.";

/// Longest user prompt accepted, in characters.
pub const MAX_PROMPT_CHARS: usize = 4_000;

/// Wraps the user's request so the model sees it as a single task.
pub fn build_suggest_prompt(request: &str) -> String {
    format!("Writing request:\n{}\n\nReturn only the finished text.", request.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_suggest_prompt_trims_request() {
        let prompt = build_suggest_prompt("  improve my summary \n");
        assert!(prompt.contains("Writing request:\nimprove my summary\n"));
    }
}
