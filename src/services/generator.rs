//! Generator command construction

/// Placeholder replaced by the quoted prompt
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";

/// Environment variable carrying the raw prompt
pub const PROMPT_ENV: &str = "GENUI_PROMPT";

/// Build the shell command for a prompt.
///
/// Returns (full_command, display_command). The display form keeps the
/// placeholder so long prompts don't flood the status bar.
pub fn build_generator_command(template: &str, prompt: &str) -> (String, String) {
    let template = template.trim();
    let full_command = template.replace(PROMPT_PLACEHOLDER, &shell_quote(prompt));

    let display_command = match template.split_whitespace().next() {
        Some(program) if template.contains(PROMPT_PLACEHOLDER) => {
            format!("{} … {}", program, PROMPT_PLACEHOLDER)
        }
        _ => template.to_string(),
    };

    (full_command, display_command)
}

/// Quote `s` as a single POSIX shell word
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_quoted_into_template() {
        let (full, display) = build_generator_command("llm -s ui {prompt}", "A login form");
        assert_eq!(full, "llm -s ui 'A login form'");
        assert_eq!(display, "llm … {prompt}");
    }

    #[test]
    fn test_template_without_placeholder() {
        let (full, display) = build_generator_command(" ./generate.sh ", "ignored");
        assert_eq!(full, "./generate.sh");
        assert_eq!(display, "./generate.sh");
    }

    #[test]
    fn test_shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }
}
