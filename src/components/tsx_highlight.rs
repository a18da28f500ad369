use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// TypeScript/JSX keywords that should be highlighted
const TSX_KEYWORDS: &[&str] = &[
    "as",
    "async",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "default",
    "else",
    "export",
    "extends",
    "false",
    "for",
    "from",
    "function",
    "if",
    "import",
    "interface",
    "let",
    "new",
    "null",
    "of",
    "return",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "type",
    "typeof",
    "undefined",
    "var",
    "while",
];

/// Token types for TSX syntax
#[derive(Debug, PartialEq, Clone)]
enum Token {
    Keyword(String),
    String(String),
    Number(String),
    Comment(String),
    /// Capitalised identifier: a component, icon or type
    Component(String),
    Identifier(String),
    Whitespace(String),
    Punctuation(String),
}

/// Simple TSX tokenizer
fn tokenize(code: &str) -> Vec<Token> {
    let chars: Vec<char> = code.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    let flush = |current: &mut String, tokens: &mut Vec<Token>| {
        if !current.is_empty() {
            tokens.push(classify_word(current));
            current.clear();
        }
    };

    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();

        match ch {
            // String and template literals
            '\'' | '"' | '`' => {
                flush(&mut current, &mut tokens);
                let start = i;
                i += 1;
                while i < chars.len() {
                    if chars[i] == '\\' {
                        i += 2;
                        continue;
                    }
                    i += 1;
                    if chars[i - 1] == ch {
                        break;
                    }
                }
                let end = i.min(chars.len());
                tokens.push(Token::String(chars[start..end].iter().collect()));
            }
            // Single-line comments
            '/' if next == Some('/') => {
                flush(&mut current, &mut tokens);
                let start = i;
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                tokens.push(Token::Comment(chars[start..i].iter().collect()));
            }
            // Multi-line comments
            '/' if next == Some('*') => {
                flush(&mut current, &mut tokens);
                let start = i;
                i += 2;
                while i < chars.len() && !(chars[i] == '/' && chars[i - 1] == '*') {
                    i += 1;
                }
                i = (i + 1).min(chars.len());
                tokens.push(Token::Comment(chars[start..i].iter().collect()));
            }
            // Whitespace
            c if c.is_whitespace() => {
                flush(&mut current, &mut tokens);
                let start = i;
                while i < chars.len() && chars[i].is_whitespace() {
                    i += 1;
                }
                tokens.push(Token::Whitespace(chars[start..i].iter().collect()));
            }
            // Operators and punctuation
            '(' | ')' | '{' | '}' | '[' | ']' | ',' | ';' | '.' | ':' | '*' | '=' | '<'
            | '>' | '+' | '-' | '/' | '%' | '!' | '?' | '&' | '|' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Punctuation(ch.to_string()));
                i += 1;
            }
            // Everything else (identifiers, numbers, keywords)
            _ => {
                current.push(ch);
                i += 1;
            }
        }
    }

    flush(&mut current, &mut tokens);
    tokens
}

/// Classify a word as keyword, number, component or identifier
fn classify_word(word: &str) -> Token {
    if TSX_KEYWORDS.contains(&word) {
        Token::Keyword(word.to_string())
    } else if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '_') {
        Token::Number(word.to_string())
    } else if word.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        Token::Component(word.to_string())
    } else {
        Token::Identifier(word.to_string())
    }
}

/// Convert TSX source into highlighted ratatui Lines
pub fn highlight_tsx(code: &str) -> Vec<Line<'static>> {
    let tokens = tokenize(code);
    let mut lines = Vec::new();
    let mut current_line_spans = Vec::new();

    for token in tokens {
        let (style, text) = match token {
            Token::Keyword(s) => (
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
                s,
            ),
            Token::String(s) => (Style::default().fg(Color::Green), s),
            Token::Number(s) => (Style::default().fg(Color::LightMagenta), s),
            Token::Comment(s) => (Style::default().fg(Color::DarkGray), s),
            Token::Component(s) => (Style::default().fg(Color::Yellow), s),
            Token::Identifier(s) => (Style::default().fg(Color::White), s),
            Token::Whitespace(s) => (Style::default(), s),
            Token::Punctuation(s) => (Style::default().fg(Color::Gray), s),
        };

        // Split by newlines to create proper Lines
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(current_line_spans.clone()));
                current_line_spans.clear();
            }
            if !part.is_empty() {
                current_line_spans.push(Span::styled(part.to_string(), style));
            }
        }
    }

    if !current_line_spans.is_empty() {
        lines.push(Line::from(current_line_spans));
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_declaration() {
        let tokens = tokenize("const Card = 1;");

        assert_eq!(tokens[0], Token::Keyword("const".to_string()));
        assert_eq!(tokens[1], Token::Whitespace(" ".to_string()));
        assert_eq!(tokens[2], Token::Component("Card".to_string()));
        assert_eq!(tokens[4], Token::Punctuation("=".to_string()));
        assert_eq!(tokens[6], Token::Number("1".to_string()));
        assert_eq!(tokens[7], Token::Punctuation(";".to_string()));
    }

    #[test]
    fn test_tokenize_jsx_tag() {
        let tokens = tokenize("<Button variant=\"contained\" />");

        assert_eq!(tokens[0], Token::Punctuation("<".to_string()));
        assert_eq!(tokens[1], Token::Component("Button".to_string()));
        assert!(tokens.contains(&Token::Identifier("variant".to_string())));
        assert!(tokens.contains(&Token::String("\"contained\"".to_string())));
    }

    #[test]
    fn test_tokenize_escaped_and_unterminated_strings() {
        let tokens = tokenize(r"'it\'s' x");
        assert_eq!(tokens[0], Token::String(r"'it\'s'".to_string()));

        let tokens = tokenize("'open");
        assert_eq!(tokens, vec![Token::String("'open".to_string())]);
    }

    #[test]
    fn test_tokenize_comments() {
        let tokens = tokenize("a // note\n/* block */b");

        assert!(tokens.contains(&Token::Comment("// note".to_string())));
        assert!(tokens.contains(&Token::Comment("/* block */".to_string())));
        assert_eq!(tokens.last(), Some(&Token::Identifier("b".to_string())));
    }

    #[test]
    fn test_highlight_tsx_returns_lines() {
        let lines = highlight_tsx("function App() {\n  return <Box />;\n}");
        assert_eq!(lines.len(), 3);
        assert_eq!(highlight_tsx("").len(), 1);
    }
}
