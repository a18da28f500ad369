//! Fenced code block extraction
//!
//! Finds the triple-backtick regions of a chat completion and titles each
//! one after the component it declares.

use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

/// A fenced region with its opening language tag and content
static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```([\w+-]*)[ \t]*\r?\n(.*?)```").unwrap());

static DEFAULT_EXPORT_FN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+default\s+function\s+([\w$]+)").unwrap());

static FUNCTION_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function\s+([\w$]+)").unwrap());

static BINDING_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:const|let|var)\s+([\w$]+)\s*=").unwrap());

/// Language tags that mark previewable code (an untagged fence counts too)
const PREVIEW_LANGUAGES: &[&str] = &["", "tsx", "ts", "jsx", "js", "javascript", "typescript"];

/// A single extracted code fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub code: String,
    pub title: String,
}

/// Extract previewable code blocks in document order.
///
/// Fences tagged with another language are consumed and skipped, blocks with
/// only whitespace are dropped, and an unterminated trailing fence yields
/// nothing until its closing marker arrives.
pub fn extract_code_blocks(text: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for range in block_ranges(text) {
        let code = text[range].to_string();
        let base = component_title(&code)
            .unwrap_or_else(|| format!("Component {}", blocks.len() + 1));
        let title = unique_title(base, &mut seen);

        blocks.push(CodeBlock { code, title });
    }

    blocks
}

/// Byte ranges of each previewable block's content, parallel to
/// [`extract_code_blocks`]
pub fn block_ranges(text: &str) -> Vec<Range<usize>> {
    FENCED_BLOCK
        .captures_iter(text)
        .filter(|caps| PREVIEW_LANGUAGES.contains(&caps[1].to_lowercase().as_str()))
        .filter_map(|caps| caps.get(2))
        .filter(|content| !content.as_str().trim().is_empty())
        .map(|content| content.range())
        .collect()
}

/// Pick a title from the declared component name, if any
pub fn component_title(code: &str) -> Option<String> {
    [&*DEFAULT_EXPORT_FN, &*FUNCTION_DECL, &*BINDING_DECL]
        .iter()
        .find_map(|re| re.captures(code).map(|caps| caps[1].to_string()))
}

fn unique_title(base: String, seen: &mut HashMap<String, usize>) -> String {
    let count = seen.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{} ({})", base, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fences_yields_nothing() {
        assert!(extract_code_blocks("Here is a description with no code.").is_empty());
        assert!(extract_code_blocks("").is_empty());
    }

    #[test]
    fn test_single_block_is_verbatim() {
        let text = "Sure!\n```tsx\nfunction Foo() {\n  return <div />;\n}\n```\nEnjoy.";
        let blocks = extract_code_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "function Foo() {\n  return <div />;\n}\n");
        assert_eq!(blocks[0].title, "Foo");
    }

    #[test]
    fn test_blocks_follow_document_order() {
        let text = "```jsx\nconst First = () => <a />;\n```\n\
                    text\n\
                    ```typescript\nfunction Second() { return null; }\n```\n\
                    ```\nexport default function Third() {}\n```";
        let titles: Vec<String> = extract_code_blocks(text)
            .into_iter()
            .map(|b| b.title)
            .collect();

        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_title_priority_prefers_default_export() {
        let code = "function Helper() {}\nexport default function Page() {}\n";
        assert_eq!(component_title(code), Some("Page".to_string()));

        let code = "const value = 1;\nfunction Widget() {}\n";
        assert_eq!(component_title(code), Some("Widget".to_string()));

        let code = "let Panel = styled(Box)({});\n";
        assert_eq!(component_title(code), Some("Panel".to_string()));
    }

    #[test]
    fn test_synthetic_titles_are_positional() {
        let text = "```tsx\n<Button />\n```\n```tsx\n<Chip />\n```";
        let blocks = extract_code_blocks(text);

        assert_eq!(blocks[0].title, "Component 1");
        assert_eq!(blocks[1].title, "Component 2");
    }

    #[test]
    fn test_duplicate_titles_are_numbered() {
        let text = "```tsx\nfunction App() {}\n```\n```tsx\nfunction App() {}\n```";
        let blocks = extract_code_blocks(text);

        assert_eq!(blocks[0].title, "App");
        assert_eq!(blocks[1].title, "App (2)");
    }

    #[test]
    fn test_foreign_language_fences_are_skipped() {
        let text = "```bash\nnpm install @mui/material\n```\n```tsx\nfunction Card() {}\n```";
        let blocks = extract_code_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Card");
    }

    #[test]
    fn test_unterminated_fence_is_ignored() {
        let text = "```tsx\nfunction Done() {}\n```\nNext:\n```tsx\nfunction Stream";
        let blocks = extract_code_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Done");
    }

    #[test]
    fn test_blank_blocks_are_dropped() {
        let blocks = extract_code_blocks("```tsx\n   \n```");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_block_ranges_match_blocks() {
        let text = "intro\n```bash\nls\n```\n```tsx\nconst A = 1;\n```\n```\n<Chip />\n```";
        let ranges = block_ranges(text);
        let blocks = extract_code_blocks(text);

        assert_eq!(ranges.len(), blocks.len());
        for (range, block) in ranges.into_iter().zip(&blocks) {
            assert_eq!(&text[range], block.code);
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "```tsx\nexport default function Profile() {\n  return <Card />;\n}\n```";
        let first = extract_code_blocks(text);
        let refenced = format!("```tsx\n{}```", first[0].code);
        let second = extract_code_blocks(&refenced);

        assert_eq!(first, second);
    }
}
