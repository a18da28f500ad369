//! Preview-safe code normalizer
//!
//! Rewrites a generated component fragment into a standalone script that the
//! sandbox can evaluate against the live scope: imports and exports are
//! dropped, icon names are aligned with the scope, and a single
//! `render(<Component />)` call is appended.

use super::scope::Scope;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Name given to components synthesized around bare JSX
pub const GENERATED_COMPONENT: &str = "GeneratedPreview";

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```[\w+-]*[ \t]*\r?\n?").unwrap());

static FENCE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n?```\s*$").unwrap());

static IMPORT_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+(?:[^;'"]*?\s*from\s*)?['"][^'"\n]*['"][ \t]*;?[ \t]*$"#)
        .unwrap()
});

static EXPORT_AGGREGATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*export\s*(?:type\s*)?(?:\{[^}]*\}|\*(?:\s+as\s+[\w$]+)?)(?:\s*from\s*['"][^'"\n]*['"])?[ \t]*;?[ \t]*$"#,
    )
    .unwrap()
});

static EXPORT_DEFAULT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+default\s+([A-Za-z_$][\w$]*)[ \t]*;?[ \t]*$").unwrap()
});

static EXPORT_DEFAULT_ANONYMOUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)export\s+default\s+(\(|async\s*\(|async\s+function\s*\(|function\s*\()")
        .unwrap()
});

static EXPORT_DEFAULT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+default\s+(?:async\s+)?(?:function|class)\s+([A-Za-z_$][\w$]*)")
        .unwrap()
});

static EXPORT_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)export\s+(?:default\s+)?").unwrap());

static ICON_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([A-Z]\w*?)Icon\b").unwrap());

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").unwrap());

static COMPONENT_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfunction\s+([A-Z][\w$]*)").unwrap());

static COMPONENT_BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:const|let|var)\s+([A-Z][\w$]*)\s*(?::[^=\n]+)?=").unwrap()
});

static COMPONENT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+([A-Z][\w$]*)").unwrap());

/// A top-level `render(<...>)` invocation; class `render()` methods never match
static RENDER_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^render\s*\(\s*<").unwrap());

static JSX_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z][\w.]*(?:\s|/?>|$)|</[A-Za-z][\w.]*\s*>|<>").unwrap());

static RETURN_JSX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\breturn\s*\(?\s*<").unwrap());

static OPENING_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(?:[A-Za-z]|>)").unwrap());

/// Rewrites generated fragments into evaluable preview scripts
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    scope: &'a Scope,
    strip_icon_suffix: bool,
    keep_icon_stems: Vec<String>,
}

impl<'a> Normalizer<'a> {
    pub fn new(scope: &'a Scope) -> Self {
        Self {
            scope,
            strip_icon_suffix: true,
            keep_icon_stems: Vec::new(),
        }
    }

    /// Enable or disable the `Icon` suffix rewrite
    pub fn with_icon_rewrite(mut self, enabled: bool) -> Self {
        self.strip_icon_suffix = enabled;
        self
    }

    /// Extra stems whose `...Icon` tags are never rewritten
    pub fn with_keep_icon_stems(mut self, stems: Vec<String>) -> Self {
        self.keep_icon_stems = stems;
        self
    }

    /// Normalize a fenced or raw fragment.
    ///
    /// Returns an empty string when there is nothing to preview; otherwise
    /// the script contains exactly one top-level `render(...)` call.
    pub fn normalize(&self, code: &str) -> String {
        if code.trim().is_empty() {
            return String::new();
        }

        let cleaned = strip_fences(code);
        let cleaned = strip_imports(&cleaned);
        let (cleaned, default_export) = strip_exports(&cleaned);
        let cleaned = if self.strip_icon_suffix {
            self.rewrite_icons(&cleaned)
        } else {
            cleaned
        };
        let cleaned = collapse_blank_lines(&cleaned);

        if cleaned.is_empty() {
            return String::new();
        }

        if RENDER_CALL.is_match(&cleaned) {
            return cleaned;
        }

        // A default export names the page; helpers declared above it are not the entry
        if let Some(name) = default_export
            .filter(|name| starts_uppercase(name))
            .or_else(|| detect_component(&cleaned))
        {
            return append_render(cleaned, &name);
        }

        if JSX_TAG.is_match(&cleaned) {
            return append_render(wrap_fragment(&cleaned), GENERATED_COMPONENT);
        }

        String::new()
    }

    fn rewrite_icons(&self, code: &str) -> String {
        ICON_TAG
            .replace_all(code, |caps: &Captures| {
                let stem = &caps[2];
                if self.keeps_suffix(stem) {
                    caps[0].to_string()
                } else {
                    format!("<{}{}", &caps[1], stem)
                }
            })
            .into_owned()
    }

    fn keeps_suffix(&self, stem: &str) -> bool {
        self.keep_icon_stems.iter().any(|keep| keep == stem) || self.scope.keeps_icon_suffix(stem)
    }
}

/// Normalize with the live scope and default settings
pub fn normalize(code: &str) -> String {
    Normalizer::new(Scope::live()).normalize(code)
}

fn strip_fences(code: &str) -> String {
    let opened = FENCE_OPEN.replace(code, "");
    FENCE_CLOSE.replace(&opened, "").into_owned()
}

fn strip_imports(code: &str) -> String {
    IMPORT_STATEMENT.replace_all(code, "").into_owned()
}

/// Drop export syntax, returning the default-exported name when there is one
fn strip_exports(code: &str) -> (String, Option<String>) {
    let default_export = EXPORT_DEFAULT_DECL
        .captures(code)
        .or_else(|| EXPORT_DEFAULT_NAME.captures(code))
        .map(|caps| caps[1].to_string());

    let code = EXPORT_AGGREGATE.replace_all(code, "");
    let code = EXPORT_DEFAULT_NAME.replace_all(&code, "");
    let (code, default_export) = if EXPORT_DEFAULT_ANONYMOUS.is_match(&code) {
        let replacement = format!("${{1}}const {} = ${{2}}", GENERATED_COMPONENT);
        let named = EXPORT_DEFAULT_ANONYMOUS.replace(&code, replacement.as_str());
        (named.into_owned(), Some(GENERATED_COMPONENT.to_string()))
    } else {
        (code.into_owned(), default_export)
    };
    let code = EXPORT_KEYWORD.replace_all(&code, "${1}").into_owned();

    (code, default_export)
}

fn collapse_blank_lines(code: &str) -> String {
    BLANK_RUN.replace_all(code, "\n\n").trim().to_string()
}

/// Find the component to render: an uppercase function, then an uppercase
/// binding, then an uppercase class
pub fn detect_component(code: &str) -> Option<String> {
    COMPONENT_FUNCTION
        .captures(code)
        .or_else(|| COMPONENT_BINDING.captures(code))
        .or_else(|| COMPONENT_CLASS.captures(code))
        .map(|caps| caps[1].to_string())
}

fn append_render(mut code: String, name: &str) -> String {
    code.push_str(&format!("\n\nrender(<{} />);", name));
    code
}

fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Build a component around a fragment that has JSX but no declaration
fn wrap_fragment(code: &str) -> String {
    if RETURN_JSX.is_match(code) {
        return format!(
            "function {}() {{\n{}\n}}",
            GENERATED_COMPONENT,
            indent(code.lines(), 1)
        );
    }

    let (setup, markup) = partition_lines(code);

    let mut body = String::new();
    if !setup.is_empty() {
        body.push_str(&indent(setup.iter().copied(), 1));
        body.push_str("\n\n");
    }
    body.push_str("  return (\n    <>\n");
    body.push_str(&indent(markup.iter().copied(), 3));
    body.push_str("\n    </>\n  );");

    format!("function {}() {{\n{}\n}}", GENERATED_COMPONENT, body)
}

/// Split lines into setup statements and JSX lines.
///
/// A line starting with `<` enters markup; markup ends once the open-tag
/// depth returns to zero.
fn partition_lines(code: &str) -> (Vec<&str>, Vec<&str>) {
    let mut setup = Vec::new();
    let mut markup = Vec::new();
    let mut in_markup = false;
    let mut depth: i32 = 0;

    for line in code.lines() {
        let trimmed = line.trim();
        if !in_markup && trimmed.starts_with('<') {
            in_markup = true;
            depth = 0;
        }

        if in_markup {
            markup.push(line);
            depth += tag_depth_delta(trimmed);
            if depth <= 0 {
                in_markup = false;
            }
        } else if !trimmed.is_empty() {
            setup.push(line);
        }
    }

    (setup, markup)
}

fn tag_depth_delta(line: &str) -> i32 {
    let opens = OPENING_TAG.find_iter(line).count() as i32;
    let fragment_closes = line.matches("</>").count() as i32;
    let closes = line.matches("</").count() as i32 + line.matches("/>").count() as i32
        - fragment_closes;
    opens - closes
}

fn indent<'a>(lines: impl Iterator<Item = &'a str>, level: usize) -> String {
    let pad = "  ".repeat(level);
    lines
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
