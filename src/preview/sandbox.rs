//! Static evaluation sandbox
//!
//! Checks a normalized script the way a live evaluator would fail on it
//! (syntax, missing `render`, unresolved names) and builds the element tree
//! of the rendered component. Nothing is executed.

use super::jsx::{self, JsxError, JsxNode};
use super::scope::{Scope, ScopeKind};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;
use thiserror::Error;

/// A top-level `render(...)` call with an argument; `render() {` methods are skipped
static RENDER_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^render\s*\(\s*[^)\s]").unwrap());

static RENDER_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^render\s*\(\s*<\s*([A-Za-z_$][\w$]*(?:\.[\w$]+)*)[^>]*/>\s*\)").unwrap()
});

static FUNCTION_OR_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:function|class)\s+([A-Za-z_$][\w$]*)").unwrap());

static BINDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)").unwrap());

static DESTRUCTURING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:const|let|var)\s*[\[{]([^\]}=]*)[\]}]").unwrap());

static PARAMETER_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\bfunction\s*[\w$]*\s*\(([^()]*)\)|\(([^()]*)\)\s*=>|([A-Za-z_$][\w$]*)\s*=>)")
        .unwrap()
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_$][\w$]*").unwrap());

static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z_$][\w$]*)((?:\.[\w$]+)*)").unwrap());

static MARKUP_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\breturn|=>)\s*\(?\s*<").unwrap());

/// Keywords that may directly precede a JSX expression
const JSX_PREFIX_KEYWORDS: &[&str] = &["return", "yield", "case", "default", "await"];

/// Why a preview could not be rendered
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvalError {
    #[error("SyntaxError: {message} ({line}:{column})")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("No-Inline evaluations must call `render`.")]
    MissingRender,
    #[error("`render` was called {0} times; expected a single call")]
    MultipleRenders(usize),
    #[error("`render` expects a single JSX element such as render(<App />)")]
    InvalidRenderTarget,
    #[error("ReferenceError: {0} is not defined")]
    Reference(String),
    #[error("SyntaxError in <{component}>: {source}")]
    Markup {
        component: String,
        #[source]
        source: JsxError,
    },
}

/// How a referenced name was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Resolution {
    Local,
    Scope(ScopeKind),
}

/// Result of a successful evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPreview {
    /// Component passed to `render`
    pub entry: String,
    /// Markup the entry component returns, if it was found
    pub tree: Option<JsxNode>,
    /// Capitalised names the script references, sorted
    pub references: Vec<(String, Resolution)>,
}

/// Evaluates scripts against a fixed scope
#[derive(Debug, Clone, Copy)]
pub struct Sandbox<'a> {
    scope: &'a Scope,
}

impl<'a> Sandbox<'a> {
    pub fn new(scope: &'a Scope) -> Self {
        Self { scope }
    }

    pub fn evaluate(&self, script: &str) -> Result<RenderedPreview, EvalError> {
        let code = mask_literals(script)?;

        let render_count = RENDER_CALL.find_iter(&code).count();
        match render_count {
            0 => return Err(EvalError::MissingRender),
            1 => {}
            n => return Err(EvalError::MultipleRenders(n)),
        }
        let entry = RENDER_TARGET
            .captures(&code)
            .map(|caps| caps[1].to_string())
            .ok_or(EvalError::InvalidRenderTarget)?;

        let locals = declared_names(&code);
        let mut references = BTreeMap::new();

        let entry_root = entry.split('.').next().unwrap_or(&entry).to_string();
        references.insert(entry_root.clone(), self.resolve(&entry_root, &locals)?);

        for name in component_tags(&code) {
            if !references.contains_key(&name) {
                let resolution = self.resolve(&name, &locals)?;
                references.insert(name, resolution);
            }
        }

        let tree = if locals.contains(&entry_root) {
            self.entry_markup(script, &code, &entry)?
        } else {
            Some(JsxNode::Element {
                name: entry.clone(),
                props: Vec::new(),
                children: Vec::new(),
            })
        };

        Ok(RenderedPreview {
            entry,
            tree,
            references: references.into_iter().collect(),
        })
    }

    fn resolve(&self, name: &str, locals: &HashSet<String>) -> Result<Resolution, EvalError> {
        if locals.contains(name) {
            Ok(Resolution::Local)
        } else if let Some(kind) = self.scope.get(name) {
            Ok(Resolution::Scope(kind))
        } else {
            Err(EvalError::Reference(name.to_string()))
        }
    }

    /// Locate and parse the first markup returned after the entry's declaration
    fn entry_markup(
        &self,
        script: &str,
        code: &str,
        entry: &str,
    ) -> Result<Option<JsxNode>, EvalError> {
        let declaration = Regex::new(&format!(
            r"\b(?:function|class)\s+{0}\b|\b(?:const|let|var)\s+{0}\b",
            regex::escape(entry)
        ))
        .ok()
        .and_then(|re| re.find(code));
        let Some(declaration) = declaration else {
            return Ok(None);
        };

        let Some(found) = MARKUP_START.find_at(code, declaration.end()) else {
            return Ok(None);
        };
        let start = found.end() - 1;

        jsx::parse_element(&script[start..])
            .map(|(node, _)| Some(node))
            .map_err(|source| EvalError::Markup {
                component: entry.to_string(),
                source,
            })
    }
}

/// Every name the script declares: functions, classes, bindings and parameters
fn declared_names(code: &str) -> HashSet<String> {
    let mut names = HashSet::new();

    for re in [&*FUNCTION_OR_CLASS, &*BINDING] {
        for caps in re.captures_iter(code) {
            names.insert(caps[1].to_string());
        }
    }

    for caps in DESTRUCTURING.captures_iter(code) {
        names.extend(IDENTIFIER.find_iter(&caps[1]).map(|m| m.as_str().to_string()));
    }

    for caps in PARAMETER_LIST.captures_iter(code) {
        for group in caps.iter().skip(1).flatten() {
            names.extend(IDENTIFIER.find_iter(group.as_str()).map(|m| m.as_str().to_string()));
        }
    }

    names
}

/// Capitalised JSX tag roots, skipping comparisons and generic type arguments
fn component_tags(code: &str) -> Vec<String> {
    let mut tags = Vec::new();

    for caps in TAG_NAME.captures_iter(code) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if !opens_markup(&code[..whole.start()]) {
            continue;
        }

        let name = &caps[1];
        if name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            tags.push(name.to_string());
        }
    }

    tags
}

/// Whether a `<` preceded by `before` can begin a JSX element
fn opens_markup(before: &str) -> bool {
    let trimmed = before.trim_end();
    match trimmed.chars().last() {
        None => true,
        Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => {
            let word_start = trimmed
                .rfind(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
                .map(|i| i + 1)
                .unwrap_or(0);
            JSX_PREFIX_KEYWORDS.contains(&&trimmed[word_start..])
        }
        Some(')') | Some(']') => false,
        Some(_) => true,
    }
}

/// Validate bracket balance and blank out comments and string contents.
///
/// The returned text has the same byte layout as `script`, so offsets found
/// in it index the original. An apostrophe directly after a letter or digit
/// is JSX text (`Don't`, `Users'`) rather than a string delimiter.
fn mask_literals(script: &str) -> Result<String, EvalError> {
    #[derive(PartialEq)]
    enum State {
        Code,
        LineComment,
        BlockComment,
        Str(char),
    }

    let chars: Vec<(usize, char)> = script.char_indices().collect();
    let mut masked = String::with_capacity(script.len());
    let mut stack: Vec<(char, usize, usize)> = Vec::new();
    let mut state = State::Code;
    let mut line = 1;
    let mut column = 0;
    let mut string_start = (0, 0);

    let blank = |masked: &mut String, c: char| {
        if c == '\n' {
            masked.push('\n');
        } else {
            masked.push_str(&" ".repeat(c.len_utf8()));
        }
    };

    let mut i = 0;
    while i < chars.len() {
        let (_, c) = chars[i];
        let next = chars.get(i + 1).map(|&(_, n)| n);
        let prev = if i > 0 { Some(chars[i - 1].1) } else { None };
        column += 1;

        match state {
            State::Code => match c {
                '/' if next == Some('/') => {
                    state = State::LineComment;
                    blank(&mut masked, c);
                }
                '/' if next == Some('*') => {
                    state = State::BlockComment;
                    blank(&mut masked, c);
                }
                '\'' if prev.is_some_and(char::is_alphanumeric) => masked.push(c),
                '"' | '\'' | '`' => {
                    state = State::Str(c);
                    string_start = (line, column);
                    masked.push(c);
                }
                '(' | '[' | '{' => {
                    stack.push((c, line, column));
                    masked.push(c);
                }
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _, _)) if open == expected => masked.push(c),
                        _ => {
                            return Err(EvalError::Syntax {
                                line,
                                column,
                                message: format!("Unexpected token '{}'", c),
                            })
                        }
                    }
                }
                _ => masked.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
                blank(&mut masked, c);
            }
            State::BlockComment => {
                if c == '/' && prev == Some('*') {
                    state = State::Code;
                }
                blank(&mut masked, c);
            }
            State::Str(quote) => {
                if c == '\\' {
                    blank(&mut masked, c);
                    if let Some(n) = next {
                        blank(&mut masked, n);
                        if n == '\n' {
                            line += 1;
                            column = 0;
                        }
                        i += 1;
                    }
                } else if c == quote {
                    state = State::Code;
                    masked.push(c);
                } else if c == '\n' && quote != '`' {
                    return Err(EvalError::Syntax {
                        line: string_start.0,
                        column: string_start.1,
                        message: "Unterminated string constant".to_string(),
                    });
                } else {
                    blank(&mut masked, c);
                }
            }
        }

        if c == '\n' {
            line += 1;
            column = 0;
        }
        i += 1;
    }

    if let State::Str(_) = state {
        return Err(EvalError::Syntax {
            line: string_start.0,
            column: string_start.1,
            message: "Unterminated string constant".to_string(),
        });
    }
    if state == State::BlockComment {
        return Err(EvalError::Syntax {
            line,
            column,
            message: "Unterminated comment".to_string(),
        });
    }
    if let Some((open, open_line, open_column)) = stack.pop() {
        return Err(EvalError::Syntax {
            line: open_line,
            column: open_column,
            message: format!("'{}' was never closed", open),
        });
    }

    Ok(masked)
}
