//! Minimal JSX element parser
//!
//! Turns the markup a component returns into an element tree. Attribute and
//! child expressions are kept as opaque source text.

use thiserror::Error;

/// A node of a parsed JSX tree
#[derive(Debug, Clone, PartialEq)]
pub enum JsxNode {
    Element {
        name: String,
        props: Vec<JsxProp>,
        children: Vec<JsxNode>,
    },
    Fragment(Vec<JsxNode>),
    Text(String),
    Expression(String),
}

impl JsxNode {
    /// Tag name, if this node is an element
    pub fn name(&self) -> Option<&str> {
        match self {
            JsxNode::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn children(&self) -> &[JsxNode] {
        match self {
            JsxNode::Element { children, .. } | JsxNode::Fragment(children) => children,
            _ => &[],
        }
    }

    /// Number of element nodes in this subtree, including itself
    pub fn element_count(&self) -> usize {
        let own = usize::from(matches!(self, JsxNode::Element { .. }));
        own + self.children().iter().map(JsxNode::element_count).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsxProp {
    pub name: String,
    pub value: PropValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Bare attribute such as `disabled`
    Flag,
    Literal(String),
    Expression(String),
    /// `{...rest}`
    Spread(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum JsxError {
    #[error("Unterminated JSX contents in <{0}>")]
    UnexpectedEof(String),
    #[error("Expected corresponding JSX closing tag for <{expected}>, found </{found}>")]
    MismatchedClose { expected: String, found: String },
    #[error("Unexpected token '{0}' in JSX tag")]
    UnexpectedChar(char),
    #[error("Expected a tag name after '<'")]
    MissingTagName,
}

/// Parse one element (or fragment) starting at the `<` at the head of `src`.
///
/// Returns the node and the number of bytes consumed.
pub fn parse_element(src: &str) -> Result<(JsxNode, usize), JsxError> {
    let mut parser = Parser { src, pos: 0 };
    let node = parser.parse_node()?;
    Ok((node, parser.pos))
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn identifier(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | ':' | '-'))
        {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn expect(&mut self, expected: char, context: &str) -> Result<(), JsxError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(JsxError::UnexpectedChar(c)),
            None => Err(JsxError::UnexpectedEof(context.to_string())),
        }
    }

    fn parse_node(&mut self) -> Result<JsxNode, JsxError> {
        self.expect('<', "")?;
        self.skip_whitespace();

        if self.eat('>') {
            let children = self.parse_children("")?;
            return Ok(JsxNode::Fragment(children));
        }

        let name = self.identifier();
        if name.is_empty() {
            return Err(JsxError::MissingTagName);
        }

        let mut props = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('/') => {
                    self.bump();
                    self.skip_whitespace();
                    self.expect('>', &name)?;
                    return Ok(JsxNode::Element {
                        name,
                        props,
                        children: Vec::new(),
                    });
                }
                Some('>') => {
                    self.bump();
                    break;
                }
                Some('{') => {
                    let inner = self.braced(&name)?;
                    let spread = inner.trim().trim_start_matches("...").trim().to_string();
                    props.push(JsxProp {
                        name: String::new(),
                        value: PropValue::Spread(spread),
                    });
                }
                Some(c) if c.is_alphabetic() || c == '_' => {
                    props.push(self.parse_prop(&name)?);
                }
                Some(c) => return Err(JsxError::UnexpectedChar(c)),
                None => return Err(JsxError::UnexpectedEof(name)),
            }
        }

        let children = self.parse_children(&name)?;
        Ok(JsxNode::Element {
            name,
            props,
            children,
        })
    }

    fn parse_prop(&mut self, tag: &str) -> Result<JsxProp, JsxError> {
        let name = self.identifier();
        self.skip_whitespace();
        if !self.eat('=') {
            return Ok(JsxProp {
                name,
                value: PropValue::Flag,
            });
        }
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.bump();
                }
                let literal = self.src[start..self.pos].to_string();
                self.expect(quote, tag)?;
                PropValue::Literal(literal)
            }
            Some('{') => PropValue::Expression(self.braced(tag)?.trim().to_string()),
            Some('<') => {
                let start = self.pos;
                self.parse_node()?;
                PropValue::Expression(self.src[start..self.pos].to_string())
            }
            Some(c) => return Err(JsxError::UnexpectedChar(c)),
            None => return Err(JsxError::UnexpectedEof(tag.to_string())),
        };

        Ok(JsxProp { name, value })
    }

    fn parse_children(&mut self, closing: &str) -> Result<Vec<JsxNode>, JsxError> {
        let mut children = Vec::new();
        loop {
            if self.rest().starts_with("</") {
                self.pos += 2;
                self.skip_whitespace();
                let found = self.identifier();
                self.skip_whitespace();
                self.expect('>', closing)?;
                if found != closing {
                    return Err(JsxError::MismatchedClose {
                        expected: closing.to_string(),
                        found,
                    });
                }
                return Ok(children);
            }

            match self.peek() {
                None => return Err(JsxError::UnexpectedEof(closing.to_string())),
                Some('<') => children.push(self.parse_node()?),
                Some('{') => {
                    let inner = self.braced(closing)?;
                    let inner = inner.trim();
                    let is_comment = inner.starts_with("/*") && inner.ends_with("*/");
                    if !inner.is_empty() && !is_comment {
                        children.push(JsxNode::Expression(inner.to_string()));
                    }
                }
                Some(_) => {
                    let start = self.pos;
                    while self.peek().is_some_and(|c| c != '<' && c != '{') {
                        self.bump();
                    }
                    let text = self.src[start..self.pos]
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" ");
                    if !text.is_empty() {
                        children.push(JsxNode::Text(text));
                    }
                }
            }
        }
    }

    /// Consume a `{ ... }` group and return its inner source
    fn braced(&mut self, context: &str) -> Result<String, JsxError> {
        self.expect('{', context)?;
        let start = self.pos;
        let mut depth = 1usize;
        let mut quote: Option<char> = None;

        while let Some(c) = self.bump() {
            match quote {
                Some(q) => {
                    if c == '\\' {
                        self.bump();
                    } else if c == q {
                        quote = None;
                    }
                }
                None => match c {
                    '"' | '\'' | '`' => quote = Some(c),
                    '<' if self.opens_markup(start) => {
                        // Nested markup text is not script: parse it as JSX
                        self.pos -= 1;
                        self.parse_node()?;
                    }
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(self.src[start..self.pos - 1].to_string());
                        }
                    }
                    _ => {}
                },
            }
        }

        Err(JsxError::UnexpectedEof(context.to_string()))
    }

    /// Whether the `<` just consumed inside a `{ ... }` group starts markup
    fn opens_markup(&self, group_start: usize) -> bool {
        let before = self.src[group_start..self.pos - 1].trim_end();
        let tag_follows = self
            .peek()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '>');
        tag_follows
            && before.chars().last().map_or(true, |c| {
                matches!(c, '(' | '&' | '|' | '?' | ':' | '>' | ',' | '{' | '[' | '=')
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(src: &str) -> JsxNode {
        parse_element(src).expect("valid jsx").0
    }

    #[test]
    fn test_self_closing_element() {
        let (node, consumed) = parse_element("<Divider />;\nrest").unwrap();
        assert_eq!(node.name(), Some("Divider"));
        assert!(node.children().is_empty());
        assert_eq!(consumed, "<Divider />".len());
    }

    #[test]
    fn test_props_are_classified() {
        let node = element(r#"<Button variant="contained" disabled onClick={() => go({ a: 1 })} {...rest} />"#);
        let JsxNode::Element { props, .. } = node else {
            panic!("expected element");
        };

        assert_eq!(props.len(), 4);
        assert_eq!(props[0].value, PropValue::Literal("contained".to_string()));
        assert_eq!(props[1].value, PropValue::Flag);
        assert_eq!(props[2].value, PropValue::Expression("() => go({ a: 1 })".to_string()));
        assert_eq!(props[3].value, PropValue::Spread("rest".to_string()));
    }

    #[test]
    fn test_nested_children_and_text() {
        let node = element(
            "<Card>\n  <CardContent>\n    <Typography variant=\"h5\">\n      Monthly   revenue\n    </Typography>\n    {total}\n  </CardContent>\n</Card>",
        );

        assert_eq!(node.element_count(), 3);
        let content = &node.children()[0];
        assert_eq!(content.name(), Some("CardContent"));
        assert_eq!(
            content.children()[0].children(),
            &[JsxNode::Text("Monthly revenue".to_string())]
        );
        assert_eq!(content.children()[1], JsxNode::Expression("total".to_string()));
    }

    #[test]
    fn test_fragment_and_member_tags() {
        let node = element("<>\n  <Foo.Bar />\n  <b>hi</b>\n</>");
        let JsxNode::Fragment(children) = node else {
            panic!("expected fragment");
        };
        assert_eq!(children[0].name(), Some("Foo.Bar"));
        assert_eq!(children[1].name(), Some("b"));
    }

    #[test]
    fn test_comment_children_are_dropped() {
        let node = element("<Box>{/* spacer */}<Chip /></Box>");
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn test_braces_inside_strings() {
        let node = element("<Box sx={{ content: '\"}\"' }}>x</Box>");
        assert_eq!(node.children(), &[JsxNode::Text("x".to_string())]);
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let err = parse_element("<Stack><Chip></Stack>").unwrap_err();
        assert_eq!(
            err,
            JsxError::MismatchedClose {
                expected: "Chip".to_string(),
                found: "Stack".to_string(),
            }
        );
    }

    #[test]
    fn test_unterminated_element() {
        let err = parse_element("<Stack>\n  <Chip />\n").unwrap_err();
        assert_eq!(err, JsxError::UnexpectedEof("Stack".to_string()));
    }

    #[test]
    fn test_missing_tag_name() {
        assert_eq!(parse_element("< />").unwrap_err(), JsxError::MissingTagName);
    }

    #[test]
    fn test_markup_inside_expression_is_parsed_as_jsx() {
        let node = element(
            "<Box>\n  {open && <Typography>Don't forget to save</Typography>}\n  {items.map(item => <Chip key={item} label=\"it's\" />)}\n</Box>",
        );

        assert_eq!(node.children().len(), 2);
        assert!(matches!(&node.children()[0], JsxNode::Expression(e) if e.starts_with("open &&")));
    }
}
