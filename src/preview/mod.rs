//! Code preview pipeline
//!
//! Turns generated text into previews in three stages:
//! 1. `extract` pulls fenced code blocks out of the text
//! 2. `normalize` rewrites a block into a standalone script
//! 3. `sandbox` evaluates the script against the live `scope`

pub mod extract;
pub mod jsx;
pub mod normalize;
pub mod sandbox;
pub mod scope;

pub use extract::{extract_code_blocks, CodeBlock};
pub use jsx::{JsxNode, PropValue};
pub use normalize::Normalizer;
pub use sandbox::{EvalError, RenderedPreview, Resolution, Sandbox};
pub use scope::{Scope, ScopeKind};

use crate::config::Config;

/// Normalizer and sandbox configured from the user's settings
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: Normalizer<'static>,
    sandbox: Sandbox<'static>,
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        let scope = Scope::live();
        Self {
            normalizer: Normalizer::new(scope)
                .with_icon_rewrite(config.strip_icon_suffix)
                .with_keep_icon_stems(config.keep_icon_stems.clone()),
            sandbox: Sandbox::new(scope),
        }
    }

    pub fn normalize(&self, code: &str) -> String {
        self.normalizer.normalize(code)
    }

    /// Normalize then evaluate; `None` when there is nothing to preview
    pub fn run(&self, code: &str) -> (String, Option<Result<RenderedPreview, EvalError>>) {
        let script = self.normalize(code);
        if script.is_empty() {
            return (script, None);
        }
        let outcome = self.sandbox.evaluate(&script);
        (script, Some(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_runs_block() {
        let pipeline = Pipeline::new(&Config::default());
        let blocks = extract_code_blocks(
            "Here you go:\n```tsx\nimport { Button } from '@mui/material';\nexport default function Cta() {\n  return <Button variant=\"contained\">Buy</Button>;\n}\n```",
        );
        let (script, outcome) = pipeline.run(&blocks[0].code);

        assert!(script.ends_with("render(<Cta />);"));
        let preview = outcome.unwrap().unwrap();
        assert_eq!(preview.entry, "Cta");
    }

    #[test]
    fn test_pipeline_nothing_to_preview() {
        let pipeline = Pipeline::new(&Config::default());
        let (script, outcome) = pipeline.run("const x = 1;");
        assert!(script.is_empty());
        assert!(outcome.is_none());
    }

    #[test]
    fn test_pipeline_honours_icon_setting() {
        let config = Config {
            strip_icon_suffix: false,
            ..Config::default()
        };
        let pipeline = Pipeline::new(&config);
        let (_, outcome) = pipeline.run("function A() { return <SettingsIcon />; }");

        assert_eq!(
            outcome.unwrap().unwrap_err(),
            EvalError::Reference("SettingsIcon".to_string())
        );
    }
}
