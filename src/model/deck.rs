//! Preview deck: extracted blocks, the active tab and its mounted preview
//!
//! Only the active block is evaluated. A mounted preview is cached until the
//! active block's code changes or another tab is selected.

use crate::preview::{extract_code_blocks, CodeBlock, EvalError, Pipeline, RenderedPreview};

/// Result of evaluating one block
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewOutcome {
    /// The block has nothing to preview
    Empty,
    Rendered(RenderedPreview),
    Failed(EvalError),
}

/// The evaluated state of the active block
#[derive(Debug, Clone, PartialEq)]
pub struct MountedPreview {
    pub index: usize,
    /// Code the preview was built from
    pub code: String,
    /// Normalized script that was evaluated
    pub script: String,
    pub outcome: PreviewOutcome,
}

impl MountedPreview {
    fn mount(index: usize, block: &CodeBlock, pipeline: &Pipeline) -> Self {
        let (script, outcome) = pipeline.run(&block.code);
        let outcome = match outcome {
            None => PreviewOutcome::Empty,
            Some(Ok(preview)) => PreviewOutcome::Rendered(preview),
            Some(Err(err)) => {
                tracing::debug!("Preview of '{}' failed: {}", block.title, err);
                PreviewOutcome::Failed(err)
            }
        };

        Self {
            index,
            code: block.code.clone(),
            script,
            outcome,
        }
    }

    pub fn error(&self) -> Option<&EvalError> {
        match &self.outcome {
            PreviewOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreviewDeck {
    pub blocks: Vec<CodeBlock>,
    pub active: usize,
    pub mounted: Option<MountedPreview>,
    /// Session revision the blocks were extracted from
    pub revision: u64,
}

impl PreviewDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-extract blocks from `text` and remount the active block if needed.
    ///
    /// With `evaluate` false the blocks are refreshed but the mounted preview
    /// is left as it was. Returns true when the block list changed.
    pub fn sync(&mut self, text: &str, revision: u64, pipeline: &Pipeline, evaluate: bool) -> bool {
        self.revision = revision;
        let blocks = extract_code_blocks(text);
        let changed = blocks != self.blocks;
        if changed {
            tracing::debug!("Extracted {} code block(s)", blocks.len());
            self.blocks = blocks;
        }

        if self.blocks.is_empty() {
            self.active = 0;
            self.mounted = None;
            return changed;
        }

        self.active = self.active.min(self.blocks.len() - 1);
        if evaluate {
            self.mount_active(pipeline);
        }
        changed
    }

    /// Evaluate the active block unless its cached preview is current
    pub fn mount_active(&mut self, pipeline: &Pipeline) {
        let Some(block) = self.blocks.get(self.active) else {
            self.mounted = None;
            return;
        };

        let current = self
            .mounted
            .as_ref()
            .is_some_and(|m| m.index == self.active && m.code == block.code);
        if !current {
            self.mounted = Some(MountedPreview::mount(self.active, block, pipeline));
        }
    }

    /// Drop the cached preview so the next mount evaluates again
    pub fn invalidate(&mut self) {
        self.mounted = None;
    }

    /// Activate block `index`, mounting it when `evaluate` is set
    pub fn select(&mut self, index: usize, pipeline: &Pipeline, evaluate: bool) {
        if index < self.blocks.len() && index != self.active {
            self.active = index;
            if evaluate {
                self.mount_active(pipeline);
            }
        }
    }

    pub fn next(&mut self, pipeline: &Pipeline, evaluate: bool) {
        if !self.blocks.is_empty() {
            self.select((self.active + 1) % self.blocks.len(), pipeline, evaluate);
        }
    }

    pub fn previous(&mut self, pipeline: &Pipeline, evaluate: bool) {
        if !self.blocks.is_empty() {
            let len = self.blocks.len();
            self.select((self.active + len - 1) % len, pipeline, evaluate);
        }
    }

    pub fn active_block(&self) -> Option<&CodeBlock> {
        self.blocks.get(self.active)
    }

    /// The mounted preview, if it belongs to the active block
    pub fn active_preview(&self) -> Option<&MountedPreview> {
        self.mounted.as_ref().filter(|m| m.index == self.active)
    }

    /// Whether a tab strip is shown (more than one block)
    pub fn has_tabs(&self) -> bool {
        self.blocks.len() > 1
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
