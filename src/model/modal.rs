//! Modal stack for managing overlays
//!
//! Overlays are an enum-based stack; only the top modal receives input.

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Prompt input with example prompts
    Prompt {
        input: String,
        selected_example: usize,
    },
    /// Generation history list and detail view
    History {
        selected_index: usize,
        detail_scroll: usize,
    },
    /// Active preview shown full screen
    Fullscreen,
    /// Help dialog showing all keyboard shortcuts
    Help { scroll_offset: usize },
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Push `modal`, or pop it if an overlay of the same kind is on top
    pub fn toggle(&mut self, modal: Modal) {
        let same_kind = self
            .top()
            .is_some_and(|top| std::mem::discriminant(top) == std::mem::discriminant(&modal));
        if same_kind {
            self.pop();
        } else {
            self.push(modal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        assert!(stack.top().is_some());

        stack.push(Modal::Fullscreen);

        let top = stack.pop();
        assert_eq!(top, Some(Modal::Fullscreen));

        let top = stack.pop();
        assert_eq!(top, Some(Modal::QuitConfirm));
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_modal_stack_top_mut() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Prompt {
            input: String::new(),
            selected_example: 0,
        });

        if let Some(Modal::Prompt { input, .. }) = stack.top_mut() {
            input.push_str("A pricing table");
        }

        assert_eq!(
            stack.top(),
            Some(&Modal::Prompt {
                input: "A pricing table".to_string(),
                selected_example: 0,
            })
        );
    }

    #[test]
    fn test_toggle_matches_kind() {
        let mut stack = ModalStack::new();
        stack.toggle(Modal::Help { scroll_offset: 0 });
        assert_eq!(stack.top(), Some(&Modal::Help { scroll_offset: 0 }));

        stack.toggle(Modal::Help { scroll_offset: 3 });
        assert!(stack.is_empty());
    }
}
