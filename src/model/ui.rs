//! UI state - presentation state separate from domain data
//!
//! Note: Most UI state lives in HomeComponent which owns presentation state.

/// Which text the code panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeViewMode {
    #[default]
    Original,
    Normalized,
}

impl CodeViewMode {
    pub fn toggle(self) -> Self {
        match self {
            CodeViewMode::Original => CodeViewMode::Normalized,
            CodeViewMode::Normalized => CodeViewMode::Original,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CodeViewMode::Original => "Original",
            CodeViewMode::Normalized => "Normalized",
        }
    }
}

/// Panel that receives scroll keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Preview,
    Code,
}

impl FocusedPanel {
    pub fn toggle(self) -> Self {
        match self {
            FocusedPanel::Preview => FocusedPanel::Code,
            FocusedPanel::Code => FocusedPanel::Preview,
        }
    }
}
