//! Domain state - business/data state separate from UI concerns

use super::deck::PreviewDeck;
use super::history::GenerationEntry;
use super::session::Session;

/// Domain state containing all business data
#[derive(Default)]
pub struct DomainState {
    /// Text of the current generation
    pub session: Session,

    /// Blocks extracted from the session and the mounted preview
    pub deck: PreviewDeck,

    /// Generation history entries, newest first
    pub history: Vec<GenerationEntry>,
}

impl DomainState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the session text has changed since the deck was synced
    pub fn is_stale(&self) -> bool {
        self.deck.revision != self.session.revision
    }
}
