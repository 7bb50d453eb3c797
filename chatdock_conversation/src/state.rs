//! Conversation state for one assistant session.
//!
//! The transcript is everything the user sees. The history is the subset
//! that is sent to the assistant: user and assistant turns only, in the
//! order they were appended.

use chatdock_core::{ChatMessage, PageContext, Role};

/// Send cycle phase. The panel flag is tracked separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// A send is in flight and the assistant is composing a reply.
    Composing,
}

#[derive(Debug, Clone)]
pub struct ConversationState {
    transcript: Vec<ChatMessage>,
    history: Vec<ChatMessage>,
    panel_open: bool,
    phase: Phase,
    suggestions: Vec<String>,
    /// Set by the first non-empty send; never cleared.
    has_sent: bool,
    draft: String,
    page_context: PageContext,
}

impl ConversationState {
    /// Create a fresh state seeded with the welcome entry.
    ///
    /// An empty `welcome` skips the seed entry.
    #[must_use]
    pub fn new(page_context: PageContext, welcome: &str) -> Self {
        let mut state = Self {
            transcript: Vec::new(),
            history: Vec::new(),
            panel_open: false,
            phase: Phase::Idle,
            suggestions: Vec::new(),
            has_sent: false,
            draft: String::new(),
            page_context,
        };
        if !welcome.is_empty() {
            state.append_display(Role::System, welcome.to_string());
        }
        state
    }

    /// Append to the transcript, and to the history unless `role` is System.
    pub fn append_display(&mut self, role: Role, content: String) {
        let message = ChatMessage { role, content };
        if role.is_conversational() {
            self.history.push(message.clone());
        }
        self.transcript.push(message);
    }

    /// Show a message without making it part of the history.
    pub(crate) fn show_only(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    /// Returns whether the flag actually changed.
    pub fn set_panel_open(&mut self, open: bool) -> bool {
        let changed = self.panel_open != open;
        self.panel_open = open;
        changed
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Permanently hide suggestions.
    pub fn mark_sent(&mut self) {
        self.has_sent = true;
    }

    /// Replace the suggestion list. Visibility is unaffected.
    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
    }

    /// Returns whether the draft actually changed.
    pub fn set_draft(&mut self, draft: &str) -> bool {
        if self.draft == draft {
            return false;
        }
        draft.clone_into(&mut self.draft);
        true
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Composing
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    #[must_use]
    pub const fn suggestions_visible(&self) -> bool {
        !self.has_sent
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub const fn page_context(&self) -> PageContext {
        self.page_context
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            panel_open: self.panel_open,
            transcript: self.transcript.clone(),
            pending: self.is_pending(),
            suggestions: self.suggestions.clone(),
            suggestions_visible: self.suggestions_visible(),
            draft: self.draft.clone(),
            page_context: self.page_context,
        }
    }
}

/// Read-only copy of everything a renderer paints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub panel_open: bool,
    pub transcript: Vec<ChatMessage>,
    /// True while a reply is being composed; the send control should be
    /// disabled and a composing indicator shown.
    pub pending: bool,
    pub suggestions: Vec<String>,
    pub suggestions_visible: bool,
    pub draft: String,
    pub page_context: PageContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_is_transcript_only() {
        let state = ConversationState::new(PageContext::Default, "hello there");

        assert_eq!(state.transcript(), &[ChatMessage::system("hello there")]);
        assert!(state.history().is_empty());
        assert!(!state.is_panel_open());
        assert!(!state.is_pending());
        assert!(state.suggestions_visible());
    }

    #[test]
    fn empty_welcome_skips_seed() {
        let state = ConversationState::new(PageContext::Default, "");
        assert!(state.transcript().is_empty());
    }

    #[test]
    fn system_entries_never_reach_history() {
        let mut state = ConversationState::new(PageContext::MyTickets, "welcome");

        state.append_display(Role::User, "Q".to_string());
        state.append_display(Role::System, "note".to_string());
        state.append_display(Role::Assistant, "A".to_string());

        assert_eq!(
            state.history(),
            &[ChatMessage::user("Q"), ChatMessage::assistant("A")]
        );
        assert_eq!(state.transcript().len(), 4);
        assert!(state.history().iter().all(|m| m.role != Role::System));
    }

    #[test]
    fn show_only_skips_history() {
        let mut state = ConversationState::new(PageContext::Default, "");
        state.show_only(ChatMessage::user("hidden from wire"));

        assert_eq!(state.transcript().len(), 1);
        assert!(state.history().is_empty());
    }

    #[test]
    fn panel_flag_reports_changes_and_leaves_content_alone() {
        let mut state = ConversationState::new(PageContext::Default, "w");
        state.set_suggestions(vec!["A".to_string()]);

        assert!(state.set_panel_open(true));
        assert!(!state.set_panel_open(true));
        assert!(state.set_panel_open(false));

        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.suggestions(), &["A".to_string()]);
    }

    #[test]
    fn suggestions_stay_hidden_after_first_send() {
        let mut state = ConversationState::new(PageContext::Default, "");
        state.mark_sent();
        state.set_suggestions(vec!["late".to_string()]);

        assert!(!state.suggestions_visible());
        assert_eq!(state.suggestions(), &["late".to_string()]);
    }

    #[test]
    fn snapshot_reflects_phase_and_draft() {
        let mut state = ConversationState::new(PageContext::PropertyInfo, "");
        assert!(state.set_draft("typing"));
        assert!(!state.set_draft("typing"));
        state.set_phase(Phase::Composing);

        let snapshot = state.snapshot();
        assert!(snapshot.pending);
        assert_eq!(snapshot.draft, "typing");
        assert_eq!(snapshot.page_context, PageContext::PropertyInfo);

        state.clear_draft();
        state.set_phase(Phase::Idle);
        assert_eq!(state.draft(), "");
        assert_eq!(state.phase(), Phase::Idle);
    }
}
