//! Terminal renderer.
//!
//! Paints the transcript incrementally while the panel is open. Entries
//! that arrive while it is closed are painted on the next open.

use chatdock_conversation::{SessionEvent, SessionListener, SessionSnapshot};
use chatdock_core::util::COMPOSING_INDICATOR;
use chatdock_core::{ChatMessage, Role};
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
struct Painted {
    entries: usize,
    pending: bool,
    suggestions: Vec<String>,
    panel_open: bool,
}

#[derive(Debug, Default)]
pub struct TerminalRenderer {
    painted: Mutex<Painted>,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn paint(&self, snapshot: &SessionSnapshot) {
        let mut painted = self.painted.lock().unwrap_or_else(PoisonError::into_inner);
        let output = frame(&mut painted, snapshot);
        drop(painted);

        if !output.is_empty() {
            print!("{output}");
        }
    }
}

impl SessionListener for TerminalRenderer {
    fn on_event(&self, event: &SessionEvent) {
        match event {
            SessionEvent::StateChanged(snapshot) => self.paint(snapshot),
            // Terminal input always has focus.
            SessionEvent::FocusInput => {}
        }
    }
}

/// Compute what to print for `snapshot`, given what is already on screen.
fn frame(painted: &mut Painted, snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();

    if snapshot.panel_open != painted.panel_open {
        painted.panel_open = snapshot.panel_open;
        if !snapshot.panel_open {
            out.push_str("[assistant hidden, /open to show]\n");
            return out;
        }
    }
    if !snapshot.panel_open {
        return out;
    }

    for entry in snapshot.transcript.iter().skip(painted.entries) {
        out.push_str(&render_entry(entry));
        out.push('\n');
    }
    painted.entries = snapshot.transcript.len();

    if snapshot.pending && !painted.pending {
        out.push_str(&format!("  {COMPOSING_INDICATOR}\n"));
    }
    painted.pending = snapshot.pending;

    if snapshot.suggestions_visible
        && !snapshot.suggestions.is_empty()
        && snapshot.suggestions != painted.suggestions
    {
        out.push_str(&render_suggestions(&snapshot.suggestions));
        painted.suggestions.clone_from(&snapshot.suggestions);
    }

    out
}

fn render_entry(message: &ChatMessage) -> String {
    match message.role {
        Role::User => format!("you> {}", message.content),
        Role::Assistant => format!("ai>  {}", message.content),
        Role::System => format!("  {}", message.content),
    }
}

fn render_suggestions(suggestions: &[String]) -> String {
    let mut out = String::from("Suggestions:\n");
    for (i, suggestion) in suggestions.iter().enumerate() {
        out.push_str(&format!("  /{} {suggestion}\n", i + 1));
    }
    out
}
