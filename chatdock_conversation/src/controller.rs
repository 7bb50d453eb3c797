//! Session controller for the assistant panel.
//!
//! `SessionController` is the only writer of [`ConversationState`]. It runs
//! the send cycle (`Idle → Composing → Idle`), loads page suggestions once,
//! and turns every assistant failure into a transcript notice so nothing
//! escapes to the caller.

use chatdock_core::util::error_summary;
use chatdock_core::{
    AssistantClient, AssistantError, ChatMessage, CredentialStore, PageContext, Role,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::events::{Listeners, SessionEvent, SessionListener, SubscriptionId};
use crate::state::{ConversationState, Phase, SessionSnapshot};

/// What a call to [`SessionController::send`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming. Nothing changed.
    Empty,
    /// Another send is still in flight. Nothing changed.
    Busy,
    /// The assistant replied with this text.
    Replied(String),
    /// The turn failed; a notice was added to the transcript.
    Failed(AssistantError),
}

enum Start {
    Busy,
    Unauthenticated,
    Dispatch {
        history: Vec<ChatMessage>,
        page: PageContext,
        token: String,
    },
}

pub struct SessionController<C, K>
where
    C: AssistantClient,
    K: CredentialStore,
{
    id: Uuid,
    client: C,
    credentials: K,
    state: Mutex<ConversationState>,
    listeners: Mutex<Listeners>,
    suggestions_requested: AtomicBool,
}

impl<C, K> SessionController<C, K>
where
    C: AssistantClient,
    K: CredentialStore,
{
    /// Create a controller. Suggestions are not loaded until
    /// [`Self::load_suggestions`] is called; see [`Self::launch`].
    pub fn new(client: C, credentials: K, page_context: PageContext, welcome: &str) -> Self {
        let id = Uuid::now_v7();
        info!("Creating assistant session {id} for page {page_context}");

        Self {
            id,
            client,
            credentials,
            state: Mutex::new(ConversationState::new(page_context, welcome)),
            listeners: Mutex::new(Listeners::default()),
            suggestions_requested: AtomicBool::new(false),
        }
    }

    /// Create a shared controller and start loading suggestions in the
    /// background.
    pub fn launch(
        client: C,
        credentials: K,
        page_context: PageContext,
        welcome: &str,
    ) -> (Arc<Self>, JoinHandle<()>)
    where
        C: 'static,
        K: 'static,
    {
        let controller = Arc::new(Self::new(client, credentials, page_context, welcome));
        let loader = Arc::clone(&controller);
        let handle = tokio::spawn(async move { loader.load_suggestions().await });
        (controller, handle)
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub fn open(&self) {
        let changed = self.state().set_panel_open(true);
        if changed {
            self.notify_changed();
        }
        self.emit(&SessionEvent::FocusInput);
    }

    pub fn close(&self) {
        let changed = self.state().set_panel_open(false);
        if changed {
            self.notify_changed();
        }
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Append to the transcript; User and Assistant entries also join the
    /// history.
    pub fn append_display(&self, role: Role, content: impl Into<String>) {
        self.state().append_display(role, content.into());
        self.notify_changed();
    }

    /// Record the renderer's current input text.
    pub fn set_draft(&self, text: &str) {
        let changed = self.state().set_draft(text);
        if changed {
            self.notify_changed();
        }
    }

    /// Run one turn.
    ///
    /// Whitespace-only input and calls made while another send is in flight
    /// are ignored. Every failure ends up as a System entry in the
    /// transcript, and failed turns add nothing but the user message to the
    /// history. The controller is back to idle when this returns, or when
    /// the returned future is dropped before the reply arrives.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring empty send in session {}", self.id);
            return SendOutcome::Empty;
        }

        let token = self.credentials.token();
        let start = {
            let mut state = self.state();
            if state.is_pending() {
                Start::Busy
            } else {
                state.mark_sent();
                state.clear_draft();
                if let Some(token) = token {
                    state.append_display(Role::User, text.to_string());
                    state.set_phase(Phase::Composing);
                    Start::Dispatch {
                        history: state.history().to_vec(),
                        page: state.page_context(),
                        token,
                    }
                } else {
                    state.show_only(ChatMessage::user(text));
                    state.append_display(
                        Role::System,
                        error_summary(&AssistantError::Unauthenticated),
                    );
                    Start::Unauthenticated
                }
            }
        };

        let (history, page, token) = match start {
            Start::Busy => {
                debug!("Send rejected in session {}: reply pending", self.id);
                return SendOutcome::Busy;
            }
            Start::Unauthenticated => {
                warn!("Send in session {} without a credential", self.id);
                self.notify_changed();
                self.emit(&SessionEvent::FocusInput);
                return SendOutcome::Failed(AssistantError::Unauthenticated);
            }
            Start::Dispatch {
                history,
                page,
                token,
            } => (history, page, token),
        };
        self.notify_changed();

        info!(
            "Session {}: sending turn {} ({} messages)",
            self.id,
            history.iter().filter(|m| m.role == Role::User).count(),
            history.len()
        );
        let turn = PendingTurn::new(self);
        let result = self.client.exchange(&history, page, &token).await;
        turn.disarm();

        let outcome = {
            let mut state = self.state();
            state.set_phase(Phase::Idle);
            match result {
                Ok(reply) => {
                    state.append_display(Role::Assistant, reply.clone());
                    SendOutcome::Replied(reply)
                }
                Err(err) => {
                    state.append_display(Role::System, error_summary(&err));
                    SendOutcome::Failed(err)
                }
            }
        };

        match &outcome {
            SendOutcome::Failed(err) => {
                warn!("Session {}: turn failed: {}", self.id, err.detail());
            }
            _ => debug!("Session {}: turn completed", self.id),
        }

        self.notify_changed();
        self.emit(&SessionEvent::FocusInput);
        outcome
    }

    /// Load page suggestions. Only the first call does anything.
    ///
    /// A missing credential or any failure leaves the suggestions empty and
    /// is never shown in the transcript.
    pub async fn load_suggestions(&self) {
        if self.suggestions_requested.swap(true, Ordering::SeqCst) {
            debug!("Suggestions already requested for session {}", self.id);
            return;
        }

        let Some(token) = self.credentials.token() else {
            debug!("No credential, skipping suggestions for session {}", self.id);
            return;
        };

        let page = self.page_context();
        match self.client.fetch_suggestions(page, &token).await {
            Ok(suggestions) => {
                info!(
                    "Loaded {} suggestions for page {page} in session {}",
                    suggestions.len(),
                    self.id
                );
                self.state().set_suggestions(suggestions);
                self.notify_changed();
            }
            Err(err) => {
                warn!(
                    "Failed to load suggestions for session {}: {err} ({})",
                    self.id,
                    err.detail()
                );
            }
        }
    }

    /// Send a suggestion as if the user had typed it.
    pub async fn pick_suggestion(&self, text: &str) -> SendOutcome {
        self.set_draft(text);
        self.send(text).await
    }

    pub fn subscribe(&self, listener: impl SessionListener + 'static) -> SubscriptionId {
        self.listeners().add(Arc::new(listener))
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners().remove(id)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state().snapshot()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state().is_panel_open()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state().is_pending()
    }

    #[must_use]
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.state().transcript().to_vec()
    }

    #[must_use]
    pub fn history(&self) -> Vec<ChatMessage> {
        self.state().history().to_vec()
    }

    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        self.state().suggestions().to_vec()
    }

    #[must_use]
    pub fn suggestions_visible(&self) -> bool {
        self.state().suggestions_visible()
    }

    #[must_use]
    pub fn draft(&self) -> String {
        self.state().draft().to_string()
    }

    #[must_use]
    pub fn page_context(&self) -> PageContext {
        self.state().page_context()
    }

    fn state(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listeners(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Close out a turn whose `send` future was dropped mid-exchange.
    fn abandon_turn(&self) {
        warn!("Session {}: send dropped before the reply arrived", self.id);
        {
            let mut state = self.state();
            state.set_phase(Phase::Idle);
            state.append_display(
                Role::System,
                error_summary(&AssistantError::TransportFailed(
                    "request cancelled".to_string(),
                )),
            );
        }
        self.notify_changed();
    }

    fn notify_changed(&self) {
        let snapshot = self.snapshot();
        self.emit(&SessionEvent::StateChanged(snapshot));
    }

    /// Listeners run with no lock held, so they may call back into the
    /// controller.
    fn emit(&self, event: &SessionEvent) {
        let targets = self.listeners().targets();
        for listener in targets {
            listener.on_event(event);
        }
    }
}

/// Puts the session back to idle if the exchange it guards never returns.
struct PendingTurn<'a, C, K>
where
    C: AssistantClient,
    K: CredentialStore,
{
    controller: &'a SessionController<C, K>,
    armed: bool,
}

impl<'a, C, K> PendingTurn<'a, C, K>
where
    C: AssistantClient,
    K: CredentialStore,
{
    const fn new(controller: &'a SessionController<C, K>) -> Self {
        Self {
            controller,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<C, K> Drop for PendingTurn<'_, C, K>
where
    C: AssistantClient,
    K: CredentialStore,
{
    fn drop(&mut self) {
        if self.armed {
            self.controller.abandon_turn();
        }
    }
}
