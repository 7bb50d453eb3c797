#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod credentials;
pub mod error;
pub mod page;
pub mod util;

pub use credentials::{CredentialStore, MemoryCredentials};
pub use error::AssistantError;
pub use page::PageContext;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Display-only notices. Never sent to the assistant.
    System,
}

impl Role {
    /// Whether messages with this role belong to the wire-format history.
    #[must_use]
    pub const fn is_conversational(self) -> bool {
        matches!(self, Self::User | Self::Assistant)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Remote assistant endpoint consumed by the session controller.
///
/// Implementations perform the network calls only. Credential presence is
/// checked by the caller, so `token` is always a real bearer token here.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Send the conversation so far and return the assistant's reply.
    async fn exchange(
        &self,
        history: &[ChatMessage],
        page: PageContext,
        token: &str,
    ) -> Result<String, AssistantError>;

    /// Fetch quick-start prompts for the given page, in display order.
    async fn fetch_suggestions(
        &self,
        page: PageContext,
        token: &str,
    ) -> Result<Vec<String>, AssistantError>;
}

#[async_trait]
impl<T: AssistantClient + ?Sized> AssistantClient for Arc<T> {
    async fn exchange(
        &self,
        history: &[ChatMessage],
        page: PageContext,
        token: &str,
    ) -> Result<String, AssistantError> {
        (**self).exchange(history, page, token).await
    }

    async fn fetch_suggestions(
        &self,
        page: PageContext,
        token: &str,
    ) -> Result<Vec<String>, AssistantError> {
        (**self).fetch_suggestions(page, token).await
    }
}
