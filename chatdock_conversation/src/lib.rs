#![warn(
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

//! Conversation session control for the assistant panel.
//!
//! This crate owns the state behind an embeddable chat panel: the visible
//! transcript, the history sent to the assistant, the open/closed flag,
//! page suggestions and the in-flight guard. Renderers subscribe to
//! [`SessionEvent`]s and forward user intents to [`SessionController`].
//!
//! # Key Features
//! - One send at a time; extra sends while a reply is pending are ignored
//! - Failed turns become transcript notices and never enter the history
//! - Suggestions load once per session and hide for good after the first send

mod controller;
mod events;
mod state;

pub use controller::{SendOutcome, SessionController};
pub use events::{SessionEvent, SessionListener, SubscriptionId};
pub use state::{ConversationState, Phase, SessionSnapshot};
