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

//! Configuration for the assistant session: where the portal API lives,
//! which environment that is, and where the sign-in token is kept.

mod environment;
mod schema;
mod token;

pub use environment::{Endpoint, Environment};
pub use schema::{ApiConfig, Config, WidgetConfig};
pub use token::TokenFile;
