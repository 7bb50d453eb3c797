//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use chatdock_config::{Config, TokenFile};
use chatdock_core::PageContext;
use chatdock_providers::HttpAssistantClient;
use tracing::info;

mod auth;
mod chat;
mod info;
mod init;
mod suggest;
mod version;

pub use auth::{LoginStrategy, LogoutStrategy};
pub use chat::{ChatInput, ChatStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use suggest::SuggestStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Pieces every networked command needs.
struct CommonComponents {
    config: Config,
    client: HttpAssistantClient,
    credentials: TokenFile,
}

fn init_common_components() -> anyhow::Result<CommonComponents> {
    let config = Config::load()?;
    info!("Loaded config from ~/chatdock/config.json");

    let endpoint = config.api.endpoint();
    info!(
        "Using {} endpoint {}",
        endpoint.environment, endpoint.base_url
    );
    let client = HttpAssistantClient::with_timeout(&endpoint.base_url, config.api.timeout())?;
    let credentials = TokenFile::default_location()?;

    Ok(CommonComponents {
        config,
        client,
        credentials,
    })
}

fn page_context(page: Option<&str>) -> PageContext {
    page.map_or(PageContext::Default, PageContext::from_path)
}
