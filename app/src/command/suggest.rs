use chatdock_core::{AssistantClient, CredentialStore};
use tracing::info;

use super::{init_common_components, page_context};

/// Strategy for printing the quick-start suggestions of a page.
///
/// Unlike a chat session, a missing token is reported here since fetching
/// suggestions is the whole point of the command.
#[derive(Debug, Clone, Copy)]
pub struct SuggestStrategy;

impl super::CommandStrategy for SuggestStrategy {
    type Input = Option<String>;

    async fn execute(&self, page: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;
        let page = page_context(page.as_deref());

        let Some(token) = common.credentials.token() else {
            anyhow::bail!("Not logged in. Run 'chatdock login --token <TOKEN>' first.");
        };

        info!("Fetching suggestions for page {page}");
        let suggestions = common.client.fetch_suggestions(page, &token).await?;

        println!("Suggestions for {page}:");
        for (i, suggestion) in suggestions.iter().enumerate() {
            println!("  {}. {suggestion}", i + 1);
        }
        Ok(())
    }
}
