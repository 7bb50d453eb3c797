use chatdock_config::TokenFile;

/// Strategy for storing the portal bearer token.
#[derive(Debug, Clone, Copy)]
pub struct LoginStrategy;

impl super::CommandStrategy for LoginStrategy {
    type Input = String;

    async fn execute(&self, token: Self::Input) -> anyhow::Result<()> {
        let store = TokenFile::default_location()?;
        store.save(&token)?;
        println!("✅ Token saved to {}", store.path().display());
        Ok(())
    }
}

/// Strategy for removing the stored token.
#[derive(Debug, Clone, Copy)]
pub struct LogoutStrategy;

impl super::CommandStrategy for LogoutStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let store = TokenFile::default_location()?;
        store.clear()?;
        println!("Signed out");
        Ok(())
    }
}
