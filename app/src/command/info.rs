use chatdock_config::{Config, TokenFile};
use chatdock_core::CredentialStore;

/// Strategy for displaying configuration information.
///
/// This strategy outputs:
/// - the resolved API endpoint and its environment
/// - request timeout and welcome message
/// - whether a token is stored (masked)
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let endpoint = config.api.endpoint();

        println!("=== chatdock Configuration ===\n");

        println!("API:");
        println!("  Host: {}", config.api.host);
        println!("  Environment: {}", endpoint.environment);
        println!("  Base URL: {}", endpoint.base_url);
        if config.api.base_url.is_some() {
            println!("  (base URL set explicitly)");
        }
        println!("  Timeout: {}s", config.api.timeout_secs);
        println!();

        println!("Widget:");
        println!(
            "  Welcome Message: {}",
            truncate(&config.widget.welcome_message, 60)
        );
        println!();

        println!("Credentials:");
        let store = TokenFile::default_location()?;
        println!("  Token File: {}", store.path().display());
        match store.token() {
            Some(token) => println!("  Token: {}", mask_token(&token)),
            None => println!("  Token: (not set)"),
        }

        Ok(())
    }
}

fn mask_token(token: &str) -> String {
    if token.chars().count() > 8 {
        let head: String = token.chars().take(4).collect();
        let tail: String = token
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_tokens_keep_only_the_ends() {
        assert_eq!(mask_token("abcdefghijklmnop"), "abcd...mnop");
        assert_eq!(mask_token("short"), "***");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("👋 Hi! I'm your AI assistant", 8), "👋 Hi!...");
    }
}
