//! Fixed user-facing strings.

use crate::AssistantError;

/// Seed entry shown when a session opens.
pub const DEFAULT_WELCOME_MESSAGE: &str = "👋 Hi! I'm your AI assistant. How can I help you today?";

/// Shown by renderers while a reply is pending.
pub const COMPOSING_INDICATOR: &str = "AI is thinking...";

/// Used when a failed response carries no usable `detail`.
pub const GENERIC_REQUEST_FAILURE: &str = "AI request failed";

/// Transcript text for a failed turn.
#[must_use]
pub fn error_summary(err: &AssistantError) -> String {
    format!("❌ Error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_carry_the_error_text() {
        assert_eq!(
            error_summary(&AssistantError::Unauthenticated),
            "❌ Error: Not authenticated"
        );
        assert_eq!(
            error_summary(&AssistantError::RequestFailed("overloaded".to_string())),
            "❌ Error: overloaded"
        );
    }
}
