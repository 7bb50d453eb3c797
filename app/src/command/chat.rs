//! Interactive assistant session in the terminal.
//!
//! The terminal plays the panel: `TerminalRenderer` paints controller
//! events and each input line is turned into one controller intent.

use chatdock_conversation::{SendOutcome, SessionController};
use chatdock_core::{AssistantClient, CredentialStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use super::{init_common_components, page_context};
use crate::render::TerminalRenderer;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
    /// Portal page path used to derive the page context
    pub page: Option<String>,
}

/// Strategy for executing the Chat command.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;
        let page = page_context(input.page.as_deref());

        let (controller, loading) = SessionController::launch(
            common.client,
            common.credentials,
            page,
            &common.config.widget.welcome_message,
        );
        controller.subscribe(TerminalRenderer::new());
        info!("Session {} started on page {page}", controller.id());

        if let Some(message) = input.message {
            // Suggestions must settle before the first send hides them.
            loading.await?;
            return send_once(&controller, &message).await;
        }

        println!("=== Assistant ({page}) ===");
        println!("{HELP}\n");
        controller.open();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match Intent::parse(&line) {
                Intent::Quit => break,
                Intent::Open => controller.open(),
                Intent::Close => controller.close(),
                Intent::Toggle => controller.toggle(),
                Intent::Help => println!("{HELP}"),
                Intent::Pick(index) => {
                    let suggestions = controller.suggestions();
                    match suggestions.get(index.wrapping_sub(1)) {
                        Some(text) if controller.suggestions_visible() => {
                            controller.pick_suggestion(text).await;
                        }
                        _ => println!("No suggestion #{index}"),
                    }
                }
                Intent::Send(text) => {
                    controller.send(&text).await;
                }
                Intent::Unknown(command) => println!("Unknown command /{command}. {HELP}"),
            }
        }

        debug!("Session {} input closed", controller.id());
        println!("\nSession ended. {} messages in history.", controller.history().len());
        Ok(())
    }
}

/// Run a single turn with the panel open, so progress is painted.
async fn send_once<C, K>(
    controller: &SessionController<C, K>,
    message: &str,
) -> anyhow::Result<()>
where
    C: AssistantClient,
    K: CredentialStore,
{
    controller.open();
    if let SendOutcome::Failed(err) = controller.send(message).await {
        anyhow::bail!("{err}");
    }
    Ok(())
}

const HELP: &str = "Type a message and press Enter. /N picks suggestion N, /open, /close, /toggle, /help, exit to quit.";

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Intent {
    Send(String),
    Pick(usize),
    Open,
    Close,
    Toggle,
    Help,
    Quit,
    Unknown(String),
}

impl Intent {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if matches!(line, "exit" | "quit" | "q") {
            return Self::Quit;
        }

        let Some(command) = line.strip_prefix('/') else {
            return Self::Send(line.to_string());
        };

        match command {
            "open" => Self::Open,
            "close" => Self::Close,
            "toggle" => Self::Toggle,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => other
                .parse::<usize>()
                .map_or_else(|_| Self::Unknown(other.to_string()), Self::Pick),
        }
    }
}
