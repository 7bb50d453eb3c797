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

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;
mod render;

use command::{
    ChatInput, ChatStrategy, CommandStrategy, InfoStrategy, InitStrategy, LoginStrategy,
    LogoutStrategy, SuggestStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "chatdock")]
#[command(about = "Portal assistant chat in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open an assistant session
    Chat {
        /// Single message to send (non-interactive mode)
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Portal page path used to pick the page context, e.g. /MyTickets.html
        #[arg(short = 'p', long)]
        page: Option<String>,
    },
    /// Print the quick-start suggestions for a page
    Suggest {
        #[arg(short = 'p', long)]
        page: Option<String>,
    },
    /// Store the portal bearer token
    Login {
        #[arg(short = 't', long)]
        token: String,
    },
    /// Remove the stored token
    Logout,
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { message, page } => {
            ChatStrategy.execute(ChatInput { message, page }).await?;
        }
        Commands::Suggest { page } => SuggestStrategy.execute(page).await?,
        Commands::Login { token } => LoginStrategy.execute(token).await?,
        Commands::Logout => LogoutStrategy.execute(()).await?,
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Info => InfoStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}
