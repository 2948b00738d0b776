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

mod command;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use command::{
    ChatInput, ChatStrategy, ChunkInput, ChunkStrategy, CommandStrategy, InfoStrategy,
    InitStrategy, SummarizeInput, SummarizeStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "ragbot")]
#[command(about = "RAG assistant over your documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the RAG assistant
    Chat {
        /// Single message to send (non-interactive mode)
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Model to use
        #[arg(short = 'M', long)]
        model: Option<String>,

        /// Thread id to correlate checkpoints (generated if omitted)
        #[arg(short = 't', long)]
        thread: Option<String>,

        /// Number of messages kept in conversation context
        #[arg(long)]
        history_limit: Option<usize>,
    },
    /// Chunk a PDF and print extraction counts
    Chunk {
        /// PDF path or name relative to the data directory
        file: Option<String>,

        /// Directory searched for PDFs
        #[arg(short = 'd', long)]
        data_dir: Option<String>,

        /// Use plain per-page text extraction instead of the structured path
        #[arg(long)]
        fast: bool,
    },
    /// Summarize the text chunks of a PDF
    Summarize {
        /// PDF path or name relative to the data directory
        file: String,

        /// Summarize at most this many chunks
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            message,
            model,
            thread,
            history_limit,
        } => {
            ChatStrategy
                .execute(ChatInput {
                    message,
                    model,
                    thread,
                    history_limit,
                })
                .await
        }
        Commands::Chunk {
            file,
            data_dir,
            fast,
        } => {
            ChunkStrategy
                .execute(ChunkInput {
                    file,
                    data_dir,
                    fast,
                })
                .await
        }
        Commands::Summarize { file, limit } => {
            SummarizeStrategy.execute(SummarizeInput { file, limit }).await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
