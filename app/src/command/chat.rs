//! Multi-turn conversation command with streamed replies.

use std::io::Write;

use ragbot_config::Config;
use ragbot_conversation::ConversationSession;
use ragbot_core::{AgentExecutor, ReactAgent};
use ragbot_providers::GroqProvider;
use tracing::info;
use uuid::Uuid;

use super::resolve_groq_key;

const RAG_SYSTEM_PROMPT: &str = "\
You are a RAG (Retrieval-Augmented Generation) assistant.

Guidelines:
1. Answer ONLY from the retrieved context.
2. If the context does not contain the answer, say:
   \"I could not find the answer in the provided documents.\"
3. Keep responses clear and concise (3-5 sentences).
4. Do NOT create or guess information.
5. If sources are present, mention them at the end (e.g., [Source: filename]).";

const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
    /// Optional model override
    pub model: Option<String>,
    /// Optional thread id (generated if not provided)
    pub thread: Option<String>,
    /// Number of messages to keep in context
    pub history_limit: Option<usize>,
}

/// Strategy for executing the Chat command.
///
/// Builds a conversation session over the configured chat model and either
/// answers a single message or runs the interactive loop.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let api_key = resolve_groq_key(&config)?;

        let provider = GroqProvider::new(api_key);
        let model = input
            .model
            .unwrap_or_else(|| config.agents.defaults.model.clone());
        let agent = ReactAgent::new(provider, model);

        let thread_id = input
            .thread
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        let system_prompt = config
            .agents
            .defaults
            .system_prompt
            .clone()
            .unwrap_or_else(|| RAG_SYSTEM_PROMPT.to_string());
        let history_limit = input
            .history_limit
            .or(config.agents.defaults.history_limit)
            .unwrap_or(DEFAULT_HISTORY_LIMIT);

        info!("Starting conversation thread: {thread_id}");

        let mut session = ConversationSession::new(agent, thread_id)
            .with_system_prompt(&system_prompt)
            .with_max_history(history_limit);

        if let Some(message) = input.message {
            let result = session.run(&message, print_fragment).await;
            println!();
            info!("Turn completed (recovered: {})", result.recovered);
        } else {
            run_interactive(&mut session).await?;
        }

        Ok(())
    }
}

fn print_fragment(fragment: &str) {
    print!("{fragment}");
    let _ = std::io::stdout().flush();
}

async fn run_interactive<E>(session: &mut ConversationSession<E>) -> anyhow::Result<()>
where
    E: AgentExecutor,
{
    println!("=== RAG assistant (thread {}) ===", session.thread_id());
    println!("Type 'exit' or press Ctrl+C to end the session.");

    loop {
        print!("\nAsk RAG: ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            read = tokio::task::spawn_blocking(read_stdin_line) => {
                match read?? {
                    Some(line) => line,
                    None => break, // EOF
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        };

        let input = line.trim();
        if matches!(input, "exit" | "quit" | "q") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        session.run(input, print_fragment).await;
        println!();
    }

    println!("\nSession saved. Goodbye!");
    Ok(())
}

fn read_stdin_line() -> std::io::Result<Option<String>> {
    let mut buffer = String::new();
    let bytes = std::io::stdin().read_line(&mut buffer)?;
    if bytes == 0 {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}
