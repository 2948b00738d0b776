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

//! Multi-turn conversation support over a streaming agent executor.
//!
//! A session owns the full in-memory message history for one conversation
//! and mediates each request/response turn: user intake, streamed fragment
//! consumption, history truncation, and degraded-mode recovery.

mod session;

pub use session::{ConversationSession, FALLBACK_REPLY, TurnResult};
