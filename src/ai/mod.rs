//! Conversational-AI pass-through.
//!
//! The client never sees the AI key: requests arrive with the app token,
//! leave with `X-API-Key`, and the upstream JSON comes back wrapped as
//! `{response, raw}`.

pub mod client;
pub mod types;

pub use client::AiClient;
pub use types::{AiChatRequest, AiChatResponse, AiError};
