//! The streaming agent loop — the heart of Scout.
//!
//! Each request follows the same cycle:
//!
//! 1. **Receive** the caller's messages and seed a transcript behind the
//!    system prompt
//! 2. **Stream from the LLM**, forwarding text deltas to the client as
//!    they arrive and accumulating tool-call fragments by index
//! 3. **If tool calls**: execute them in index order, append results to
//!    the transcript, loop back to step 2 with the full transcript
//! 4. **If text only**: the turn is the final answer and the stream ends
//!
//! Errors end the stream without any client-visible signal.

pub mod accumulator;
pub mod loop_runner;

pub use accumulator::{DeltaAccumulator, PendingToolCall};
pub use loop_runner::{AgentLoop, SYSTEM_PROMPT};
