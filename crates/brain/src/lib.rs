//! The Strix dispatcher — rule-based plus generative message processing.
//!
//! Every inbound message runs through one strict decision order:
//!
//! 1. **Task trigger** (`summarize` / `flashcards` / `quiz`, bare or
//!    `!`-prefixed) → render the task prompt and call the inference
//!    backend. A trigger always wins, even when a rule would also match.
//! 2. **Rule match** → evaluate the fact context against the plan table
//!    and reply with the most specific match.
//! 3. **Fallback** → the fixed "I have no idea how to respond!" line.
//!
//! Inference failures never escape: they are folded into the response
//! text, so `Brain::process` always completes and always answers.

pub mod brain;
pub mod prompts;
pub mod router;
pub mod service;

pub use brain::{Brain, FALLBACK_RESPONSE};
pub use router::TaskRouter;
pub use service::ChannelService;
