//! Batch orchestration module
//!
//! Runs every input through encode, decode, verify and measure, one at a
//! time, under an optional wall-clock budget.

mod orchestrator;
pub mod types;


pub use orchestrator::{BatchOrchestrator, BatchOutcome};
pub use types::{BatchConfig, BatchConfigBuilder};
