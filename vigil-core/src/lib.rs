//! vigil-core: task lifecycle and escalation contracts for the vigil
//! security-alert bot.
//!
//! The bot's driver loop, chat channel, 2FA check, and storage backends are
//! host concerns; this crate fixes the shapes they meet at: `Task` and
//! `TaskStatus` (the forward-only lifecycle), `Escalation` (when a
//! secondary responder gets paged), and `Tasker` (phase-partitioned task
//! queries). `MemoryTasker` is the in-process reference source.

pub mod escalation;
pub mod memory;
pub mod task;
pub mod tasker;
pub mod time;

pub use escalation::{Escalation, EscalationPolicy};
pub use memory::{MemoryTaskHandle, MemoryTasker};
pub use task::{Task, TaskHandle, TaskStatus};
pub use tasker::Tasker;
