//! Tasker: the source-of-tasks contract, partitioned by lifecycle phase.

use anyhow::Result;

use crate::task::TaskHandle;

/// A source of tasks the bot should act on.
///
/// Status is the sole discriminant between the three queries, so every live
/// task belongs to exactly one result set at any instant. Ordering within a
/// result is irrelevant. One concrete, storage-backed implementation exists
/// per deployment; failure modes (storage down, network) surface through
/// the `Result`.
pub trait Tasker {
    type Handle: TaskHandle;

    /// Tasks still open: the initial message has not gone out yet. Once the
    /// driver advances a task's status the task stops appearing here, so no
    /// alertee gets the initial contact twice.
    fn get_new_tasks(&self) -> Result<Vec<Self::Handle>>;

    /// Tasks in progress: alertee contacted, no reply yet. Meant to be
    /// polled; the same task keeps appearing until its status advances, and
    /// re-ping pacing is the driver's concern.
    fn get_active_tasks(&self) -> Result<Vec<Self::Handle>>;

    /// Tasks in verification: alertee replied, waiting for an operator to
    /// close them out.
    fn get_pending_tasks(&self) -> Result<Vec<Self::Handle>>;
}
