//! Task model: the alert record and its forward-only lifecycle.
//!
//! A `Task` is one security alert waiting on a human. The driver contacts
//! the alertee, waits for a reply, and hands the result to an operator for
//! closure. Storage and messaging live behind the `Tasker`/`TaskHandle`
//! seams; this module owns the shape they agree on.

use std::fmt;

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::escalation::Escalation;
use crate::time::utc_from_naive;

/// Lifecycle states for a task.
///
/// Transitions only move forward: open -> inprogress -> verification.
/// Closure and archival happen outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Alert exists, initial contact not yet sent.
    Open,
    /// Alertee contacted, awaiting their reply.
    InProgress,
    /// Alertee replied, awaiting manual operator closure.
    Verification,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "open"),
            TaskStatus::InProgress => write!(f, "inprogress"),
            TaskStatus::Verification => write!(f, "verification"),
        }
    }
}

/// One tracked security alert requiring human disposition.
///
/// `event_time` is always UTC; raw source stamps are normalized once, at
/// construction. `performed` and `comment` hold source placeholders until
/// the alertee has actually replied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    /// The alertee: the user this alert goes to.
    pub username: String,
    /// Why the alert fired.
    pub reason: String,
    pub description: String,
    /// Link to the alert context itself, not the task.
    pub url: String,
    /// Whether the alertee says they performed the flagged action.
    pub performed: bool,
    /// The alertee's justification, empty until they reply.
    pub comment: String,
    /// Whether the second-factor check passed.
    pub authenticated: bool,
    pub status: TaskStatus,
    pub event_time: DateTime<Utc>,
    pub escalation: Option<Escalation>,
}

impl Task {
    /// Build a task from raw source fields.
    ///
    /// Fails when the source has no event time: all escalation timing
    /// derives from it, so a task with an unknown origin time is refused
    /// outright. The naive stamp is taken as UTC; sources holding
    /// local-zone stamps convert first via `crate::time::local_naive_to_utc`.
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        reason: impl Into<String>,
        event_time: Option<NaiveDateTime>,
    ) -> Result<Self> {
        let title = title.into();
        let Some(event_time) = event_time else {
            bail!("task '{title}' has no event time");
        };
        Ok(Self {
            title,
            username: username.into(),
            reason: reason.into(),
            description: String::new(),
            url: String::new(),
            performed: false,
            comment: String::new(),
            authenticated: false,
            status: TaskStatus::Open,
            event_time: utc_from_naive(event_time),
            escalation: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Record the alertee's reply fields.
    pub fn with_response(mut self, performed: bool, comment: impl Into<String>) -> Self {
        self.performed = performed;
        self.comment = comment.into();
        self
    }

    pub fn with_authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_escalation(mut self, escalation: Escalation) -> Self {
        self.escalation = Some(escalation);
        self
    }

    pub fn is_open(&self) -> bool {
        self.status == TaskStatus::Open
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == TaskStatus::InProgress
    }

    pub fn is_verifying(&self) -> bool {
        self.status == TaskStatus::Verification
    }
}

/// Complete audit line: every attribute, no redaction.
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "task '{}' user={} status={} event_time={} performed={} authenticated={} \
             reason='{}' description='{}' url='{}' comment='{}' escalation={:?}",
            self.title,
            self.username,
            self.status,
            self.event_time.to_rfc3339(),
            self.performed,
            self.authenticated,
            self.reason,
            self.description,
            self.url,
            self.comment,
            self.escalation,
        )
    }
}

/// Per-task mutation surface implemented by a concrete task source.
///
/// Transitions must be durably visible before the call returns: a `Tasker`
/// query issued afterwards observes the new status. The trait enforces no
/// precondition on transition order (the driver's protocol is forward-only;
/// sources may add guards). Storage failure modes are the implementation's
/// to surface through the `Result`.
pub trait TaskHandle {
    /// The task as this handle last observed it.
    fn task(&self) -> &Task;

    fn set_open(&mut self) -> Result<()>;

    fn set_in_progress(&mut self) -> Result<()>;

    fn set_verifying(&mut self) -> Result<()>;

    /// Install or replace the task's escalation, persisting the association
    /// where the source is storage-backed.
    fn set_escalated(&mut self, escalation: Escalation) -> Result<()>;
}
