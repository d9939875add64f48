//! Escalation: the delayed page to a secondary responder.
//!
//! The decision is pure: the driver computes elapsed time (now minus the
//! task's event time) and asks `should_notify`. Only after it has actually
//! paged the contact does it record the fact with `set_notified`.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::utc_from_naive;

/// Secondary-notification policy bound to exactly one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Escalation {
    /// Who gets paged when the alertee does not respond in time.
    pub contact: String,
    /// Wait this many seconds after the alert event before paging.
    /// Zero or negative means page immediately; accepted, not rejected.
    pub delay_secs: i64,
    notified_at: Option<DateTime<Utc>>,
}

impl Escalation {
    pub fn new(contact: impl Into<String>, delay_secs: i64) -> Self {
        Self {
            contact: contact.into(),
            delay_secs,
            notified_at: None,
        }
    }

    /// Rebuild from persisted state. A stored naive stamp is taken as UTC,
    /// same as task event times.
    pub fn restore(
        contact: impl Into<String>,
        delay_secs: i64,
        notified_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            contact: contact.into(),
            delay_secs,
            notified_at: notified_at.map(utc_from_naive),
        }
    }

    pub fn is_notified(&self) -> bool {
        self.notified_at.is_some()
    }

    pub fn notified_at(&self) -> Option<DateTime<Utc>> {
        self.notified_at
    }

    /// Record that the secondary contact was actually paged.
    ///
    /// The only mutator. Call exactly once per real dispatch, never
    /// speculatively; the stamp is never cleared afterwards.
    pub fn set_notified(&mut self) {
        self.notified_at = Some(Utc::now());
    }

    /// Whether the secondary contact is due a page: not yet notified, and
    /// strictly more than `delay_secs` whole seconds have elapsed since the
    /// alert event. Exactly at the threshold does not page.
    pub fn should_notify(&self, elapsed: Duration) -> bool {
        !self.is_notified() && elapsed.num_seconds() > self.delay_secs
    }
}

/// Defaults a task source applies when an alert row carries no explicit
/// escalation timing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EscalationPolicy {
    pub delay_secs: i64,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self { delay_secs: 3600 }
    }
}

impl EscalationPolicy {
    pub fn escalation(&self, contact: impl Into<String>) -> Escalation {
        Escalation::new(contact, self.delay_secs)
    }
}
