use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::SubjectId;
use crate::growth::Badge;
use crate::timer::Phase;

/// Every state change in the system produces an Event.
/// The interactive shell prints them; badge rules match on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A task moved from incomplete to complete.
    TaskCompleted {
        subject: SubjectId,
        task_name: String,
        at: DateTime<Utc>,
    },
    /// The growth tree grew by one level after a task completion.
    TreeGrew {
        tree_level: u32,
        completed_tasks: u32,
        at: DateTime<Utc>,
    },
    /// A badge was earned for the first time.
    BadgeAwarded {
        badge: Badge,
        tree_level: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// One phase of the focus/break cycle ran to zero.
    PhaseCompleted {
        phase: Phase,
        at: DateTime<Utc>,
    },
    /// Both phases elapsed; the cycle is done.
    CycleCompleted {
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::TaskCompleted {
            subject: SubjectId::Math,
            task_name: "Finish exercise set 5-1".into(),
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TaskCompleted");
        assert_eq!(json["subject"], "math");
    }
}
