//! The learning catalog: subjects, units, and tasks.
//!
//! Content is fixed at startup by [`Catalog::builtin`]. The only mutable
//! state in the whole model is each task's completion flag, which moves
//! false -> true exactly once and never reverts.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Marker prefix on reading tasks; the Reading Helper badge rule keys on it.
pub const READ_PREFIX: &str = "Read";

/// Segments in the dashboard progress bar, one per 10%.
const BAR_SEGMENTS: usize = 10;

/// Smallest trackable unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            completed: false,
        }
    }

    /// Mark the task complete. Monotone; callers guard against repeats.
    pub fn complete(&mut self) {
        self.completed = true;
    }
}

/// Ordered group of tasks representing a learning topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Unit {
    pub fn new(name: &str, tasks: Vec<Task>) -> Self {
        Self {
            name: name.into(),
            tasks,
        }
    }

    /// True iff every task is completed. Vacuously true for an empty unit.
    pub fn is_complete(&self) -> bool {
        self.tasks.iter().all(|t| t.completed)
    }

    /// Numbered task listing with completion markers.
    pub fn render_status(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "--- Unit: {} ---", self.name);
        for (i, task) in self.tasks.iter().enumerate() {
            let marker = if task.completed { "✅" } else { "🔲" };
            let _ = writeln!(out, "  {}. {} {}", i + 1, marker, task.name);
        }
        if self.is_complete() {
            let _ = writeln!(out, "🌟 Every node in this unit is lit up!");
        }
        out
    }
}

/// Closed set of subject identifiers.
///
/// Subjects are addressed by id everywhere; free-form string keys exist only
/// at the menu boundary via [`SubjectId::menu_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectId {
    Literature,
    Math,
}

impl SubjectId {
    pub const ALL: [SubjectId; 2] = [SubjectId::Literature, SubjectId::Math];

    /// The key typed at the subject-selection prompt.
    pub fn menu_key(self) -> &'static str {
        match self {
            SubjectId::Literature => "1",
            SubjectId::Math => "2",
        }
    }
}

/// A school subject: one knowledge-exploration map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub theme_icon: String,
    pub units: Vec<Unit>,
}

impl Subject {
    /// Numbered unit listing with complete / in-progress markers.
    pub fn render_map(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{icon} Welcome to the [{name}] knowledge map {icon}",
            icon = self.theme_icon,
            name = self.name
        );
        for (i, unit) in self.units.iter().enumerate() {
            let marker = if unit.is_complete() { "🌟" } else { "➡️" };
            let _ = writeln!(out, "  {}. {} Unit: {}", i + 1, marker, unit.name);
        }
        out
    }
}

/// Completed/total task counts across the whole catalog.
///
/// Recomputed fresh on every dashboard view, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSummary {
    /// Completion percentage; 0.0 for an empty catalog.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// Fixed-width progress bar, one segment per 10%, rounded down.
    pub fn render_bar(&self) -> String {
        let filled = ((self.percent() / 10.0) as usize).min(BAR_SEGMENTS);
        format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_SEGMENTS - filled))
    }
}

/// The fixed set of subjects available in a session.
///
/// Built once by [`Catalog::builtin`]; the subject array is indexed by
/// [`SubjectId`] and its structure never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    subjects: [Subject; SubjectId::ALL.len()],
}

impl Catalog {
    /// The built-in catalog content.
    pub fn builtin() -> Self {
        let literature = Subject {
            id: SubjectId::Literature,
            name: "Literature".into(),
            theme_icon: "📚".into(),
            units: vec![Unit::new(
                "Unit 1: Family Ties",
                vec![
                    Task::new(
                        "Read 'Father's Back'",
                        "Close-read the essay and trace the father-son imagery",
                    ),
                    Task::new(
                        "Finish workbook pages 20-22",
                        "Rhetoric and reading-comprehension drills",
                    ),
                ],
            )],
        };
        let math = Subject {
            id: SubjectId::Math,
            name: "Math".into(),
            theme_icon: "📐".into(),
            units: vec![Unit::new(
                "Unit 5: The Pythagorean Theorem",
                vec![
                    Task::new(
                        "Understand the Pythagorean theorem",
                        "Watch the lesson video",
                    ),
                    Task::new(
                        "Finish exercise set 5-1",
                        "Practice right-triangle calculations",
                    ),
                ],
            )],
        };
        Self {
            subjects: [literature, math],
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, id: SubjectId) -> &Subject {
        &self.subjects[id as usize]
    }

    pub fn subject_mut(&mut self, id: SubjectId) -> &mut Subject {
        &mut self.subjects[id as usize]
    }

    /// Resolve a typed menu key to a subject.
    pub fn subject_by_key(&self, key: &str) -> Option<&Subject> {
        SubjectId::ALL
            .into_iter()
            .find(|id| id.menu_key() == key)
            .map(|id| self.subject(id))
    }

    /// Aggregate completion counts over every subject, unit, and task.
    pub fn progress(&self) -> ProgressSummary {
        let mut summary = ProgressSummary {
            completed: 0,
            total: 0,
        };
        for subject in &self.subjects {
            for unit in &subject.units {
                summary.total += unit.tasks.len();
                summary.completed += unit.tasks.iter().filter(|t| t.completed).count();
            }
        }
        summary
    }
}
