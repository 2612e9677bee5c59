//! Growth tracking: the badge set, the progress tree, and the declarative
//! badge-award table.
//!
//! Badge identifiers are a closed enum, so an unknown-badge lookup cannot be
//! expressed at all. Award conditions live in [`BADGE_RULES`], one predicate
//! per badge, evaluated uniformly against every emitted event.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, SubjectId, READ_PREFIX};
use crate::events::Event;

/// Tree levels gained on a first-time badge award.
const BADGE_GROWTH: u32 = 5;

/// Closed set of badge identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FocusStar,
    MathMaster,
    ReadingHelper,
}

impl Badge {
    pub const ALL: [Badge; 3] = [Badge::FocusStar, Badge::MathMaster, Badge::ReadingHelper];

    pub fn name(self) -> &'static str {
        match self {
            Badge::FocusStar => "Focus Star",
            Badge::MathMaster => "Math Master",
            Badge::ReadingHelper => "Reading Helper",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Badge::FocusStar => "Completed a full focus/break cycle with the time compass",
            Badge::MathMaster => "Completed every Math unit",
            Badge::ReadingHelper => "Finished the first reading task in Literature",
        }
    }
}

/// One row of the badge table: a badge and the event predicate that earns it.
pub struct BadgeRule {
    pub badge: Badge,
    pub applies: fn(&Event, &Catalog) -> bool,
}

fn focus_star_applies(event: &Event, _catalog: &Catalog) -> bool {
    matches!(event, Event::CycleCompleted { .. })
}

fn reading_helper_applies(event: &Event, _catalog: &Catalog) -> bool {
    matches!(
        event,
        Event::TaskCompleted {
            subject: SubjectId::Literature,
            task_name,
            ..
        } if task_name.starts_with(READ_PREFIX)
    )
}

// Scoped to Math completions: a non-Math completion can never change Math's
// completion state, so evaluating it there would be a dead check.
fn math_master_applies(event: &Event, catalog: &Catalog) -> bool {
    match event {
        Event::TaskCompleted {
            subject: SubjectId::Math,
            ..
        } => catalog
            .subject(SubjectId::Math)
            .units
            .iter()
            .all(|u| u.is_complete()),
        _ => false,
    }
}

/// Award conditions, evaluated in order after every event.
pub const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule {
        badge: Badge::FocusStar,
        applies: focus_star_applies,
    },
    BadgeRule {
        badge: Badge::ReadingHelper,
        applies: reading_helper_applies,
    },
    BadgeRule {
        badge: Badge::MathMaster,
        applies: math_master_applies,
    },
];

/// Badges whose condition holds for `event` given the current catalog state.
pub fn badges_for(event: &Event, catalog: &Catalog) -> Vec<Badge> {
    BADGE_RULES
        .iter()
        .filter(|rule| (rule.applies)(event, catalog))
        .map(|rule| rule.badge)
        .collect()
}

/// Session-wide progress state: earned badges, tree level, completion count.
///
/// Every counter is monotone. The badge key set is fixed at construction;
/// only the earned flags flip, one way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthTracker {
    badges: BTreeMap<Badge, bool>,
    tree_level: u32,
    completed_tasks: u32,
}

impl GrowthTracker {
    pub fn new() -> Self {
        Self {
            badges: Badge::ALL.into_iter().map(|b| (b, false)).collect(),
            tree_level: 0,
            completed_tasks: 0,
        }
    }

    pub fn tree_level(&self) -> u32 {
        self.tree_level
    }

    pub fn completed_tasks(&self) -> u32 {
        self.completed_tasks
    }

    pub fn is_earned(&self, badge: Badge) -> bool {
        self.badges.get(&badge).copied().unwrap_or(false)
    }

    /// Award a badge. Returns `None` when already earned; the tree grows
    /// only on the first award.
    pub fn award_badge(&mut self, badge: Badge) -> Option<Event> {
        let earned = self.badges.entry(badge).or_insert(false);
        if *earned {
            return None;
        }
        *earned = true;
        self.tree_level += BADGE_GROWTH;
        Some(Event::BadgeAwarded {
            badge,
            tree_level: self.tree_level,
            at: Utc::now(),
        })
    }

    /// Record one newly completed task. Called once per distinct completion.
    pub fn add_progress(&mut self) -> Event {
        self.completed_tasks += 1;
        self.tree_level += 1;
        Event::TreeGrew {
            tree_level: self.tree_level,
            completed_tasks: self.completed_tasks,
            at: Utc::now(),
        }
    }

    /// Tree level plus earned badges with descriptions.
    pub fn render_achievements(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "--- 🌳 Hall of Growth 🌳 ---");
        let _ = writeln!(out, "Growth tree level: Lv.{}", self.tree_level);
        let _ = writeln!(out, "Badges earned:");
        let mut any = false;
        for (badge, earned) in &self.badges {
            if *earned {
                let _ = writeln!(out, "  🏅 {} - {}", badge.name(), badge.description());
                any = true;
            }
        }
        if !any {
            let _ = writeln!(out, "  (No badges yet. Keep adventuring!)");
        }
        let _ = writeln!(out, "----------------------------");
        out
    }
}

impl Default for GrowthTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_completed(subject: SubjectId, name: &str) -> Event {
        Event::TaskCompleted {
            subject,
            task_name: name.into(),
            at: Utc::now(),
        }
    }

    #[test]
    fn add_progress_moves_both_counters() {
        let mut tracker = GrowthTracker::new();
        tracker.add_progress();
        tracker.add_progress();
        assert_eq!(tracker.completed_tasks(), 2);
        assert_eq!(tracker.tree_level(), 2);
    }

    #[test]
    fn double_award_grows_tree_once() {
        let mut tracker = GrowthTracker::new();
        assert!(tracker.award_badge(Badge::FocusStar).is_some());
        assert_eq!(tracker.tree_level(), 5);
        assert!(tracker.award_badge(Badge::FocusStar).is_none());
        assert_eq!(tracker.tree_level(), 5);
        assert!(tracker.is_earned(Badge::FocusStar));
    }

    #[test]
    fn achievements_show_placeholder_then_badges() {
        let mut tracker = GrowthTracker::new();
        assert!(tracker.render_achievements().contains("No badges yet"));

        tracker.award_badge(Badge::ReadingHelper);
        let rendered = tracker.render_achievements();
        assert!(rendered.contains("Reading Helper"));
        assert!(rendered.contains(Badge::ReadingHelper.description()));
        assert!(!rendered.contains("No badges yet"));
    }

    #[test]
    fn reading_helper_needs_the_read_prefix() {
        let catalog = Catalog::builtin();
        let earned = badges_for(
            &task_completed(SubjectId::Literature, "Read 'Father's Back'"),
            &catalog,
        );
        assert_eq!(earned, vec![Badge::ReadingHelper]);

        let earned = badges_for(
            &task_completed(SubjectId::Literature, "Finish workbook pages 20-22"),
            &catalog,
        );
        assert!(earned.is_empty());
    }

    #[test]
    fn reading_helper_is_scoped_to_literature() {
        let catalog = Catalog::builtin();
        let earned = badges_for(&task_completed(SubjectId::Math, "Read ahead"), &catalog);
        assert!(earned.is_empty());
    }

    #[test]
    fn math_master_requires_all_math_units_complete() {
        let mut catalog = Catalog::builtin();
        let event = task_completed(SubjectId::Math, "Finish exercise set 5-1");
        assert!(badges_for(&event, &catalog).is_empty());

        for task in &mut catalog.subject_mut(SubjectId::Math).units[0].tasks {
            task.complete();
        }
        assert_eq!(badges_for(&event, &catalog), vec![Badge::MathMaster]);
    }

    #[test]
    fn math_master_ignores_other_subjects_even_when_math_is_done() {
        let mut catalog = Catalog::builtin();
        for task in &mut catalog.subject_mut(SubjectId::Math).units[0].tasks {
            task.complete();
        }
        let earned = badges_for(
            &task_completed(SubjectId::Literature, "Finish workbook pages 20-22"),
            &catalog,
        );
        assert!(earned.is_empty());
    }

    #[test]
    fn cycle_completion_earns_focus_star_only() {
        let catalog = Catalog::builtin();
        let event = Event::CycleCompleted { at: Utc::now() };
        assert_eq!(badges_for(&event, &catalog), vec![Badge::FocusStar]);
    }
}
