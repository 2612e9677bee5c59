//! # StudyQuest Core Library
//!
//! This library provides the core logic for StudyQuest, a terminal-based
//! gamified learning tracker. All business logic lives here; the CLI binary
//! is a thin interactive shell over the same library.
//!
//! ## Key Components
//!
//! - [`Catalog`]: the fixed subject/unit/task content and dashboard
//!   aggregation
//! - [`GrowthTracker`]: badge set, tree level, and completion counters,
//!   with a declarative badge-rule table evaluated against [`Event`]s
//! - [`FocusTimer`]: a caller-ticked two-phase focus/break state machine
//! - [`Config`]: TOML configuration for timer durations

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod growth;
pub mod timer;

pub use catalog::{Catalog, ProgressSummary, Subject, SubjectId, Task, Unit, READ_PREFIX};
pub use config::{Config, TimerConfig};
pub use error::{ConfigError, CoreError, Result};
pub use events::Event;
pub use growth::{badges_for, Badge, BadgeRule, GrowthTracker, BADGE_RULES};
pub use timer::{Cycle, FocusTimer, Phase, TimerState};
