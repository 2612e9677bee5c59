mod cycle;
mod engine;

pub use cycle::{Cycle, Phase};
pub use engine::{FocusTimer, TimerState};
