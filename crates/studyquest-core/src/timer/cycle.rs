use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

/// One focus/break cycle.
///
/// Durations come from configuration; production defaults are 25/5 minutes
/// but nothing in the engine assumes wall-clock-scale values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub focus_secs: u64,
    pub break_secs: u64,
}

impl Cycle {
    pub fn new(focus_secs: u64, break_secs: u64) -> Self {
        Self {
            focus_secs,
            break_secs,
        }
    }

    pub fn phase_secs(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Focus => self.focus_secs,
            Phase::Break => self.break_secs,
        }
    }

    /// Phase duration in milliseconds, saturating on overflow.
    pub fn phase_ms(&self, phase: Phase) -> u64 {
        self.phase_secs(phase).saturating_mul(1000)
    }
}

impl Default for Cycle {
    fn default() -> Self {
        Self {
            focus_secs: 25 * 60,
            break_secs: 5 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cycle_is_25_and_5_minutes() {
        let cycle = Cycle::default();
        assert_eq!(cycle.phase_secs(Phase::Focus), 1500);
        assert_eq!(cycle.phase_secs(Phase::Break), 300);
    }

    #[test]
    fn phase_ms_saturates() {
        let cycle = Cycle::new(u64::MAX, 0);
        assert_eq!(cycle.phase_ms(Phase::Focus), u64::MAX);
        assert_eq!(cycle.phase_ms(Phase::Break), 0);
    }
}
