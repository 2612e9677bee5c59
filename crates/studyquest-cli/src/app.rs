//! The interactive menu loop.
//!
//! `App` owns all session state (catalog, tracker, timer config) and is
//! generic over its I/O handles, so tests script the whole loop with an
//! in-memory reader and writer. Every user-input mistake is recovered
//! locally with a message; nothing here returns an error except real
//! terminal I/O failures.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use studyquest_core::{
    badges_for, Badge, Catalog, Event, FocusTimer, GrowthTracker, Phase, SubjectId, TimerConfig,
    TimerState,
};

/// Reserved input that backs out one menu level.
const BACK: &str = "b";

pub struct App<R, W> {
    catalog: Catalog,
    tracker: GrowthTracker,
    timer: TimerConfig,
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(timer: TimerConfig, input: R, output: W) -> Self {
        Self {
            catalog: Catalog::builtin(),
            tracker: GrowthTracker::new(),
            timer,
            input,
            output,
            clear_screen: true,
        }
    }

    /// Disable the ANSI screen clear between actions.
    pub fn without_clear(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    pub fn tracker(&self) -> &GrowthTracker {
        &self.tracker
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Top-level menu loop. Runs until the exit option or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", "=".repeat(40))?;
        writeln!(self.output, "   Welcome to the StudyQuest Adventure!")?;
        writeln!(self.output, "{}", "=".repeat(40))?;
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "--- Adventurer Base Camp ---")?;
            writeln!(self.output, "1. View the dashboard")?;
            writeln!(self.output, "2. Enter the learning map")?;
            writeln!(self.output, "3. Spin the time compass")?;
            writeln!(self.output, "4. Visit the hall of growth")?;
            writeln!(self.output, "5. End today's adventure")?;
            let Some(choice) = self.prompt("Choose your next move: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.show_dashboard()?,
                "2" => self.interact_with_map()?,
                "3" => self.run_timer()?,
                "4" => {
                    let achievements = self.tracker.render_achievements();
                    write!(self.output, "\n{achievements}")?;
                }
                "5" => break,
                _ => writeln!(self.output, "\nUnrecognized choice, pick again.")?,
            }
            self.pause_and_clear()?;
        }
        writeln!(
            self.output,
            "\nGreat adventuring today. Rest well -- tomorrow awaits!"
        )?;
        Ok(())
    }

    /// Fresh aggregation over the whole catalog on every call.
    fn show_dashboard(&mut self) -> io::Result<()> {
        let progress = self.catalog.progress();
        writeln!(self.output, "\n--- 🚀 Adventurer Dashboard 🚀 ---")?;
        writeln!(
            self.output,
            "Weekly quest progress: {} {:.1}%",
            progress.render_bar(),
            progress.percent()
        )?;
        writeln!(self.output, "\n--- Subject expeditions ---")?;
        for subject in self.catalog.subjects() {
            writeln!(
                self.output,
                "  {}. {} {}",
                subject.id.menu_key(),
                subject.theme_icon,
                subject.name
            )?;
        }
        writeln!(self.output, "---------------------------------")?;
        Ok(())
    }

    /// Nested selection: subject -> unit -> task.
    fn interact_with_map(&mut self) -> io::Result<()> {
        self.show_dashboard()?;
        let Some(key) = self.prompt("Enter the subject number to explore: ")? else {
            return Ok(());
        };
        let Some(subject_id) = self.catalog.subject_by_key(&key).map(|s| s.id) else {
            writeln!(self.output, "Invalid subject choice!")?;
            return Ok(());
        };

        loop {
            let (map, unit_count) = {
                let subject = self.catalog.subject(subject_id);
                (subject.render_map(), subject.units.len())
            };
            write!(self.output, "\n{map}")?;
            let Some(choice) =
                self.prompt("\nEnter a unit number ('b' returns to base camp): ")?
            else {
                return Ok(());
            };
            if choice.eq_ignore_ascii_case(BACK) {
                return Ok(());
            }
            let Some(unit_idx) = parse_index(&choice, unit_count) else {
                writeln!(self.output, "Invalid unit choice!")?;
                continue;
            };

            let (status, task_count) = {
                let unit = &self.catalog.subject(subject_id).units[unit_idx];
                (unit.render_status(), unit.tasks.len())
            };
            write!(self.output, "\n{status}")?;
            let Some(choice) =
                self.prompt("Pick the task you finished ('b' returns to the map): ")?
            else {
                return Ok(());
            };
            if choice.eq_ignore_ascii_case(BACK) {
                continue;
            }
            let Some(task_idx) = parse_index(&choice, task_count) else {
                writeln!(self.output, "Invalid task choice!")?;
                continue;
            };
            self.complete_task(subject_id, unit_idx, task_idx)?;
        }
    }

    /// Flag first, then progress, then badge rules -- strictly in that order.
    fn complete_task(
        &mut self,
        subject_id: SubjectId,
        unit_idx: usize,
        task_idx: usize,
    ) -> io::Result<()> {
        let task = &mut self.catalog.subject_mut(subject_id).units[unit_idx].tasks[task_idx];
        if task.completed {
            writeln!(self.output, "You already finished that one!")?;
            return Ok(());
        }
        task.complete();
        let task_name = task.name.clone();
        writeln!(
            self.output,
            "\n✨ Well done! You lit up the task node: [{task_name}]"
        )?;

        self.tracker.add_progress();
        writeln!(self.output, "Your growth tree grew a little taller!")?;

        let event = Event::TaskCompleted {
            subject: subject_id,
            task_name,
            at: Utc::now(),
        };
        for badge in badges_for(&event, &self.catalog) {
            self.award(badge)?;
        }
        Ok(())
    }

    /// Blocking focus/break cycle driver. Cannot fail; runs to completion.
    fn run_timer(&mut self) -> io::Result<()> {
        let mut timer = FocusTimer::new(self.timer.cycle());
        writeln!(self.output, "\n⏳ The magic time compass is spinning!")?;
        if let Some(Event::TimerStarted { duration_secs, .. }) = timer.start() {
            writeln!(
                self.output,
                "Focus for the next {} -- you can do it!",
                format_secs(duration_secs)
            )?;
        }

        let poll = Duration::from_millis(self.timer.poll_ms.max(1));
        let mut completed = None;
        while completed.is_none() {
            thread::sleep(poll);
            match timer.tick() {
                Some(Event::PhaseCompleted {
                    phase: Phase::Focus,
                    ..
                }) => {
                    writeln!(self.output, "\n🔔 Time! Focus phase done -- great work!")?;
                    writeln!(
                        self.output,
                        "Break time: stand up, stretch, look out the window."
                    )?;
                }
                Some(event @ Event::CycleCompleted { .. }) => {
                    writeln!(self.output, "🔔 Break over. Ready for the next quest?")?;
                    completed = Some(event);
                }
                _ => {}
            }
        }
        debug_assert_eq!(timer.state(), TimerState::Completed);

        if let Some(event) = completed {
            for badge in badges_for(&event, &self.catalog) {
                self.award(badge)?;
            }
        }
        Ok(())
    }

    /// First-time awards announce themselves; repeats are silent no-ops.
    fn award(&mut self, badge: Badge) -> io::Result<()> {
        if self.tracker.award_badge(badge).is_some() {
            writeln!(
                self.output,
                "\n🏆🎉 Congratulations! You earned the badge: [{}]! 🎉🏆",
                badge.name()
            )?;
            writeln!(self.output, "Your growth tree shoots up! 🌳")?;
        }
        Ok(())
    }

    /// Prompt and read one trimmed line. `None` means end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn pause_and_clear(&mut self) -> io::Result<()> {
        let _ = self.prompt("\n(Press Enter to continue...)")?;
        if self.clear_screen {
            write!(self.output, "\x1b[2J\x1b[H")?;
            self.output.flush()?;
        }
        Ok(())
    }
}

/// 1-based menu input -> 0-based index, bounds-checked.
fn parse_index(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.parse().ok()?;
    if n == 0 || n > len {
        return None;
    }
    Some(n - 1)
}

fn format_secs(secs: u64) -> String {
    if secs >= 60 && secs % 60 == 0 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{secs} seconds")
    }
}
