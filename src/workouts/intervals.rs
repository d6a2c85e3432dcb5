//! Interval-script rendering with repeat reconstruction.
//!
//! FIT stores repeats as flat back-references: a repeat step names the index
//! of the step its block starts at plus a repeat count. Rendering inverts that
//! in two passes over an arena of lines:
//!
//! 1. Every step owns one line. A repeat step prepends an `Nx` marker to the
//!    line of the step it points back to and leaves a blank separator.
//! 2. [`transform_repeats`] folds chains of markers (nested repeats that start
//!    on the same step) into one marker whose count is the product.

use std::fmt;

use crate::workouts::tokens::step_line;
use crate::workouts::types::{Workout, WorkoutStep};

/// Why a repeat step was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatIssue {
    /// Target index appears later in the workout
    ForwardReference,
    /// Repeat step points at itself
    SelfReference,
    /// No step carries the target index
    MissingTarget,
}

/// A repeat step that produced no marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatDiagnostic {
    pub step_index: u16,
    pub target_index: u32,
    pub count: u32,
    pub issue: RepeatIssue,
}

impl fmt::Display for RepeatDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.issue {
            RepeatIssue::ForwardReference => "points forward",
            RepeatIssue::SelfReference => "points at itself",
            RepeatIssue::MissingTarget => "points at a missing step",
        };
        write!(
            f,
            "repeat step {} ({}x back to step {}) {}; skipped",
            self.step_index, self.count, self.target_index, reason
        )
    }
}

/// Rendered interval script plus the repeats that could not be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalScript {
    pub text: String,
    pub diagnostics: Vec<RepeatDiagnostic>,
}

/// One arena entry: rendered text and the index of the step it came from.
#[derive(Debug)]
struct ScriptLine {
    origin: u16,
    text: String,
}

/// Render a workout as interval-script text.
pub fn render_intervals(workout: &Workout) -> IntervalScript {
    let mut lines: Vec<ScriptLine> = Vec::with_capacity(workout.steps.len());
    let mut diagnostics = Vec::new();

    for (position, step) in workout.steps.iter().enumerate() {
        if step.is_repeat() {
            if !apply_repeat(&mut lines, step) {
                let diagnostic = RepeatDiagnostic {
                    step_index: step.index,
                    target_index: step.duration_value,
                    count: step.target_value,
                    issue: classify_miss(workout, position, step),
                };
                tracing::warn!(workout = %workout.name, "{}", diagnostic);
                diagnostics.push(diagnostic);
            }
            lines.push(ScriptLine {
                origin: step.index,
                text: "\n".to_string(),
            });
        } else {
            lines.push(ScriptLine {
                origin: step.index,
                text: step_line(step),
            });
        }
    }

    let naive: String = lines.iter().map(|line| line.text.as_str()).collect();

    IntervalScript {
        text: transform_repeats(&naive),
        diagnostics,
    }
}

/// Prefix every earlier line of the target step with the repeat marker.
fn apply_repeat(lines: &mut [ScriptLine], step: &WorkoutStep) -> bool {
    let marker = format!("\n{}x\n", step.target_value);
    let mut matched = false;

    for line in lines
        .iter_mut()
        .filter(|line| u32::from(line.origin) == step.duration_value)
    {
        line.text.insert_str(0, &marker);
        matched = true;
    }

    matched
}

fn classify_miss(workout: &Workout, position: usize, step: &WorkoutStep) -> RepeatIssue {
    if u32::from(step.index) == step.duration_value {
        RepeatIssue::SelfReference
    } else if workout.steps[position + 1..]
        .iter()
        .any(|later| u32::from(later.index) == step.duration_value)
    {
        RepeatIssue::ForwardReference
    } else {
        RepeatIssue::MissingTarget
    }
}

/// Repeat count of a marker line such as `12x`.
fn marker_count(line: &str) -> Option<u32> {
    let digits = line.trim().strip_suffix('x')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Merge chains of repeat markers into one multiplied marker.
///
/// Blank lines are kept, except those between markers of one chain. A chain
/// is emitted as `"\n<product>x"` directly above the first content line that
/// follows it; a chain running to the end of the text is emitted alone.
pub fn transform_repeats(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let Some(mut count) = marker_count(lines[i]) else {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        };

        let mut next = i + 1;
        loop {
            while next < lines.len() && lines[next].trim().is_empty() {
                next += 1;
            }
            match lines.get(next).and_then(|line| marker_count(line)) {
                Some(inner) => {
                    count = count.saturating_mul(inner);
                    next += 1;
                }
                None => break,
            }
        }

        out.push(format!("\n{}x", count));
        match lines.get(next) {
            Some(content) => {
                out.push(content.to_string());
                i = next + 1;
            }
            None => i = next,
        }
    }

    out.join("\n")
}

impl Workout {
    /// Export to interval-script text.
    pub fn to_intervals(&self) -> String {
        render_intervals(self).text
    }
}
