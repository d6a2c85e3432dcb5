//! Display tokens for a single workout step.
//!
//! Absolute power and heart-rate ranges share the custom target fields with
//! percentage ranges. They are told apart by an offset: watts are stored
//! +1000 and beats per minute +100, so anything above the offset is absolute.

use crate::workouts::mapping::{DurationType, Intensity, TargetType};
use crate::workouts::types::WorkoutStep;

/// Offset applied to absolute power ranges
pub const POWER_OFFSET: u32 = 1000;

/// Offset applied to absolute heart-rate ranges
pub const HEART_RATE_OFFSET: u32 = 100;

/// Duration token: seconds for `Time`, kilometres for `Distance`.
pub fn duration_token(step: &WorkoutStep) -> String {
    match step.duration_type {
        DurationType::Time => format!("{}s", f64::from(step.duration_value) / 1000.0),
        DurationType::Distance => format!("{}km", f64::from(step.duration_value) / 1.0e5),
        _ => String::new(),
    }
}

/// Power target token: zone, percentage of threshold, or watts.
pub fn power_token(step: &WorkoutStep) -> String {
    let (low, high) = (step.custom_target_value_low, step.custom_target_value_high);
    if step.target_value > 0 {
        format!("Z{}", step.target_value)
    } else if high <= POWER_OFFSET {
        format!("{}-{}%", low, high)
    } else {
        format!(
            "{}-{}W",
            low.saturating_sub(POWER_OFFSET),
            high.saturating_sub(POWER_OFFSET)
        )
    }
}

/// Heart-rate target token: zone, percentage of max, or bpm.
pub fn heart_rate_token(step: &WorkoutStep) -> String {
    let (low, high) = (step.custom_target_value_low, step.custom_target_value_high);
    if step.target_value > 0 {
        format!("Z{} HR", step.target_value)
    } else if high <= HEART_RATE_OFFSET {
        format!("{}-{}% HR", low, high)
    } else {
        format!(
            "{}-{} HR",
            low.saturating_sub(HEART_RATE_OFFSET),
            high.saturating_sub(HEART_RATE_OFFSET)
        )
    }
}

/// Cadence target token.
pub fn cadence_token(step: &WorkoutStep) -> String {
    if step.target_value > 0 {
        format!("{}rpm", step.target_value)
    } else {
        format!(
            "{}-{}rpm",
            step.custom_target_value_low, step.custom_target_value_high
        )
    }
}

/// Target token from the target fields alone. Empty for other target types.
pub fn target_token(step: &WorkoutStep) -> String {
    match step.target_type {
        TargetType::Power | TargetType::PowerLap => power_token(step),
        TargetType::HeartRate | TargetType::HeartRateLap => heart_rate_token(step),
        TargetType::Cadence => cadence_token(step),
        _ => String::new(),
    }
}

/// Target token after intensity overrides.
pub fn effective_target_token(step: &WorkoutStep) -> String {
    match step.intensity {
        Intensity::Warmup => "ramp Z1-Z2".to_string(),
        Intensity::Cooldown => "ramp Z2-Z1".to_string(),
        Intensity::Recovery | Intensity::Rest => "Z1".to_string(),
        _ => target_token(step),
    }
}

/// Section header opened by warmup and cooldown steps.
pub fn section_prefix(intensity: Intensity) -> &'static str {
    match intensity {
        Intensity::Warmup => "\nWarmup\n",
        Intensity::Cooldown => "\nCooldown\n",
        _ => "",
    }
}

/// Free text folded onto one line so it cannot open a new script line.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render one non-repeat step as a script line, newline included.
///
/// Empty tokens are dropped so fields are always separated by one space.
pub fn step_line(step: &WorkoutStep) -> String {
    let tokens = [
        duration_token(step),
        effective_target_token(step),
        step.intensity.to_string(),
        single_line(&step.name),
        single_line(&step.notes),
    ];
    let body = tokens
        .iter()
        .filter(|token| !token.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    format!("{}- {}\n", section_prefix(step.intensity), body)
}
