//! Build the workout model from decoded FIT messages.

use crate::fit::{FileKind, FitFile, WorkoutStepMessage};
use crate::workouts::mapping::{DurationType, Intensity, Sport, TargetType};
use crate::workouts::types::{ConvertError, Workout, WorkoutStep};

/// Convert one `workout_step` message.
///
/// Absent (invalid) numeric fields become zero. Enumerated values missing
/// from the tables are kept as `Unrecognized`.
pub fn build_step(message: &WorkoutStepMessage) -> WorkoutStep {
    WorkoutStep {
        index: message.message_index,
        name: message.name.clone(),
        duration_type: message
            .duration_type
            .map(DurationType::from_fit)
            .unwrap_or_default(),
        duration_value: message.duration_value.unwrap_or_default(),
        target_type: message
            .target_type
            .map(TargetType::from_fit)
            .unwrap_or_default(),
        target_value: message.target_value.unwrap_or_default(),
        custom_target_value_low: message.custom_target_value_low.unwrap_or_default(),
        custom_target_value_high: message.custom_target_value_high.unwrap_or_default(),
        intensity: message
            .intensity
            .map(Intensity::from_fit)
            .unwrap_or_default(),
        notes: message.notes.clone(),
    }
}

/// Build a workout from a decoded FIT file.
///
/// Fails with [`ConvertError::WrongFileKind`] unless the file declares itself
/// a workout file. Steps keep message order.
pub fn build_workout(file: &FitFile) -> Result<Workout, ConvertError> {
    match file.kind() {
        Some(FileKind::Workout) => {}
        Some(other) => {
            return Err(ConvertError::WrongFileKind {
                found: other.to_string(),
            })
        }
        None => {
            return Err(ConvertError::WrongFileKind {
                found: "no file_id".to_string(),
            })
        }
    }

    let steps: Vec<WorkoutStep> = file.workout_steps().map(build_step).collect();

    let (name, sport) = match file.workout() {
        Some(workout) => (
            workout.name.clone(),
            workout.sport.and_then(Sport::from_fit),
        ),
        None => (String::new(), None),
    };

    tracing::debug!(name = %name, steps = steps.len(), "Built workout from FIT messages");

    Ok(Workout {
        name,
        sport,
        steps,
        ..Default::default()
    })
}
