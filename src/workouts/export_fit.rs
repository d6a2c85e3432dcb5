//! Convert the workout model into FIT messages.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::fit::{
    FileIdMessage, FileKind, FitFile, FitMessage, WorkoutMessage, WorkoutStepMessage,
};
use crate::workouts::mapping::Sport;
use crate::workouts::types::{Workout, WorkoutStep};

/// Device identity written into the `file_id` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitOptions {
    /// FIT manufacturer id (1 = Garmin, for device compatibility)
    pub manufacturer: u16,
    pub product: u16,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            manufacturer: 1,
            product: 1,
        }
    }
}

/// Convert one step into its `workout_step` message.
pub fn step_message(step: &WorkoutStep) -> WorkoutStepMessage {
    WorkoutStepMessage {
        message_index: step.index,
        name: step.name.clone(),
        duration_type: Some(step.duration_type.to_fit()),
        duration_value: Some(step.duration_value),
        target_type: Some(step.target_type.to_fit()),
        target_value: Some(step.target_value),
        custom_target_value_low: Some(step.custom_target_value_low),
        custom_target_value_high: Some(step.custom_target_value_high),
        intensity: Some(step.intensity.to_fit()),
        notes: step.notes.clone(),
    }
}

impl Workout {
    /// Export to a FIT workout file.
    ///
    /// A workout without a sport is written as `generic`.
    pub fn to_fit(&self, options: &FitOptions) -> FitFile {
        let mut messages = Vec::with_capacity(self.steps.len() + 2);

        messages.push(FitMessage::FileId(FileIdMessage {
            kind: FileKind::Workout,
            manufacturer: Some(options.manufacturer),
            product: Some(options.product),
            serial_number: None,
            time_created: Some(Utc::now()),
        }));

        messages.push(FitMessage::Workout(WorkoutMessage {
            name: self.name.clone(),
            sport: Some(self.sport.unwrap_or(Sport::Generic).to_fit()),
            num_valid_steps: Some(u16::try_from(self.steps.len()).unwrap_or(u16::MAX)),
        }));

        messages.extend(
            self.steps
                .iter()
                .map(|step| FitMessage::WorkoutStep(step_message(step))),
        );

        FitFile::new(messages)
    }
}
