//! Workout model types and errors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fit::CodecError;
use crate::workouts::mapping::{DurationType, Intensity, MappingError, Sport, TargetType};

/// One step of a structured workout.
///
/// The meaning of `duration_value` and the three target fields depends on
/// `duration_type` and `target_type`. For `RepeatUntilStepsCmplt` steps,
/// `duration_value` is the index of the step the repeat loops back to and
/// `target_value` is the repeat count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutStep {
    /// Ordinal used by repeat back-references
    #[serde(rename = "stepId")]
    pub index: u16,
    #[serde(rename = "wkt_step_name")]
    pub name: String,
    #[serde(rename = "durationType")]
    pub duration_type: DurationType,
    /// Milliseconds for `Time`, centimetres for `Distance`, step index for repeats
    #[serde(rename = "durationValue")]
    pub duration_value: u32,
    #[serde(rename = "targetType")]
    pub target_type: TargetType,
    /// Zone number, cadence, or repeat count
    #[serde(rename = "targetValue")]
    pub target_value: u32,
    #[serde(rename = "targetValueLow")]
    pub custom_target_value_low: u32,
    #[serde(rename = "targetValueHigh")]
    pub custom_target_value_high: u32,
    pub intensity: Intensity,
    #[serde(rename = "description")]
    pub notes: String,
}

impl WorkoutStep {
    /// Create a step with an open target.
    pub fn new(index: u16, duration_type: DurationType, duration_value: u32) -> Self {
        Self {
            index,
            duration_type,
            duration_value,
            ..Default::default()
        }
    }

    /// Create a step repeating from `back_to` for `count` rounds.
    pub fn repeat(index: u16, back_to: u16, count: u32) -> Self {
        Self {
            index,
            duration_type: DurationType::RepeatUntilStepsCmplt,
            duration_value: u32::from(back_to),
            target_value: count,
            ..Default::default()
        }
    }

    /// Set the target fields.
    pub fn with_target(mut self, target_type: TargetType, value: u32, low: u32, high: u32) -> Self {
        self.target_type = target_type;
        self.target_value = value;
        self.custom_target_value_low = low;
        self.custom_target_value_high = high;
        self
    }

    pub fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// True for steps that loop back to an earlier step.
    pub fn is_repeat(&self) -> bool {
        self.duration_type == DurationType::RepeatUntilStepsCmplt
    }
}

/// A structured workout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workout {
    /// Source file path (provenance only)
    pub filename: String,
    #[serde(rename = "workoutName")]
    pub name: String,
    /// Steps in execution order
    pub steps: Vec<WorkoutStep>,
    #[serde(with = "sport_token")]
    pub sport: Option<Sport>,
    pub description: String,
}

impl Workout {
    /// Create a new workout with the given name and steps.
    pub fn new(name: impl Into<String>, sport: Option<Sport>, steps: Vec<WorkoutStep>) -> Self {
        Self {
            name: name.into(),
            sport,
            steps,
            ..Default::default()
        }
    }

    /// Find a step by its index.
    pub fn step_by_index(&self, index: u16) -> Option<&WorkoutStep> {
        self.steps.iter().find(|step| step.index == index)
    }
}

/// Sport serialized as its token, with `""` standing for no sport.
mod sport_token {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::workouts::mapping::Sport;

    pub fn serialize<S: Serializer>(sport: &Option<Sport>, serializer: S) -> Result<S::Ok, S::Error> {
        match sport {
            Some(sport) => serializer.serialize_str(&sport.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Sport>, D::Error> {
        let token = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if token.is_empty() {
            return Ok(None);
        }
        token.parse().map(Some).map_err(de::Error::custom)
    }
}

/// Errors while converting workouts between representations.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// FIT decode or encode failure
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Valid FIT file that is not a workout
    #[error("We only accept FIT files of type workout, got {found}")]
    WrongFileKind { found: String },

    /// Token missing from a mapping table
    #[error(transparent)]
    UnknownToken(#[from] MappingError),

    /// Write guard tripped
    #[error("File exists and overwrite was set to false: {}", .0.display())]
    FileExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Structurally valid plan document breaking a plan invariant
    #[error("Invalid training plan: {0}")]
    InvalidPlan(String),
}
