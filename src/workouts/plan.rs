//! Multi-day training plans.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workouts::types::{ConvertError, Workout};

/// One calendar day of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDay {
    /// Calendar day within the plan
    pub order: u32,
    pub workouts: Vec<Workout>,
}

impl TrainingDay {
    /// Create a training day. A day needs at least one workout.
    pub fn new(order: u32, workouts: Vec<Workout>) -> Result<Self, ConvertError> {
        if workouts.is_empty() {
            return Err(ConvertError::InvalidPlan(format!(
                "training day {} has no workouts",
                order
            )));
        }
        Ok(Self { order, workouts })
    }
}

/// A training plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPlan {
    #[serde(rename = "ID")]
    pub id: Uuid,
    #[serde(default)]
    pub filename: String,
    pub name: String,
    #[serde(rename = "trainingDays")]
    pub training_days: Vec<TrainingDay>,
    /// Number of calendar days spanned
    pub duration: u32,
    #[serde(default)]
    pub description: String,
}

impl TrainingPlan {
    /// Create a plan with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        training_days: Vec<TrainingDay>,
        duration: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: String::new(),
            name: name.into(),
            training_days,
            duration,
            description: description.into(),
        }
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if let Some(day) = self.training_days.iter().find(|d| d.workouts.is_empty()) {
            return Err(ConvertError::InvalidPlan(format!(
                "training day {} has no workouts",
                day.order
            )));
        }
        Ok(())
    }

    /// Total number of workouts over all days.
    pub fn workout_count(&self) -> usize {
        self.training_days.iter().map(|d| d.workouts.len()).sum()
    }
}

/// A plan that has not been assigned an id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTrainingPlan {
    pub filename: String,
    pub name: String,
    #[serde(rename = "trainingDays")]
    pub training_days: Vec<TrainingDay>,
    pub duration: u32,
    pub description: String,
}

impl NewTrainingPlan {
    /// Assign an id, producing a full plan.
    pub fn into_plan(self) -> TrainingPlan {
        TrainingPlan {
            id: Uuid::new_v4(),
            filename: self.filename,
            name: self.name,
            training_days: self.training_days,
            duration: self.duration,
            description: self.description,
        }
    }
}

/// A list of stored plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanList {
    pub plans: Vec<TrainingPlan>,
}
