//! JSON and YAML documents for workouts and plans.
//!
//! Both formats use the same field names, so a document converted from one
//! to the other reads back into an identical model.

use crate::workouts::plan::TrainingPlan;
use crate::workouts::types::{ConvertError, Workout};

impl Workout {
    /// Export to compact JSON.
    pub fn to_json(&self) -> Result<String, ConvertError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Export to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConvertError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a workout from JSON.
    pub fn from_json(s: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Export to YAML.
    pub fn to_yaml(&self) -> Result<String, ConvertError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse a workout from YAML.
    pub fn from_yaml(s: &str) -> Result<Self, ConvertError> {
        Ok(serde_yaml::from_str(s)?)
    }
}

impl TrainingPlan {
    pub fn to_json(&self) -> Result<String, ConvertError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConvertError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a plan from JSON.
    pub fn from_json(s: &str) -> Result<Self, ConvertError> {
        let plan: TrainingPlan = serde_json::from_str(s)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn to_yaml(&self) -> Result<String, ConvertError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse and validate a plan from YAML.
    pub fn from_yaml(s: &str) -> Result<Self, ConvertError> {
        let plan: TrainingPlan = serde_yaml::from_str(s)?;
        plan.validate()?;
        Ok(plan)
    }
}
