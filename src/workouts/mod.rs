//! Workout model and conversions.

pub mod document;
pub mod export_fit;
pub mod files;
pub mod import_fit;
pub mod intervals;
pub mod mapping;
pub mod plan;
pub mod tokens;
pub mod types;

pub use export_fit::FitOptions;
pub use files::{read_fit, workout_from_fit_bytes, write_fit, write_text};
pub use import_fit::{build_step, build_workout};
pub use intervals::{render_intervals, transform_repeats, IntervalScript, RepeatDiagnostic};
pub use mapping::{DurationType, Intensity, MappingError, Sport, TargetType};
pub use plan::{NewTrainingPlan, PlanList, TrainingDay, TrainingPlan};
pub use types::{ConvertError, Workout, WorkoutStep};
