//! RustWorkouts - structured workout conversion
//!
//! Reads and writes FIT workout files, converts workouts and training plans
//! to and from JSON and YAML, and renders workouts as interval scripts with
//! repeat blocks reconstructed from FIT repeat steps.

pub mod fit;
pub mod storage;
pub mod workouts;

// Re-export commonly used types
pub use fit::{CodecError, FitFile};
pub use storage::config::AppConfig;
pub use workouts::{ConvertError, TrainingPlan, Workout, WorkoutStep};
