//! Reading and writing workout files on disk.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::fit::{self, FitFile};
use crate::workouts::import_fit::build_workout;
use crate::workouts::types::{ConvertError, Workout};

/// Decode a FIT workout from memory.
pub fn workout_from_fit_bytes(content: &[u8]) -> Result<Workout, ConvertError> {
    let file = fit::decode(content)?;
    build_workout(&file)
}

/// Read a FIT workout file. The path is recorded as the workout's filename.
pub fn read_fit(path: &Path) -> Result<Workout, ConvertError> {
    let content = std::fs::read(path)?;
    let mut workout = workout_from_fit_bytes(&content)?;
    workout.filename = path.display().to_string();

    tracing::info!(
        path = %path.display(),
        steps = workout.steps.len(),
        "Read FIT workout"
    );
    Ok(workout)
}

/// Encode and write a FIT file.
///
/// Encoding happens before the path is touched, so a failed encode or a
/// tripped overwrite guard leaves the destination as it was.
pub fn write_fit(path: &Path, file: &FitFile, overwrite: bool) -> Result<(), ConvertError> {
    let content = fit::encode(file)?;
    write_guarded(path, &content, overwrite)
}

/// Write a text export with the same overwrite guard as [`write_fit`].
pub fn write_text(path: &Path, contents: &str, overwrite: bool) -> Result<(), ConvertError> {
    write_guarded(path, contents.as_bytes(), overwrite)
}

fn write_guarded(path: &Path, content: &[u8], overwrite: bool) -> Result<(), ConvertError> {
    if path.exists() && !overwrite {
        return Err(ConvertError::FileExists(path.to_path_buf()));
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(content)?;
    file.flush()?;

    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}
