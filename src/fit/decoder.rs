//! FIT decoding through `fitparser`.
//!
//! `fitparser` resolves dynamic sub-fields (`duration_time`,
//! `custom_target_power_low`, ...) and applies their scale, so values come
//! back under different names and sometimes as floats. This module folds
//! them back into the raw integers carried by [`WorkoutStepMessage`].

use std::collections::HashSet;

use chrono::Utc;
use fitparser::de::{from_bytes_with_options, DecodeOption};
use fitparser::profile::MesgNum;
use fitparser::{FitDataField, FitDataRecord, Value};

use super::messages::{
    valid_enum, valid_u16, valid_u32, FileIdMessage, FileKind, FitFile, FitMessage,
    WorkoutMessage, WorkoutStepMessage,
};
use super::CodecError;

/// Smallest legal FIT header (protocol 1.0, no header CRC)
const MIN_HEADER_SIZE: usize = 12;

/// Decode a FIT file into its workout-related messages.
///
/// Messages other than `file_id`, `workout` and `workout_step` are skipped.
pub fn decode(content: &[u8]) -> Result<FitFile, CodecError> {
    if content.len() < MIN_HEADER_SIZE {
        return Err(CodecError::Decode(format!(
            "input is {} bytes, shorter than a FIT header",
            content.len()
        )));
    }

    let options: HashSet<DecodeOption> = [DecodeOption::ReturnNumericEnumValues]
        .into_iter()
        .collect();

    let records = from_bytes_with_options(content, &options)
        .map_err(|e| CodecError::Decode(format!("FIT parse error: {}", e)))?;

    if records.is_empty() {
        return Err(CodecError::Decode("FIT file contains no records".into()));
    }

    let mut messages = Vec::new();
    for record in &records {
        match record.kind() {
            MesgNum::FileId => messages.push(FitMessage::FileId(read_file_id(record)?)),
            MesgNum::Workout => messages.push(FitMessage::Workout(read_workout(record))),
            MesgNum::WorkoutStep => messages.push(FitMessage::WorkoutStep(read_step(record))),
            _ => {}
        }
    }

    tracing::debug!(
        records = records.len(),
        messages = messages.len(),
        "Decoded FIT file"
    );

    Ok(FitFile::new(messages))
}

fn read_file_id(record: &FitDataRecord) -> Result<FileIdMessage, CodecError> {
    let mut kind = None;
    let mut id = FileIdMessage {
        kind: FileKind::Other(u8::MAX),
        manufacturer: None,
        product: None,
        serial_number: None,
        time_created: None,
    };

    for field in record.fields() {
        match field.name() {
            "type" => kind = as_u64(field.value()).map(|v| FileKind::from_fit(v as u8)),
            "manufacturer" => id.manufacturer = as_u16(field.value()),
            "product" | "garmin_product" => id.product = as_u16(field.value()),
            "serial_number" => id.serial_number = as_u32(field.value()),
            "time_created" => {
                if let Value::Timestamp(t) = field.value() {
                    id.time_created = Some(t.with_timezone(&Utc));
                }
            }
            _ => {}
        }
    }

    id.kind = kind.ok_or_else(|| CodecError::Decode("file_id message has no type".into()))?;
    Ok(id)
}

fn read_workout(record: &FitDataRecord) -> WorkoutMessage {
    let mut workout = WorkoutMessage::default();

    for field in record.fields() {
        match field.name() {
            "wkt_name" => workout.name = as_string(field.value()),
            "sport" => workout.sport = as_enum(field.value()),
            "num_valid_steps" => workout.num_valid_steps = as_u16(field.value()),
            _ => {}
        }
    }

    workout
}

fn read_step(record: &FitDataRecord) -> WorkoutStepMessage {
    let mut step = WorkoutStepMessage::default();

    for field in record.fields() {
        match StepField::classify(field.name()) {
            Some(StepField::MessageIndex) => {
                step.message_index = as_u16(field.value()).unwrap_or_default()
            }
            Some(StepField::Name) => step.name = as_string(field.value()),
            Some(StepField::DurationType) => step.duration_type = as_enum(field.value()),
            Some(StepField::DurationValue) => step.duration_value = raw_u32(field),
            Some(StepField::TargetType) => step.target_type = as_enum(field.value()),
            Some(StepField::TargetValue) => step.target_value = raw_u32(field),
            Some(StepField::CustomLow) => step.custom_target_value_low = raw_u32(field),
            Some(StepField::CustomHigh) => step.custom_target_value_high = raw_u32(field),
            Some(StepField::Intensity) => step.intensity = as_enum(field.value()),
            Some(StepField::Notes) => step.notes = as_string(field.value()),
            None => {}
        }
    }

    step
}

/// `workout_step` fields, including every sub-field name of the dynamic ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepField {
    MessageIndex,
    Name,
    DurationType,
    DurationValue,
    TargetType,
    TargetValue,
    CustomLow,
    CustomHigh,
    Intensity,
    Notes,
}

impl StepField {
    fn classify(name: &str) -> Option<Self> {
        let field = match name {
            "message_index" => StepField::MessageIndex,
            "wkt_step_name" => StepField::Name,
            "duration_type" => StepField::DurationType,
            "target_type" => StepField::TargetType,
            "intensity" => StepField::Intensity,
            "notes" => StepField::Notes,
            "target_value" | "target_stroke_type" => StepField::TargetValue,
            n if n.starts_with("duration_") => StepField::DurationValue,
            n if n.starts_with("target_") && n.ends_with("_zone") => StepField::TargetValue,
            n if n.starts_with("repeat_") => StepField::TargetValue,
            n if n.starts_with("custom_target_") && n.ends_with("_low") => StepField::CustomLow,
            n if n.starts_with("custom_target_") && n.ends_with("_high") => {
                StepField::CustomHigh
            }
            _ => return None,
        };
        Some(field)
    }
}

/// Scale `fitparser` divided the raw value by for this (sub-)field name.
fn field_scale(name: &str) -> f64 {
    match name {
        "duration_time" | "repeat_time" => 1000.0,
        "duration_distance" | "repeat_distance" => 100.0,
        "custom_target_speed_low" | "custom_target_speed_high" => 1000.0,
        _ => 1.0,
    }
}

/// Raw unsigned value of a possibly scaled field; the invalid value is `None`.
fn raw_u32(field: &FitDataField) -> Option<u32> {
    let raw = match field.value() {
        Value::Float32(v) => (f64::from(*v) * field_scale(field.name())).round(),
        Value::Float64(v) => (v * field_scale(field.name())).round(),
        other => return as_u32(other),
    };
    if raw.is_finite() && raw >= 0.0 && raw <= u32::MAX as f64 {
        valid_u32(raw as u32)
    } else {
        None
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Enum(v) | Value::Byte(v) | Value::UInt8(v) | Value::UInt8z(v) => Some(u64::from(*v)),
        Value::UInt16(v) | Value::UInt16z(v) => Some(u64::from(*v)),
        Value::UInt32(v) | Value::UInt32z(v) => Some(u64::from(*v)),
        Value::UInt64(v) | Value::UInt64z(v) => Some(*v),
        Value::SInt8(v) => u64::try_from(*v).ok(),
        Value::SInt16(v) => u64::try_from(*v).ok(),
        Value::SInt32(v) => u64::try_from(*v).ok(),
        Value::SInt64(v) => u64::try_from(*v).ok(),
        Value::Array(values) => values.iter().find_map(as_u64),
        _ => None,
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    as_u64(value)
        .and_then(|v| u32::try_from(v).ok())
        .and_then(valid_u32)
}

fn as_u16(value: &Value) -> Option<u16> {
    as_u64(value)
        .and_then(|v| u16::try_from(v).ok())
        .and_then(valid_u16)
}

fn as_enum(value: &Value) -> Option<u8> {
    as_u64(value)
        .and_then(|v| u8::try_from(v).ok())
        .and_then(valid_enum)
}

fn as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim_end_matches('\0').to_string(),
        _ => String::new(),
    }
}
