//! Typed FIT messages exchanged across the codec boundary.
//!
//! Numeric fields that FIT marks as invalid (all bits set) are decoded as
//! `None`, so consumers never see the sentinel itself.

use chrono::{DateTime, Utc};

/// FIT `file` type values this crate distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Activity,
    Workout,
    Course,
    Other(u8),
}

impl FileKind {
    pub fn from_fit(raw: u8) -> Self {
        match raw {
            4 => FileKind::Activity,
            5 => FileKind::Workout,
            6 => FileKind::Course,
            other => FileKind::Other(other),
        }
    }

    pub fn to_fit(self) -> u8 {
        match self {
            FileKind::Activity => 4,
            FileKind::Workout => 5,
            FileKind::Course => 6,
            FileKind::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Activity => write!(f, "activity"),
            FileKind::Workout => write!(f, "workout"),
            FileKind::Course => write!(f, "course"),
            FileKind::Other(raw) => write!(f, "file type {}", raw),
        }
    }
}

/// `file_id` message.
#[derive(Debug, Clone, PartialEq)]
pub struct FileIdMessage {
    pub kind: FileKind,
    pub manufacturer: Option<u16>,
    pub product: Option<u16>,
    pub serial_number: Option<u32>,
    pub time_created: Option<DateTime<Utc>>,
}

/// `workout` message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutMessage {
    pub name: String,
    /// Raw FIT sport value
    pub sport: Option<u8>,
    pub num_valid_steps: Option<u16>,
}

/// `workout_step` message with raw field values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutStepMessage {
    pub message_index: u16,
    pub name: String,
    /// Raw FIT `wkt_step_duration` value
    pub duration_type: Option<u8>,
    pub duration_value: Option<u32>,
    /// Raw FIT `wkt_step_target` value
    pub target_type: Option<u8>,
    pub target_value: Option<u32>,
    pub custom_target_value_low: Option<u32>,
    pub custom_target_value_high: Option<u32>,
    /// Raw FIT `intensity` value
    pub intensity: Option<u8>,
    pub notes: String,
}

/// A decoded or to-be-encoded FIT message.
#[derive(Debug, Clone, PartialEq)]
pub enum FitMessage {
    FileId(FileIdMessage),
    Workout(WorkoutMessage),
    WorkoutStep(WorkoutStepMessage),
}

/// Ordered message sequence of one FIT file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitFile {
    pub messages: Vec<FitMessage>,
}

impl FitFile {
    pub fn new(messages: Vec<FitMessage>) -> Self {
        Self { messages }
    }

    /// First `file_id` message, if any.
    pub fn file_id(&self) -> Option<&FileIdMessage> {
        self.messages.iter().find_map(|m| match m {
            FitMessage::FileId(id) => Some(id),
            _ => None,
        })
    }

    /// Declared file kind.
    pub fn kind(&self) -> Option<FileKind> {
        self.file_id().map(|id| id.kind)
    }

    /// First `workout` message, if any.
    pub fn workout(&self) -> Option<&WorkoutMessage> {
        self.messages.iter().find_map(|m| match m {
            FitMessage::Workout(w) => Some(w),
            _ => None,
        })
    }

    /// `workout_step` messages in file order.
    pub fn workout_steps(&self) -> impl Iterator<Item = &WorkoutStepMessage> {
        self.messages.iter().filter_map(|m| match m {
            FitMessage::WorkoutStep(step) => Some(step),
            _ => None,
        })
    }
}

/// Treat the all-bits-set FIT invalid value as absent.
pub fn valid_u32(raw: u32) -> Option<u32> {
    (raw != u32::MAX).then_some(raw)
}

pub fn valid_u16(raw: u16) -> Option<u16> {
    (raw != u16::MAX).then_some(raw)
}

pub fn valid_enum(raw: u8) -> Option<u8> {
    (raw != u8::MAX).then_some(raw)
}
