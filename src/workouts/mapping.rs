//! String token <-> FIT enumerated value tables.
//!
//! Each enumerated kind keeps a single static entry list of
//! `(token, fit value, variant)` triples. The forward and reverse hash maps
//! are built from that list the first time the table is touched.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the mapping tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Token is not part of the table for this kind
    #[error("Unknown {kind} token: {token:?}")]
    UnknownToken { kind: &'static str, token: String },
}

/// Bidirectional lookup table for one enumerated kind.
pub struct MappingTable<T: 'static> {
    entries: &'static [(&'static str, u8, T)],
    by_token: HashMap<&'static str, T>,
    by_fit: HashMap<u8, T>,
    token_of: HashMap<T, &'static str>,
    fit_of: HashMap<T, u8>,
}

impl<T: Copy + Eq + Hash> MappingTable<T> {
    fn new(entries: &'static [(&'static str, u8, T)]) -> Self {
        let mut table = Self {
            entries,
            by_token: HashMap::with_capacity(entries.len()),
            by_fit: HashMap::with_capacity(entries.len()),
            token_of: HashMap::with_capacity(entries.len()),
            fit_of: HashMap::with_capacity(entries.len()),
        };
        for &(token, fit, value) in entries {
            table.by_token.insert(token, value);
            table.by_fit.insert(fit, value);
            table.token_of.insert(value, token);
            table.fit_of.insert(value, fit);
        }
        table
    }

    /// All tokens in declaration order.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(token, _, _)| *token)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An enumerated kind backed by a [`MappingTable`].
///
/// Kinds that can carry codec values missing from their table override
/// [`Enumerated::unrecognized`] and [`Enumerated::unrecognized_value`].
pub trait Enumerated: Copy + Eq + Hash + 'static {
    /// Kind name used in error messages and native value tokens.
    const KIND: &'static str;

    fn table() -> &'static MappingTable<Self>;

    fn unrecognized(_value: u8) -> Option<Self> {
        None
    }

    fn unrecognized_value(&self) -> Option<u8> {
        None
    }
}

/// Look up a token. Matching is exact and case-sensitive.
///
/// Besides the table tokens, the native form `Kind(n)` is accepted for kinds
/// that pass unrecognized codec values through. A native value that is in the
/// table maps to its table variant.
pub fn string_to_enum<T: Enumerated>(token: &str) -> Result<T, MappingError> {
    if let Some(value) = T::table().by_token.get(token) {
        return Ok(*value);
    }

    parse_native_token(T::KIND, token)
        .filter(|_| T::unrecognized(0).is_some())
        .and_then(enum_from_fit::<T>)
        .ok_or_else(|| MappingError::UnknownToken {
            kind: T::KIND,
            token: token.to_string(),
        })
}

/// Render a value as its token.
pub fn enum_to_string<T: Enumerated>(value: T) -> String {
    if let Some(token) = T::table().token_of.get(&value) {
        return (*token).to_string();
    }
    match value.unrecognized_value() {
        Some(raw) => format!("{}({})", T::KIND, raw),
        None => String::new(),
    }
}

/// Map a raw FIT enumerated value.
///
/// Returns `None` only for kinds without pass-through when the value is not
/// in the table.
pub fn enum_from_fit<T: Enumerated>(raw: u8) -> Option<T> {
    T::table()
        .by_fit
        .get(&raw)
        .copied()
        .or_else(|| T::unrecognized(raw))
}

/// Map a value back to its raw FIT number (0xFF is the FIT invalid enum).
pub fn enum_to_fit<T: Enumerated>(value: T) -> u8 {
    T::table()
        .fit_of
        .get(&value)
        .copied()
        .or_else(|| value.unrecognized_value())
        .unwrap_or(0xFF)
}

fn parse_native_token(kind: &str, token: &str) -> Option<u8> {
    token
        .strip_prefix(kind)?
        .strip_prefix('(')?
        .strip_suffix(')')?
        .parse()
        .ok()
}

/// Implements the string-facing traits shared by every table-backed kind.
macro_rules! token_traits {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&enum_to_string(*self))
            }
        }

        impl FromStr for $ty {
            type Err = MappingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                string_to_enum(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = MappingError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                string_to_enum(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                enum_to_string(value)
            }
        }

        impl $ty {
            /// Raw FIT enumerated value.
            pub fn to_fit(self) -> u8 {
                enum_to_fit(self)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Sport
// ---------------------------------------------------------------------------

/// Sport of a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sport {
    Running,
    Cycling,
    Swimming,
    Walking,
    Generic,
    Rowing,
    Hiking,
    Multisport,
}

const SPORT_ENTRIES: &[(&str, u8, Sport)] = &[
    ("running", 1, Sport::Running),
    ("cycling", 2, Sport::Cycling),
    ("swimming", 5, Sport::Swimming),
    ("walking", 11, Sport::Walking),
    ("generic", 0, Sport::Generic),
    ("rowing", 15, Sport::Rowing),
    ("hiking", 17, Sport::Hiking),
    ("multi", 18, Sport::Multisport),
];

static SPORTS: Lazy<MappingTable<Sport>> = Lazy::new(|| MappingTable::new(SPORT_ENTRIES));

impl Enumerated for Sport {
    const KIND: &'static str = "Sport";

    fn table() -> &'static MappingTable<Self> {
        &SPORTS
    }
}

token_traits!(Sport);

impl Sport {
    /// Map a FIT sport value. Sports outside the table yield `None`.
    pub fn from_fit(raw: u8) -> Option<Self> {
        enum_from_fit(raw)
    }
}

// ---------------------------------------------------------------------------
// Duration type
// ---------------------------------------------------------------------------

/// How a step's duration value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DurationType {
    Time,
    Distance,
    HrLessThan,
    HrGreaterThan,
    Calories,
    #[default]
    Open,
    RepeatUntilStepsCmplt,
    RepeatUntilTime,
    RepeatUntilDistance,
    RepeatUntilCalories,
    RepeatUntilHrLessThan,
    RepeatUntilHrGreaterThan,
    RepeatUntilPowerLessThan,
    RepeatUntilPowerGreaterThan,
    PowerLessThan,
    PowerGreaterThan,
    TrainingPeaksTss,
    RepeatUntilPowerLastLapLessThan,
    RepeatUntilMaxPowerLastLapLessThan,
    Power3sLessThan,
    Power10sLessThan,
    Power30sLessThan,
    Power3sGreaterThan,
    Power10sGreaterThan,
    Power30sGreaterThan,
    PowerLapLessThan,
    PowerLapGreaterThan,
    RepeatUntilTrainingPeaksTss,
    RepetitionTime,
    Reps,
    TimeOnly,
    /// Codec value with no table entry
    Unrecognized(u8),
}

const DURATION_ENTRIES: &[(&str, u8, DurationType)] = &[
    ("Time", 0, DurationType::Time),
    ("Distance", 1, DurationType::Distance),
    ("HrLessThan", 2, DurationType::HrLessThan),
    ("HrGreaterThan", 3, DurationType::HrGreaterThan),
    ("Calories", 4, DurationType::Calories),
    ("Open", 5, DurationType::Open),
    ("RepeatUntilStepsCmplt", 6, DurationType::RepeatUntilStepsCmplt),
    ("RepeatUntilTime", 7, DurationType::RepeatUntilTime),
    ("RepeatUntilDistance", 8, DurationType::RepeatUntilDistance),
    ("RepeatUntilCalories", 9, DurationType::RepeatUntilCalories),
    ("RepeatUntilHrLessThan", 10, DurationType::RepeatUntilHrLessThan),
    ("RepeatUntilHrGreaterThan", 11, DurationType::RepeatUntilHrGreaterThan),
    ("RepeatUntilPowerLessThan", 12, DurationType::RepeatUntilPowerLessThan),
    ("RepeatUntilPowerGreaterThan", 13, DurationType::RepeatUntilPowerGreaterThan),
    ("PowerLessThan", 14, DurationType::PowerLessThan),
    ("PowerGreaterThan", 15, DurationType::PowerGreaterThan),
    ("TrainingPeaksTss", 16, DurationType::TrainingPeaksTss),
    ("RepeatUntilPowerLastLapLessThan", 17, DurationType::RepeatUntilPowerLastLapLessThan),
    ("RepeatUntilMaxPowerLastLapLessThan", 18, DurationType::RepeatUntilMaxPowerLastLapLessThan),
    ("Power3sLessThan", 19, DurationType::Power3sLessThan),
    ("Power10sLessThan", 20, DurationType::Power10sLessThan),
    ("Power30sLessThan", 21, DurationType::Power30sLessThan),
    ("Power3sGreaterThan", 22, DurationType::Power3sGreaterThan),
    ("Power10sGreaterThan", 23, DurationType::Power10sGreaterThan),
    ("Power30sGreaterThan", 24, DurationType::Power30sGreaterThan),
    ("PowerLapLessThan", 25, DurationType::PowerLapLessThan),
    ("PowerLapGreaterThan", 26, DurationType::PowerLapGreaterThan),
    ("RepeatUntilTrainingPeaksTss", 27, DurationType::RepeatUntilTrainingPeaksTss),
    ("RepetitionTime", 28, DurationType::RepetitionTime),
    ("Reps", 29, DurationType::Reps),
    ("TimeOnly", 31, DurationType::TimeOnly),
];

static DURATION_TYPES: Lazy<MappingTable<DurationType>> =
    Lazy::new(|| MappingTable::new(DURATION_ENTRIES));

impl Enumerated for DurationType {
    const KIND: &'static str = "DurationType";

    fn table() -> &'static MappingTable<Self> {
        &DURATION_TYPES
    }

    fn unrecognized(value: u8) -> Option<Self> {
        Some(DurationType::Unrecognized(value))
    }

    fn unrecognized_value(&self) -> Option<u8> {
        match self {
            DurationType::Unrecognized(value) => Some(*value),
            _ => None,
        }
    }
}

token_traits!(DurationType);

impl DurationType {
    /// Map a FIT duration type; unknown values pass through.
    pub fn from_fit(raw: u8) -> Self {
        enum_from_fit(raw).unwrap_or(DurationType::Unrecognized(raw))
    }
}

// ---------------------------------------------------------------------------
// Target type
// ---------------------------------------------------------------------------

/// What a step's target fields describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetType {
    Speed,
    HeartRate,
    #[default]
    Open,
    Cadence,
    Power,
    Grade,
    Resistance,
    Power3s,
    Power10s,
    Power30s,
    PowerLap,
    SwimStroke,
    SpeedLap,
    HeartRateLap,
    /// Codec value with no table entry
    Unrecognized(u8),
}

const TARGET_ENTRIES: &[(&str, u8, TargetType)] = &[
    ("Speed", 0, TargetType::Speed),
    ("HeartRate", 1, TargetType::HeartRate),
    ("Open", 2, TargetType::Open),
    ("Cadence", 3, TargetType::Cadence),
    ("Power", 4, TargetType::Power),
    ("Grade", 5, TargetType::Grade),
    ("Resistance", 6, TargetType::Resistance),
    ("Power3s", 7, TargetType::Power3s),
    ("Power10s", 8, TargetType::Power10s),
    ("Power30s", 9, TargetType::Power30s),
    ("PowerLap", 10, TargetType::PowerLap),
    ("SwimStroke", 11, TargetType::SwimStroke),
    ("SpeedLap", 12, TargetType::SpeedLap),
    ("HeartRateLap", 13, TargetType::HeartRateLap),
];

static TARGET_TYPES: Lazy<MappingTable<TargetType>> =
    Lazy::new(|| MappingTable::new(TARGET_ENTRIES));

impl Enumerated for TargetType {
    const KIND: &'static str = "TargetType";

    fn table() -> &'static MappingTable<Self> {
        &TARGET_TYPES
    }

    fn unrecognized(value: u8) -> Option<Self> {
        Some(TargetType::Unrecognized(value))
    }

    fn unrecognized_value(&self) -> Option<u8> {
        match self {
            TargetType::Unrecognized(value) => Some(*value),
            _ => None,
        }
    }
}

token_traits!(TargetType);

impl TargetType {
    /// Map a FIT target type; unknown values pass through.
    pub fn from_fit(raw: u8) -> Self {
        enum_from_fit(raw).unwrap_or(TargetType::Unrecognized(raw))
    }
}

// ---------------------------------------------------------------------------
// Intensity
// ---------------------------------------------------------------------------

/// Step intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Intensity {
    #[default]
    Active,
    Rest,
    Warmup,
    Cooldown,
    Recovery,
    Interval,
    Other,
    /// Codec value with no table entry
    Unrecognized(u8),
}

const INTENSITY_ENTRIES: &[(&str, u8, Intensity)] = &[
    ("Active", 0, Intensity::Active),
    ("Rest", 1, Intensity::Rest),
    ("Warmup", 2, Intensity::Warmup),
    ("Cooldown", 3, Intensity::Cooldown),
    ("Recovery", 4, Intensity::Recovery),
    ("Interval", 5, Intensity::Interval),
    ("Other", 6, Intensity::Other),
];

static INTENSITIES: Lazy<MappingTable<Intensity>> =
    Lazy::new(|| MappingTable::new(INTENSITY_ENTRIES));

impl Enumerated for Intensity {
    const KIND: &'static str = "Intensity";

    fn table() -> &'static MappingTable<Self> {
        &INTENSITIES
    }

    fn unrecognized(value: u8) -> Option<Self> {
        Some(Intensity::Unrecognized(value))
    }

    fn unrecognized_value(&self) -> Option<u8> {
        match self {
            Intensity::Unrecognized(value) => Some(*value),
            _ => None,
        }
    }
}

token_traits!(Intensity);

impl Intensity {
    /// Map a FIT intensity; unknown values pass through.
    pub fn from_fit(raw: u8) -> Self {
        enum_from_fit(raw).unwrap_or(Intensity::Unrecognized(raw))
    }
}
