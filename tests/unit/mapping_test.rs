//! Unit tests for the enum mapping tables

use rustworkouts::workouts::mapping::{enum_from_fit, enum_to_fit, string_to_enum};
use rustworkouts::workouts::{DurationType, Intensity, MappingError, Sport, TargetType};

#[test]
fn test_sport_tokens() {
    assert_eq!("cycling".parse::<Sport>().unwrap(), Sport::Cycling);
    assert_eq!("multi".parse::<Sport>().unwrap(), Sport::Multisport);
    assert_eq!(Sport::Rowing.to_string(), "rowing");
    assert!("Cycling".parse::<Sport>().is_err());
}

#[test]
fn test_unknown_token_names_the_kind() {
    let err = string_to_enum::<TargetType>("Watts").unwrap_err();
    match err {
        MappingError::UnknownToken { kind, token } => {
            assert_eq!(kind, "TargetType");
            assert_eq!(token, "Watts");
        }
    }
}

#[test]
fn test_fit_values() {
    assert_eq!(enum_to_fit(DurationType::RepeatUntilStepsCmplt), 6);
    assert_eq!(enum_to_fit(DurationType::TimeOnly), 31);
    assert_eq!(enum_to_fit(TargetType::HeartRateLap), 13);
    assert_eq!(enum_to_fit(Intensity::Cooldown), 3);
    assert_eq!(enum_to_fit(Sport::Hiking), 17);

    assert_eq!(enum_from_fit::<Intensity>(4), Some(Intensity::Recovery));
    assert_eq!(enum_from_fit::<Sport>(3), None);
}

#[test]
fn test_unknown_fit_values_pass_through() {
    let duration = DurationType::from_fit(30);
    assert_eq!(duration, DurationType::Unrecognized(30));
    assert_eq!(duration.to_fit(), 30);
    assert_eq!(duration.to_string(), "DurationType(30)");
    assert_eq!("DurationType(30)".parse::<DurationType>().unwrap(), duration);

    assert_eq!(Sport::from_fit(200), None);
}

#[test]
fn test_defaults() {
    assert_eq!(DurationType::default(), DurationType::Open);
    assert_eq!(TargetType::default(), TargetType::Open);
    assert_eq!(Intensity::default(), Intensity::Active);
}
