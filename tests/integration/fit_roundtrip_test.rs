//! Integration tests for FIT workout files
//!
//! Fixtures are produced by the crate's own writer and read back through
//! the fitparser-based decoder.

use rustworkouts::fit::{
    self, FileIdMessage, FileKind, FitFile, FitMessage, WorkoutMessage, WorkoutStepMessage,
};
use rustworkouts::workouts::{
    read_fit, workout_from_fit_bytes, write_fit, ConvertError, DurationType, FitOptions,
    Intensity, Sport, TargetType, Workout, WorkoutStep,
};
use tempfile::tempdir;

fn sprint_session() -> Workout {
    Workout::new(
        "Sprints",
        Some(Sport::Cycling),
        vec![
            WorkoutStep::new(0, DurationType::Time, 600000)
                .with_intensity(Intensity::Warmup)
                .with_name("w10")
                .with_notes("Warming up 10 minutes"),
            WorkoutStep::new(1, DurationType::Time, 45000)
                .with_target(TargetType::Power, 5, 0, 0)
                .with_name("45sec")
                .with_notes("Sprint for 45 seconds"),
            WorkoutStep::new(2, DurationType::Time, 75000)
                .with_intensity(Intensity::Rest)
                .with_name("r75"),
            WorkoutStep::repeat(3, 1, 4),
            WorkoutStep::repeat(4, 1, 6),
            WorkoutStep::new(5, DurationType::Time, 600000)
                .with_intensity(Intensity::Cooldown)
                .with_name("cd10"),
        ],
    )
}

#[test]
fn test_fit_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sprints.fit");

    let workout = sprint_session();
    write_fit(&path, &workout.to_fit(&FitOptions::default()), false).unwrap();

    let read = read_fit(&path).unwrap();
    assert_eq!(read.name, "Sprints");
    assert_eq!(read.sport, Some(Sport::Cycling));
    assert_eq!(read.filename, path.display().to_string());
    assert_eq!(read.steps, workout.steps);
}

#[test]
fn test_nested_repeats_through_fit() {
    let bytes = fit::encode(&sprint_session().to_fit(&FitOptions::default())).unwrap();
    let workout = workout_from_fit_bytes(&bytes).unwrap();

    let want = "\nWarmup\n- 600s ramp Z1-Z2 Warmup w10 Warming up 10 minutes\n\n\n24x\n- 45s Z5 Active 45sec Sprint for 45 seconds\n- 75s Z1 Rest r75\n\n\n\nCooldown\n- 600s ramp Z2-Z1 Cooldown cd10\n";
    assert_eq!(workout.to_intervals().trim(), want.trim());
}

#[test]
fn test_custom_ranges_and_distance_survive() {
    let workout = Workout::new(
        "Ranges",
        Some(Sport::Running),
        vec![
            WorkoutStep::new(0, DurationType::Distance, 150000)
                .with_target(TargetType::HeartRate, 0, 245, 255),
            WorkoutStep::new(1, DurationType::Time, 300000)
                .with_target(TargetType::Power, 0, 1180, 1210)
                .with_intensity(Intensity::Interval),
            WorkoutStep::new(2, DurationType::Time, 120000)
                .with_target(TargetType::Cadence, 0, 85, 95),
        ],
    );

    let bytes = fit::encode(&workout.to_fit(&FitOptions::default())).unwrap();
    let decoded = workout_from_fit_bytes(&bytes).unwrap();
    assert_eq!(decoded.steps, workout.steps);
    assert_eq!(
        decoded.to_intervals(),
        "- 1.5km 145-155 HR Active\n- 300s 180-210W Interval\n- 120s 85-95rpm Active\n"
    );
}

#[test]
fn test_missing_sport_is_written_as_generic() {
    let workout = Workout::new("Anything", None, Vec::new());
    let bytes = fit::encode(&workout.to_fit(&FitOptions::default())).unwrap();
    let decoded = workout_from_fit_bytes(&bytes).unwrap();
    assert_eq!(decoded.sport, Some(Sport::Generic));
    assert!(decoded.steps.is_empty());
}

#[test]
fn test_activity_file_is_rejected() {
    let file = FitFile::new(vec![
        FitMessage::FileId(FileIdMessage {
            kind: FileKind::Activity,
            manufacturer: Some(1),
            product: Some(1),
            serial_number: None,
            time_created: None,
        }),
        FitMessage::Workout(WorkoutMessage {
            name: "not really".into(),
            sport: Some(2),
            num_valid_steps: Some(0),
        }),
    ]);

    let bytes = fit::encode(&file).unwrap();
    match workout_from_fit_bytes(&bytes) {
        Err(ConvertError::WrongFileKind { found }) => assert_eq!(found, "activity"),
        other => panic!("expected WrongFileKind, got {:?}", other),
    }
}

#[test]
fn test_decoded_message_sequence() {
    let options = FitOptions {
        manufacturer: 255,
        product: 7,
    };
    let bytes = fit::encode(&sprint_session().to_fit(&options)).unwrap();
    let file = fit::decode(&bytes).unwrap();

    let id = file.file_id().unwrap();
    assert_eq!(id.kind, FileKind::Workout);
    assert_eq!(id.manufacturer, Some(255));
    assert_eq!(id.product, Some(7));
    assert!(id.time_created.is_some());

    let header = file.workout().unwrap();
    assert_eq!(header.sport, Some(2));
    assert_eq!(header.num_valid_steps, Some(6));
    assert_eq!(file.workout_steps().count(), 6);
}

#[test]
fn test_invalid_values_read_as_zero() {
    let mut file =
        Workout::new("Open", Some(Sport::Cycling), Vec::new()).to_fit(&FitOptions::default());
    file.messages.push(FitMessage::WorkoutStep(WorkoutStepMessage {
        message_index: 0,
        name: "until lap".into(),
        duration_type: Some(5),
        duration_value: None,
        target_type: Some(2),
        target_value: None,
        custom_target_value_low: None,
        custom_target_value_high: None,
        intensity: None,
        notes: String::new(),
    }));

    let bytes = fit::encode(&file).unwrap();
    let workout = workout_from_fit_bytes(&bytes).unwrap();
    let step = &workout.steps[0];
    assert_eq!(step.name, "until lap");
    assert_eq!(step.duration_type, DurationType::Open);
    assert_eq!(step.duration_value, 0);
    assert_eq!(step.target_value, 0);
    assert_eq!(step.intensity, Intensity::Active);
}
