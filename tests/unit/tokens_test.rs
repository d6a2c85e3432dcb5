//! Unit tests for step tokens

use rustworkouts::workouts::tokens::{duration_token, step_line, target_token};
use rustworkouts::workouts::{DurationType, Intensity, TargetType, WorkoutStep};

fn timed(seconds: u32) -> WorkoutStep {
    WorkoutStep::new(0, DurationType::Time, seconds * 1000)
}

#[test]
fn test_duration_tokens() {
    assert_eq!(duration_token(&timed(45)), "45s");
    assert_eq!(
        duration_token(&WorkoutStep::new(0, DurationType::Time, 1500)),
        "1.5s"
    );
    assert_eq!(
        duration_token(&WorkoutStep::new(0, DurationType::Distance, 500000)),
        "5km"
    );
    assert_eq!(duration_token(&WorkoutStep::new(0, DurationType::Open, 0)), "");
}

#[test]
fn test_power_ranges() {
    let zone = timed(60).with_target(TargetType::Power, 3, 0, 0);
    assert_eq!(target_token(&zone), "Z3");

    let percent = timed(60).with_target(TargetType::Power, 0, 88, 94);
    assert_eq!(target_token(&percent), "88-94%");

    let watts = timed(60).with_target(TargetType::Power, 0, 1250, 1300);
    assert_eq!(target_token(&watts), "250-300W");
}

#[test]
fn test_heart_rate_ranges() {
    let percent = timed(60).with_target(TargetType::HeartRate, 0, 70, 80);
    assert_eq!(target_token(&percent), "70-80% HR");

    let bpm = timed(60).with_target(TargetType::HeartRate, 0, 240, 260);
    assert_eq!(target_token(&bpm), "140-160 HR");
}

#[test]
fn test_cadence() {
    let fixed = timed(60).with_target(TargetType::Cadence, 95, 0, 0);
    assert_eq!(target_token(&fixed), "95rpm");

    let range = timed(60).with_target(TargetType::Cadence, 0, 85, 100);
    assert_eq!(target_token(&range), "85-100rpm");
}

#[test]
fn test_step_lines() {
    let step = timed(90)
        .with_target(TargetType::Power, 0, 1200, 1220)
        .with_intensity(Intensity::Interval)
        .with_name("  hard ");
    assert_eq!(step_line(&step), "- 90s 200-220W Interval hard\n");

    let warmup = timed(300).with_intensity(Intensity::Warmup);
    assert_eq!(step_line(&warmup), "\nWarmup\n- 300s ramp Z1-Z2 Warmup\n");

    let recovery = timed(60)
        .with_target(TargetType::Power, 4, 0, 0)
        .with_intensity(Intensity::Recovery);
    assert_eq!(step_line(&recovery), "- 60s Z1 Recovery\n");
}
