//! Unit tests for repeat reconstruction

use rustworkouts::workouts::intervals::RepeatIssue;
use rustworkouts::workouts::{
    render_intervals, transform_repeats, DurationType, Intensity, TargetType, Workout,
    WorkoutStep,
};

fn sprint(index: u16) -> WorkoutStep {
    WorkoutStep::new(index, DurationType::Time, 20000)
        .with_target(TargetType::Power, 6, 0, 0)
        .with_name("sprint")
}

fn easy(index: u16) -> WorkoutStep {
    WorkoutStep::new(index, DurationType::Time, 40000)
        .with_intensity(Intensity::Rest)
        .with_name("easy")
}

#[test]
fn test_chain_of_markers_multiplies() {
    let obtained = transform_repeats("\n2x\n\n3x\n- 10s Z5\n");
    assert_eq!(obtained.trim(), "6x\n- 10s Z5");
}

#[test]
fn test_separate_blocks_stay_separate() {
    let workout = Workout::new(
        "two blocks",
        None,
        vec![
            sprint(0),
            easy(1),
            WorkoutStep::repeat(2, 0, 3),
            sprint(3),
            WorkoutStep::repeat(4, 3, 5),
        ],
    );

    let script = render_intervals(&workout);
    assert!(script.diagnostics.is_empty());
    assert!(script.text.contains("3x\n- 20s Z6 Active sprint\n- 40s Z1 Rest easy\n"));
    assert!(script.text.contains("5x\n- 20s Z6 Active sprint\n"));
    assert!(!script.text.contains("15x"));
}

#[test]
fn test_inner_repeat_inside_outer_block() {
    // Outer block starts before the inner one, so counts do not merge.
    let workout = Workout::new(
        "inner",
        None,
        vec![
            easy(0),
            sprint(1),
            WorkoutStep::repeat(2, 1, 4),
            WorkoutStep::repeat(3, 0, 2),
        ],
    );

    let text = workout.to_intervals();
    assert!(text.contains("2x\n- 40s Z1 Rest easy\n"));
    assert!(text.contains("4x\n- 20s Z6 Active sprint\n"));
    assert!(!text.contains("8x"));
}

#[test]
fn test_malformed_repeats_are_reported() {
    let workout = Workout::new(
        "broken",
        None,
        vec![
            sprint(0),
            WorkoutStep::repeat(1, 1, 2),
            WorkoutStep::repeat(2, 40, 3),
        ],
    );

    let script = render_intervals(&workout);
    let issues: Vec<RepeatIssue> = script.diagnostics.iter().map(|d| d.issue).collect();
    assert_eq!(
        issues,
        vec![RepeatIssue::SelfReference, RepeatIssue::MissingTarget]
    );
    assert!(script.diagnostics[1].to_string().contains("missing step"));
    assert_eq!(script.text.trim(), "- 20s Z6 Active sprint");
}

#[test]
fn test_empty_workout() {
    let workout = Workout::new("empty", None, Vec::new());
    let script = render_intervals(&workout);
    assert!(script.text.is_empty());
    assert!(script.diagnostics.is_empty());
}

#[test]
fn test_notes_cannot_inject_markers() {
    let workout = Workout::new(
        "notes",
        None,
        vec![
            sprint(0).with_notes("go hard\n5x"),
            easy(1),
            WorkoutStep::repeat(2, 1, 2),
        ],
    );

    let text = workout.to_intervals();
    assert!(text.contains("- 20s Z6 Active sprint go hard 5x\n"));
    assert!(text.contains("\n2x\n- 40s Z1 Rest easy\n"));
    assert!(!text.contains("10x"));
}
