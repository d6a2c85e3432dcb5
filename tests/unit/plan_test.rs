//! Unit tests for training plans

use rustworkouts::workouts::{
    ConvertError, NewTrainingPlan, PlanList, Sport, TrainingDay, TrainingPlan, Workout,
};

fn ride(name: &str) -> Workout {
    Workout::new(name, Some(Sport::Cycling), Vec::new())
}

fn plan() -> TrainingPlan {
    TrainingPlan::new(
        "Base",
        vec![
            TrainingDay::new(1, vec![ride("endurance")]).unwrap(),
            TrainingDay::new(3, vec![ride("tempo"), ride("spin")]).unwrap(),
        ],
        7,
        "first block",
    )
}

#[test]
fn test_plan_yaml_round_trip() {
    let plan = plan();
    let yaml = plan.to_yaml().unwrap();
    assert!(yaml.contains("trainingDays:"));
    assert_eq!(TrainingPlan::from_yaml(&yaml).unwrap(), plan);
}

#[test]
fn test_plan_list_serialization() {
    let list = PlanList {
        plans: vec![plan(), plan()],
    };
    let json = serde_json::to_string(&list).unwrap();
    let parsed: PlanList = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, list);
    assert_ne!(parsed.plans[0].id, parsed.plans[1].id);
}

#[test]
fn test_new_plan_from_json() {
    let json = r#"{"name": "draft", "duration": 2,
        "trainingDays": [{"order": 2, "workouts": [{"workoutName": "a", "sport": "running"}]}]}"#;
    let draft: NewTrainingPlan = serde_json::from_str(json).unwrap();
    let plan = draft.into_plan();
    assert_eq!(plan.workout_count(), 1);
    assert_eq!(plan.training_days[0].workouts[0].sport, Some(Sport::Running));
    assert!(plan.validate().is_ok());
}

#[test]
fn test_plan_without_id_is_rejected() {
    let json = r#"{"name": "p", "trainingDays": [], "duration": 0}"#;
    assert!(matches!(
        TrainingPlan::from_json(json),
        Err(ConvertError::Json(_))
    ));
}
