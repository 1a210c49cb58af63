//! Built-in data used when the backend cannot be reached
//!
//! - [`muscle_groups`]: the ten groups offered when `/muscle-groups/public` fails
//! - [`exercise_templates`]: a small catalog of common lifts
//! - [`demo_workout_templates`]: a six day push/pull/legs split
//!
//! Everything returned here is tagged [`DataSource::Fallback`](super::DataSource)
//! by the caller so the CLI can say it is showing local data.

use crate::models::{
    ExerciseRef, ExerciseTemplate, MuscleGroup, PrototypeSet, TemplateExercise, WorkoutTemplate,
};

/// Split types offered when creating a workout template
pub const WORKOUT_TYPES: [&str; 8] = [
    "Push",
    "Pull",
    "Legs",
    "Upper Body",
    "Lower Body",
    "Full Body",
    "Cardio",
    "Custom",
];

const MUSCLE_GROUPS: [(&str, &str); 10] = [
    ("chest", "Chest"),
    ("back", "Back"),
    ("legs", "Legs"),
    ("shoulders", "Shoulders"),
    ("arms", "Arms"),
    ("biceps", "Biceps"),
    ("triceps", "Triceps"),
    ("core", "Core"),
    ("abs", "Abs"),
    ("cardio", "Cardio"),
];

/// Finer-grained list offered by the workout template builder
const TEMPLATE_MUSCLE_GROUPS: [(&str, &str); 14] = [
    ("chest", "Chest"),
    ("back", "Back"),
    ("shoulders", "Shoulders"),
    ("legs", "Legs"),
    ("arms", "Arms"),
    ("core", "Core"),
    ("quadriceps", "Quadriceps"),
    ("hamstrings", "Hamstrings"),
    ("calves", "Calves"),
    ("glutes", "Glutes"),
    ("biceps", "Biceps"),
    ("triceps", "Triceps"),
    ("traps", "Traps"),
    ("lats", "Lats"),
];

// (id, name, muscle groups, requires weight)
const EXERCISES: [(&str, &str, &[(&str, &str)], bool); 10] = [
    ("bench-press", "Bench Press", &[("chest", "Chest")], true),
    ("squat", "Squat", &[("legs", "Legs"), ("quadriceps", "Quadriceps")], true),
    ("deadlift", "Deadlift", &[("back", "Back"), ("legs", "Legs")], true),
    ("overhead-press", "Overhead Press", &[("shoulders", "Shoulders")], true),
    ("pull-up", "Pull-Up", &[("back", "Back"), ("biceps", "Biceps")], false),
    ("barbell-row", "Barbell Row", &[("back", "Back")], true),
    ("leg-press", "Leg Press", &[("legs", "Legs"), ("quadriceps", "Quadriceps")], true),
    ("lat-pulldown", "Lat Pulldown", &[("back", "Back"), ("lats", "Lats")], true),
    ("tricep-pushdown", "Tricep Pushdown", &[("triceps", "Triceps")], true),
    ("bicep-curl", "Bicep Curl", &[("biceps", "Biceps")], true),
];

fn groups(list: &[(&str, &str)]) -> Vec<MuscleGroup> {
    list.iter().map(|(id, name)| MuscleGroup::new(*id, *name)).collect()
}

pub fn muscle_groups() -> Vec<MuscleGroup> {
    groups(&MUSCLE_GROUPS)
}

pub fn template_muscle_groups() -> Vec<MuscleGroup> {
    groups(&TEMPLATE_MUSCLE_GROUPS)
}

pub fn exercise_templates() -> Vec<ExerciseTemplate> {
    EXERCISES
        .iter()
        .map(|(id, name, muscles, requires_weight)| ExerciseTemplate {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            muscle_groups: groups(muscles),
            requires_weight: *requires_weight,
        })
        .collect()
}

fn exercise(id: &str, name: &str, sets: &[(u32, f64)]) -> TemplateExercise {
    TemplateExercise {
        exercise_template: ExerciseRef {
            id: id.to_string(),
            name: name.to_string(),
            muscle_groups: Vec::new(),
        },
        sets: sets
            .iter()
            .map(|(reps, weight)| PrototypeSet::new(*reps, *weight))
            .collect(),
    }
}

fn template(
    day: u8,
    name: &str,
    description: &str,
    kind: &str,
    muscles: &[(&str, &str)],
    exercises: Vec<TemplateExercise>,
) -> WorkoutTemplate {
    WorkoutTemplate {
        id: format!("template-{}", day),
        name: format!("Day {}: {}", day, name),
        description: description.to_string(),
        kind: kind.to_string(),
        target_muscle_groups: groups(muscles),
        exercises,
    }
}

const PUSH: [(&str, &str); 3] = [("chest", "Chest"), ("shoulders", "Shoulders"), ("triceps", "Triceps")];
const LEGS: [(&str, &str); 4] = [
    ("quadriceps", "Quadriceps"),
    ("hamstrings", "Hamstrings"),
    ("calves", "Calves"),
    ("glutes", "Glutes"),
];

/// Six day push/pull/legs split with suggested sets
pub fn demo_workout_templates() -> Vec<WorkoutTemplate> {
    vec![
        template(
            1,
            "Push (Chest, Shoulders, Triceps)",
            "Focus on chest, front delts and triceps. Perfect for Monday.",
            "Push",
            &PUSH,
            vec![
                exercise("bench-press", "Bench Press", &[(12, 60.0), (10, 70.0), (8, 80.0), (6, 85.0)]),
                exercise("incline-dumbbell-press", "Incline Dumbbell Press", &[(12, 20.0), (10, 22.5), (8, 25.0)]),
                exercise("machine-chest-fly", "Machine Chest Fly", &[(15, 40.0), (12, 45.0), (10, 50.0)]),
                exercise("overhead-press", "Overhead Press", &[(10, 40.0), (8, 45.0), (8, 45.0)]),
                exercise("lateral-raise", "Lateral Raise", &[(15, 8.0), (15, 8.0), (12, 10.0)]),
                exercise("tricep-pushdown", "Tricep Pushdown", &[(15, 25.0), (12, 30.0), (10, 35.0)]),
                exercise("overhead-tricep-extension", "Overhead Tricep Extension", &[(12, 20.0), (10, 25.0), (10, 25.0)]),
            ],
        ),
        template(
            2,
            "Pull (Back, Biceps)",
            "Focus on back and biceps. Ideal for Tuesday.",
            "Pull",
            &[("back", "Back"), ("biceps", "Biceps"), ("traps", "Traps")],
            vec![
                exercise("deadlift", "Deadlift", &[(8, 100.0), (6, 120.0), (4, 140.0)]),
                exercise("pull-up", "Pull-Up", &[(10, 0.0), (8, 0.0), (6, 0.0)]),
                exercise("barbell-row", "Barbell Row", &[(12, 60.0), (10, 70.0), (8, 80.0)]),
                exercise("lat-pulldown", "Lat Pulldown", &[(12, 50.0), (10, 60.0), (10, 60.0)]),
                exercise("seated-cable-row", "Seated Cable Row", &[(12, 55.0), (10, 65.0), (8, 75.0)]),
                exercise("barbell-curl", "Barbell Curl", &[(12, 30.0), (10, 35.0), (8, 40.0)]),
                exercise("hammer-curl", "Hammer Curl", &[(12, 12.0), (10, 14.0), (10, 14.0)]),
            ],
        ),
        template(
            3,
            "Legs (Quads, Hamstrings, Calves)",
            "Focus on leg development. Recommended for Wednesday.",
            "Legs",
            &LEGS,
            vec![
                exercise("squat", "Squat", &[(12, 80.0), (10, 100.0), (8, 120.0), (6, 130.0)]),
                exercise("leg-press", "Leg Press", &[(12, 120.0), (10, 140.0), (8, 160.0)]),
                exercise("leg-extension", "Leg Extension", &[(15, 40.0), (12, 45.0), (12, 45.0)]),
                exercise("romanian-deadlift", "Romanian Deadlift", &[(12, 80.0), (10, 90.0), (10, 90.0)]),
                exercise("leg-curl", "Leg Curl", &[(15, 35.0), (12, 40.0), (12, 40.0)]),
                exercise("standing-calf-raise", "Standing Calf Raise", &[(15, 80.0), (15, 80.0), (15, 80.0)]),
                exercise("seated-calf-raise", "Seated Calf Raise", &[(15, 40.0), (15, 40.0), (15, 40.0)]),
            ],
        ),
        template(
            4,
            "Push (Chest, Shoulders, Triceps)",
            "Second push day with different exercise variations. For Thursday.",
            "Push",
            &PUSH,
            vec![
                exercise("incline-bench-press", "Incline Bench Press", &[(12, 50.0), (10, 60.0), (8, 70.0), (6, 75.0)]),
                exercise("dumbbell-press", "Dumbbell Press", &[(12, 20.0), (10, 22.5), (8, 25.0)]),
                exercise("cable-crossover", "Cable Crossover", &[(15, 15.0), (12, 17.5), (12, 17.5)]),
                exercise("dumbbell-shoulder-press", "Dumbbell Shoulder Press", &[(12, 15.0), (10, 17.5), (8, 20.0)]),
                exercise("front-raise", "Front Raise", &[(15, 8.0), (12, 10.0), (12, 10.0)]),
                exercise("skull-crusher", "Skull Crusher", &[(12, 25.0), (10, 30.0), (10, 30.0)]),
                exercise("tricep-dip", "Tricep Dip", &[(12, 0.0), (10, 0.0), (8, 0.0)]),
            ],
        ),
        template(
            5,
            "Pull (Back, Biceps)",
            "Second pull day with exercise variations. Perfect for Friday.",
            "Pull",
            &[("back", "Back"), ("biceps", "Biceps"), ("rear-delts", "Rear Delts")],
            vec![
                exercise("weighted-pull-up", "Weighted Pull-Up", &[(8, 5.0), (6, 10.0), (6, 10.0)]),
                exercise("t-bar-row", "T-Bar Row", &[(12, 40.0), (10, 45.0), (8, 50.0)]),
                exercise("chest-supported-row", "Chest Supported Row", &[(12, 20.0), (10, 22.5), (8, 25.0)]),
                exercise("single-arm-row", "Single Arm Row", &[(12, 20.0), (10, 22.5), (10, 22.5)]),
                exercise("face-pull", "Face Pull", &[(15, 25.0), (15, 25.0), (15, 25.0)]),
                exercise("preacher-curl", "Preacher Curl", &[(12, 25.0), (10, 30.0), (8, 35.0)]),
                exercise("concentration-curl", "Concentration Curl", &[(12, 10.0), (10, 12.0), (10, 12.0)]),
            ],
        ),
        template(
            6,
            "Legs (Quads, Hamstrings, Calves)",
            "Second legs day with different exercise variations. Ideal for Saturday.",
            "Legs",
            &LEGS,
            vec![
                exercise("front-squat", "Front Squat", &[(10, 60.0), (8, 70.0), (6, 80.0)]),
                exercise("hack-squat", "Hack Squat", &[(12, 80.0), (10, 100.0), (8, 120.0)]),
                exercise("bulgarian-split-squat", "Bulgarian Split Squat", &[(10, 20.0), (10, 20.0), (8, 25.0)]),
                exercise("good-morning", "Good Morning", &[(12, 40.0), (10, 50.0), (10, 50.0)]),
                exercise("glute-ham-raise", "Glute Ham Raise", &[(12, 0.0), (10, 0.0), (10, 0.0)]),
                exercise("leg-press-calf-raise", "Leg Press Calf Raise", &[(20, 100.0), (15, 120.0), (15, 120.0)]),
                exercise("single-leg-calf-raise", "Single Leg Calf Raise", &[(15, 0.0), (15, 0.0), (15, 0.0)]),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_muscle_groups() {
        let groups = muscle_groups();
        assert_eq!(groups.len(), 10);
        assert_eq!(groups[0], MuscleGroup::new("chest", "Chest"));
        assert_eq!(groups[9], MuscleGroup::new("cardio", "Cardio"));
    }

    #[test]
    fn test_template_muscle_groups() {
        let all = template_muscle_groups();
        assert_eq!(all.len(), 14);
        assert!(all.iter().any(|g| g.id == "lats"));
        let ids: HashSet<_> = all.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_catalog_has_unique_ids() {
        let catalog = exercise_templates();
        assert_eq!(catalog.len(), 10);
        let ids: HashSet<_> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
        assert!(catalog.iter().all(|t| !t.muscle_groups.is_empty()));
    }

    #[test]
    fn test_demo_split() {
        let templates = demo_workout_templates();
        assert_eq!(templates.len(), 6);
        assert_eq!(templates[0].id, "template-1");
        assert_eq!(templates[0].name, "Day 1: Push (Chest, Shoulders, Triceps)");

        let kinds: Vec<_> = templates.iter().map(|t| t.kind.as_str()).collect();
        assert_eq!(kinds, ["Push", "Pull", "Legs", "Push", "Pull", "Legs"]);

        let bench = &templates[0].exercises[0];
        assert_eq!(bench.exercise_template.id, "bench-press");
        assert_eq!(bench.sets[3], PrototypeSet::new(6, 85.0));

        for template in &templates {
            assert_eq!(template.exercises.len(), 7);
            assert!(template.exercises.iter().all(|e| !e.sets.is_empty()));
        }
    }

    #[test]
    fn test_workout_types() {
        assert!(WORKOUT_TYPES.contains(&"Full Body"));
        assert_eq!(WORKOUT_TYPES.last(), Some(&"Custom"));
    }
}
