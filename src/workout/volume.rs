//! Volume arithmetic
//!
//! Volume is reps x weight, summed over sets. Bodyweight work contributes
//! nothing since its weight is zero.

use crate::models::{ExerciseSet, PrototypeSet, Workout, WorkoutExercise, WorkoutTemplate};

impl ExerciseSet {
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }
}

impl PrototypeSet {
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }
}

impl WorkoutExercise {
    /// Volume over every logged set
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(ExerciseSet::volume).sum()
    }

    /// Volume over completed sets only
    pub fn completed_volume(&self) -> f64 {
        self.sets
            .iter()
            .filter(|s| s.completed)
            .map(ExerciseSet::volume)
            .sum()
    }

    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }
}

impl Workout {
    pub fn volume(&self) -> f64 {
        self.exercises.iter().map(WorkoutExercise::volume).sum()
    }

    pub fn completed_volume(&self) -> f64 {
        self.exercises
            .iter()
            .map(WorkoutExercise::completed_volume)
            .sum()
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

impl WorkoutTemplate {
    /// Planned volume if every prescribed set is performed
    pub fn planned_volume(&self) -> f64 {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(PrototypeSet::volume)
            .sum()
    }
}

/// Volume of sets being entered for an exercise; zero when the exercise is
/// not weighted.
pub fn draft_volume(sets: &[ExerciseSet], requires_weight: bool) -> f64 {
    if !requires_weight {
        return 0.0;
    }
    sets.iter().map(ExerciseSet::volume).sum()
}
