//! Workout template builder

use super::ValidationError;
use crate::models::{MuscleGroup, NewWorkoutTemplate, PrototypeSet, TemplateExerciseInput};

const DEFAULT_TEMPLATE_SET: PrototypeSet = PrototypeSet::new(10, 0.0);

/// A workout template under construction
#[derive(Debug, Clone, Default)]
pub struct TemplateForm {
    pub name: String,
    pub description: String,
    pub kind: String,
    muscle_groups: Vec<MuscleGroup>,
    exercises: Vec<TemplateExerciseInput>,
}

impl TemplateForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn muscle_groups(&self) -> &[MuscleGroup] {
        &self.muscle_groups
    }

    pub fn exercises(&self) -> &[TemplateExerciseInput] {
        &self.exercises
    }

    /// Select a muscle group, or deselect it if already selected.
    /// Returns whether it is selected afterwards.
    pub fn toggle_muscle_group(&mut self, group: &MuscleGroup) -> bool {
        if let Some(pos) = self.muscle_groups.iter().position(|g| g.id == group.id) {
            self.muscle_groups.remove(pos);
            false
        } else {
            self.muscle_groups.push(group.clone());
            true
        }
    }

    /// Append an exercise with a single 10 rep set. Returns its position.
    pub fn add_exercise(&mut self, exercise_template_id: impl Into<String>) -> usize {
        self.exercises.push(TemplateExerciseInput {
            exercise_template_id: exercise_template_id.into(),
            sets: vec![DEFAULT_TEMPLATE_SET],
        });
        self.exercises.len() - 1
    }

    pub fn remove_exercise(&mut self, index: usize) -> Result<TemplateExerciseInput, ValidationError> {
        if index >= self.exercises.len() {
            return Err(ValidationError::NoSuchExercise(index));
        }
        Ok(self.exercises.remove(index))
    }

    fn exercise_mut(&mut self, index: usize) -> Result<&mut TemplateExerciseInput, ValidationError> {
        self.exercises
            .get_mut(index)
            .ok_or(ValidationError::NoSuchExercise(index))
    }

    /// Append a set copying the exercise's last one
    pub fn add_set(&mut self, exercise: usize) -> Result<(), ValidationError> {
        let exercise = self.exercise_mut(exercise)?;
        let last = exercise.sets.last().copied().unwrap_or(DEFAULT_TEMPLATE_SET);
        exercise.sets.push(last);
        Ok(())
    }

    /// Remove a set. The last remaining set is kept.
    pub fn remove_set(&mut self, exercise: usize, set: usize) -> Result<bool, ValidationError> {
        let exercise = self.exercise_mut(exercise)?;
        if exercise.sets.len() <= 1 || set >= exercise.sets.len() {
            return Ok(false);
        }
        exercise.sets.remove(set);
        Ok(true)
    }

    pub fn update_set(&mut self, exercise: usize, set: usize, value: PrototypeSet) -> Result<(), ValidationError> {
        let exercise = self.exercise_mut(exercise)?;
        if let Some(slot) = exercise.sets.get_mut(set) {
            *slot = value;
        }
        Ok(())
    }

    /// Replace an exercise's sets wholesale; an empty list leaves them as is
    pub fn set_sets(&mut self, exercise: usize, sets: Vec<PrototypeSet>) -> Result<(), ValidationError> {
        let exercise = self.exercise_mut(exercise)?;
        if !sets.is_empty() {
            exercise.sets = sets;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<NewWorkoutTemplate, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("Template name"));
        }
        if self.muscle_groups.is_empty() {
            return Err(ValidationError::NoMuscleGroups);
        }
        if self.exercises.is_empty() {
            return Err(ValidationError::NoExercises);
        }

        Ok(NewWorkoutTemplate {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            kind: self.kind.trim().to_string(),
            target_muscle_group_ids: self.muscle_groups.iter().map(|g| g.id.clone()).collect(),
            exercises: self.exercises.clone(),
        })
    }
}
