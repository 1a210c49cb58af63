//! Local edits to a workout before they are pushed to the server

use thiserror::Error;

use crate::client::{ApiClient, ClientError};
use crate::models::{ExerciseInput, ExerciseSet, ExerciseTemplate, Workout, WorkoutExercise, WorkoutUpdate};

use super::volume::draft_volume;

/// Default first set for a weighted exercise in the add-exercise form
pub const DEFAULT_REPS: u32 = 8;
pub const DEFAULT_WEIGHT: f64 = 10.0;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Exercise not found in workout: {0}")]
    UnknownExercise(String),

    #[error("Set {index} does not exist (exercise has {len} sets)")]
    SetOutOfRange { index: usize, len: usize },

    #[error("An exercise must keep at least one set")]
    LastSet,

    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type EditorResult<T> = Result<T, EditorError>;

/// Field of a set being edited
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetField {
    Reps(u32),
    Weight(f64),
    Completed(bool),
}

impl SetField {
    fn apply(self, set: &mut ExerciseSet) {
        match self {
            SetField::Reps(reps) => set.reps = reps,
            SetField::Weight(weight) => set.weight = weight,
            SetField::Completed(completed) => set.completed = completed,
        }
    }
}

/// New set copying the reps and weight of the last one, not yet completed
fn next_set(sets: &[ExerciseSet], fallback: ExerciseSet) -> ExerciseSet {
    let last = sets.last().copied().unwrap_or(fallback);
    ExerciseSet::new(last.reps, last.weight)
}

fn check_index(sets: &[ExerciseSet], index: usize) -> EditorResult<()> {
    if index >= sets.len() {
        return Err(EditorError::SetOutOfRange {
            index,
            len: sets.len(),
        });
    }
    Ok(())
}

/// A workout being edited locally.
///
/// Set edits stay local until [`WorkoutDraft::save_exercise`] or
/// [`WorkoutDraft::save_all`]; exercise removal is applied optimistically
/// and rolled back from the server on failure.
#[derive(Debug, Clone)]
pub struct WorkoutDraft {
    workout: Workout,
    dirty: Vec<String>,
}

impl WorkoutDraft {
    pub fn new(workout: Workout) -> Self {
        Self {
            workout,
            dirty: Vec::new(),
        }
    }

    pub async fn load(client: &ApiClient, workout_id: &str) -> EditorResult<Self> {
        Ok(Self::new(client.workout(workout_id).await?))
    }

    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    pub fn into_workout(self) -> Workout {
        self.workout
    }

    /// Exercises with unsaved set changes
    pub fn dirty_exercises(&self) -> &[String] {
        &self.dirty
    }

    fn exercise_mut(&mut self, exercise_id: &str) -> EditorResult<&mut WorkoutExercise> {
        self.workout
            .exercises
            .iter_mut()
            .find(|e| e.id == exercise_id)
            .ok_or_else(|| EditorError::UnknownExercise(exercise_id.to_string()))
    }

    fn mark_dirty(&mut self, exercise_id: &str) {
        if !self.dirty.iter().any(|id| id == exercise_id) {
            self.dirty.push(exercise_id.to_string());
        }
    }

    /// Flip a set's completed flag, returning the new value
    pub fn toggle_set(&mut self, exercise_id: &str, index: usize) -> EditorResult<bool> {
        let exercise = self.exercise_mut(exercise_id)?;
        check_index(&exercise.sets, index)?;
        let set = &mut exercise.sets[index];
        set.completed = !set.completed;
        let completed = set.completed;
        self.mark_dirty(exercise_id);
        Ok(completed)
    }

    /// Append a set copying the last one. Returns the new set count.
    pub fn add_set(&mut self, exercise_id: &str) -> EditorResult<usize> {
        let exercise = self.exercise_mut(exercise_id)?;
        let set = next_set(&exercise.sets, ExerciseSet::new(DEFAULT_REPS, 0.0));
        exercise.sets.push(set);
        let len = exercise.sets.len();
        self.mark_dirty(exercise_id);
        Ok(len)
    }

    pub fn remove_set(&mut self, exercise_id: &str, index: usize) -> EditorResult<ExerciseSet> {
        let exercise = self.exercise_mut(exercise_id)?;
        check_index(&exercise.sets, index)?;
        if exercise.sets.len() <= 1 {
            return Err(EditorError::LastSet);
        }
        let removed = exercise.sets.remove(index);
        self.mark_dirty(exercise_id);
        Ok(removed)
    }

    pub fn update_set(&mut self, exercise_id: &str, index: usize, field: SetField) -> EditorResult<()> {
        let exercise = self.exercise_mut(exercise_id)?;
        check_index(&exercise.sets, index)?;
        field.apply(&mut exercise.sets[index]);
        self.mark_dirty(exercise_id);
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.workout.name = name.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.workout.notes = if notes.is_empty() { None } else { Some(notes) };
    }

    /// Push name and notes; the date is sent unchanged
    pub async fn save_details(&self, client: &ApiClient) -> EditorResult<()> {
        let update = WorkoutUpdate {
            name: self.workout.name.clone(),
            notes: self.workout.notes.clone().unwrap_or_default(),
            date: self.workout.date.clone(),
        };
        client.update_workout(&self.workout.id, &update).await?;
        tracing::info!(workout = %self.workout.id, "Workout details saved");
        Ok(())
    }

    /// Push the sets of one exercise
    pub async fn save_exercise(&mut self, client: &ApiClient, exercise_id: &str) -> EditorResult<()> {
        let exercise = self
            .workout
            .exercises
            .iter()
            .find(|e| e.id == exercise_id)
            .ok_or_else(|| EditorError::UnknownExercise(exercise_id.to_string()))?;

        let input = ExerciseInput {
            exercise_template_id: exercise.exercise_template.id.clone(),
            sets: exercise.sets.clone(),
        };
        client
            .update_exercise(&self.workout.id, exercise_id, &input)
            .await?;

        self.dirty.retain(|id| id != exercise_id);
        tracing::debug!(workout = %self.workout.id, exercise = exercise_id, "Exercise sets saved");
        Ok(())
    }

    /// Save every exercise with pending set changes. Stops at the first failure;
    /// exercises saved before it are no longer dirty.
    pub async fn save_all(&mut self, client: &ApiClient) -> EditorResult<usize> {
        let pending = self.dirty.clone();
        for exercise_id in &pending {
            self.save_exercise(client, exercise_id).await?;
        }
        Ok(pending.len())
    }

    /// Remove an exercise locally, then on the server.
    ///
    /// If the server call fails the draft is reloaded from the server so it
    /// matches what is actually stored, and the original error is returned.
    pub async fn remove_exercise(&mut self, client: &ApiClient, exercise_id: &str) -> EditorResult<WorkoutExercise> {
        let index = self
            .workout
            .exercises
            .iter()
            .position(|e| e.id == exercise_id)
            .ok_or_else(|| EditorError::UnknownExercise(exercise_id.to_string()))?;

        let removed = self.workout.exercises.remove(index);
        self.dirty.retain(|id| id != exercise_id);

        match client.remove_exercise(&self.workout.id, exercise_id).await {
            Ok(()) => {
                tracing::info!(exercise = %removed.exercise_template.name, "Exercise removed from workout");
                Ok(removed)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to remove exercise, reloading workout");
                match client.workout(&self.workout.id).await {
                    Ok(fresh) => {
                        self.workout = fresh;
                        self.dirty.clear();
                    }
                    Err(refresh) => {
                        tracing::error!(error = %refresh, "Failed to reload workout after removal error");
                        self.workout.exercises.insert(index, removed);
                    }
                }
                Err(e.into())
            }
        }
    }
}

/// Sets being entered for a new exercise
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    template_id: String,
    requires_weight: bool,
    sets: Vec<ExerciseSet>,
}

impl ExerciseDraft {
    /// Start with one set of 8 reps at 10 kg, or bodyweight when the
    /// exercise takes no weight.
    pub fn new(template: &ExerciseTemplate) -> Self {
        let weight = if template.requires_weight { DEFAULT_WEIGHT } else { 0.0 };
        Self {
            template_id: template.id.clone(),
            requires_weight: template.requires_weight,
            sets: vec![ExerciseSet::new(DEFAULT_REPS, weight)],
        }
    }

    pub fn sets(&self) -> &[ExerciseSet] {
        &self.sets
    }

    pub fn add_set(&mut self) {
        let set = next_set(&self.sets, ExerciseSet::new(DEFAULT_REPS, 0.0));
        self.sets.push(set);
    }

    pub fn remove_set(&mut self, index: usize) -> EditorResult<()> {
        check_index(&self.sets, index)?;
        if self.sets.len() <= 1 {
            return Err(EditorError::LastSet);
        }
        self.sets.remove(index);
        Ok(())
    }

    pub fn update_set(&mut self, index: usize, field: SetField) -> EditorResult<()> {
        check_index(&self.sets, index)?;
        field.apply(&mut self.sets[index]);
        Ok(())
    }

    /// Replace all sets at once, as when sets are given on the command line.
    /// An empty list keeps the current sets.
    pub fn with_sets(mut self, sets: Vec<ExerciseSet>) -> Self {
        if !sets.is_empty() {
            self.sets = sets;
        }
        self
    }

    pub fn volume(&self) -> f64 {
        draft_volume(&self.sets, self.requires_weight)
    }

    pub fn to_input(&self) -> ExerciseInput {
        ExerciseInput {
            exercise_template_id: self.template_id.clone(),
            sets: self.sets.clone(),
        }
    }

    /// Validate and add to a workout
    pub async fn submit(&self, client: &ApiClient, workout_id: &str) -> EditorResult<()> {
        client.add_exercise(workout_id, &self.to_input()).await?;
        Ok(())
    }
}
