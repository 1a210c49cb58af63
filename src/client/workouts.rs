//! Workout endpoints

use chrono::NaiveDate;
use reqwest::Method;

use super::{encode, ApiClient, ClientError, ClientResult, Timeout};
use crate::models::{ExerciseHistoryEntry, ExerciseInput, NewWorkout, Workout, WorkoutUpdate};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn normalized(mut workouts: Vec<Workout>) -> Vec<Workout> {
    workouts.iter_mut().for_each(Workout::normalize);
    workouts
}

impl ApiClient {
    /// Every workout of the current user
    pub async fn workouts(&self) -> ClientResult<Vec<Workout>> {
        if !self.has_token().await {
            tracing::warn!("No auth token available, workout listing may fail");
        }
        let workouts = self.get("/workouts", Timeout::Extended).await?;
        Ok(normalized(workouts))
    }

    pub async fn workout(&self, id: &str) -> ClientResult<Workout> {
        let mut workout: Workout = self
            .get(&format!("/workouts/{}", encode(id)), Timeout::Standard)
            .await?;
        workout.normalize();
        Ok(workout)
    }

    /// Workouts dated within `[start, end]`
    pub async fn workouts_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClientResult<Vec<Workout>> {
        tracing::debug!(days = (end - start).num_days(), "Fetching workouts for date range");

        let path = format!(
            "/workouts/by-date-range?startDate={}&endDate={}",
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        );
        let workouts = self.get(&path, Timeout::Extended).await?;
        Ok(normalized(workouts))
    }

    pub async fn workouts_by_muscle_group(&self, muscle_group_id: &str) -> ClientResult<Vec<Workout>> {
        let path = format!("/workouts/by-muscle-group/{}", encode(muscle_group_id));
        let workouts = self.get(&path, Timeout::Standard).await?;
        Ok(normalized(workouts))
    }

    pub async fn create_workout(&self, workout: &NewWorkout) -> ClientResult<Workout> {
        let mut created: Workout = self.post("/workouts", Some(workout)).await?;
        created.normalize();
        tracing::info!(id = %created.id, name = %created.name, "Workout created");
        Ok(created)
    }

    pub async fn update_workout(&self, id: &str, update: &WorkoutUpdate) -> ClientResult<()> {
        self.put_discard(&format!("/workouts/{}", encode(id)), update)
            .await
    }

    pub async fn delete_workout(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/workouts/{}", encode(id))).await?;
        tracing::info!(id, "Workout deleted");
        Ok(())
    }

    /// Add an exercise with its sets. The payload is checked before sending.
    pub async fn add_exercise(&self, workout_id: &str, exercise: &ExerciseInput) -> ClientResult<()> {
        exercise.validate().map_err(ClientError::Validation)?;

        tracing::debug!(
            workout_id,
            template = %exercise.exercise_template_id,
            sets = exercise.sets.len(),
            "Adding exercise to workout"
        );
        self.post_discard(&format!("/workouts/{}/exercises", encode(workout_id)), exercise)
            .await
    }

    pub async fn update_exercise(
        &self,
        workout_id: &str,
        exercise_id: &str,
        exercise: &ExerciseInput,
    ) -> ClientResult<()> {
        let path = format!(
            "/workouts/{}/exercises/{}",
            encode(workout_id),
            encode(exercise_id)
        );
        self.put_discard(&path, exercise).await
    }

    pub async fn remove_exercise(&self, workout_id: &str, exercise_id: &str) -> ClientResult<()> {
        self.delete(&format!(
            "/workouts/{}/exercises/{}",
            encode(workout_id),
            encode(exercise_id)
        ))
        .await
    }

    /// Duplicate a workout, with all exercises and sets, onto a new date
    pub async fn copy_workout(&self, id: &str, new_date: NaiveDate) -> ClientResult<Workout> {
        let path = format!(
            "/workouts/{}/copy?newDate={}",
            encode(id),
            new_date.format(DATE_FORMAT)
        );
        let mut copy: Workout = self.post::<(), _>(&path, None).await?;
        copy.normalize();
        Ok(copy)
    }

    /// Per-workout volume for one exercise, optionally starting at `start`
    pub async fn exercise_history(
        &self,
        exercise_template_id: &str,
        start: Option<NaiveDate>,
    ) -> ClientResult<Vec<ExerciseHistoryEntry>> {
        let mut path = format!("/workouts/exercise-history/{}", encode(exercise_template_id));
        if let Some(start) = start {
            path.push_str(&format!("?startDate={}", start.format(DATE_FORMAT)));
        }
        self.get(&path, Timeout::Extended).await
    }

    /// Whether a workout exists, distinguishing "missing" from other failures
    pub async fn workout_exists(&self, id: &str) -> ClientResult<bool> {
        match self
            .execute::<()>(Method::GET, &format!("/workouts/{}", encode(id)), None, Timeout::Standard)
            .await
        {
            Ok(_) => Ok(true),
            Err(ClientError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
