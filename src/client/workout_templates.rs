//! Workout template endpoints

use chrono::NaiveDate;

use super::{encode, fallback, ApiClient, ClientError, ClientResult, Fetched, Timeout};
use crate::models::{FromTemplateRequest, NewWorkoutTemplate, Workout, WorkoutTemplate};

impl ApiClient {
    pub async fn workout_templates(&self) -> ClientResult<Vec<WorkoutTemplate>> {
        if !self.has_token().await {
            tracing::warn!("No auth token available, workout template listing may fail");
        }
        self.get("/workout-templates", Timeout::Standard).await
    }

    /// Templates from the server, or the built-in push/pull/legs split when
    /// the request fails or the server has none.
    pub async fn workout_templates_or_demo(&self) -> Fetched<Vec<WorkoutTemplate>> {
        match self.workout_templates().await {
            Ok(templates) if !templates.is_empty() => Fetched::remote(templates),
            Ok(_) => {
                tracing::info!("No workout templates on the server, using demo templates");
                Fetched::fallback(fallback::demo_workout_templates())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Workout template request failed, using demo templates");
                Fetched::fallback(fallback::demo_workout_templates())
            }
        }
    }

    pub async fn workout_template(&self, id: &str) -> ClientResult<WorkoutTemplate> {
        self.get(&format!("/workout-templates/{}", encode(id)), Timeout::Standard)
            .await
    }

    pub async fn create_workout_template(
        &self,
        template: &NewWorkoutTemplate,
    ) -> ClientResult<WorkoutTemplate> {
        let created: WorkoutTemplate = self.post("/workout-templates", Some(template)).await?;
        tracing::info!(id = %created.id, name = %created.name, "Workout template created");
        Ok(created)
    }

    /// Start a workout on `date` from a template.
    ///
    /// The template is fetched first so a missing template fails before
    /// anything is created.
    pub async fn create_workout_from_template(
        &self,
        template_id: &str,
        date: NaiveDate,
    ) -> ClientResult<Workout> {
        let template = self
            .workout_template(template_id)
            .await
            .map_err(|e| match e {
                ClientError::NotFound(_) => ClientError::NotFound("Template not found".to_string()),
                other => other,
            })?;

        tracing::info!(
            template = %template.name,
            %date,
            exercises = template.exercises.len(),
            "Creating workout from template"
        );

        let body = FromTemplateRequest {
            date: date.format("%Y-%m-%d").to_string(),
        };
        let mut workout: Workout = self
            .post(
                &format!("/workouts/from-template/{}", encode(template_id)),
                Some(&body),
            )
            .await?;
        workout.normalize();
        Ok(workout)
    }
}
