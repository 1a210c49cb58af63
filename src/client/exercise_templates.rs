//! Exercise template endpoints
//!
//! Each lookup tries the authenticated endpoint first and retries the
//! `/public` variant. The full listing additionally falls back to the
//! built-in catalog.

use super::{encode, fallback, ApiClient, ClientResult, Fetched};
use crate::models::ExerciseTemplate;

impl ApiClient {
    /// The exercise library
    pub async fn exercise_templates(&self) -> Fetched<Vec<ExerciseTemplate>> {
        match self
            .get_with_public_retry::<Vec<ExerciseTemplate>>(
                "/exercise-templates",
                "/exercise-templates/public",
            )
            .await
        {
            Ok(templates) => {
                tracing::debug!(count = templates.data.len(), "Fetched exercise templates");
                templates
            }
            Err(e) => {
                tracing::warn!(error = %e, "Exercise template requests failed, using fallback catalog");
                Fetched::fallback(fallback::exercise_templates())
            }
        }
    }

    pub async fn exercise_template(&self, id: &str) -> ClientResult<ExerciseTemplate> {
        let id = encode(id);
        self.get_with_public_retry(
            &format!("/exercise-templates/{}", id),
            &format!("/exercise-templates/public/{}", id),
        )
        .await
        .map(|fetched| fetched.data)
    }

    pub async fn exercise_templates_by_muscle_group(
        &self,
        muscle_group_id: &str,
    ) -> ClientResult<Vec<ExerciseTemplate>> {
        let id = encode(muscle_group_id);
        self.get_with_public_retry(
            &format!("/exercise-templates/by-muscle-group/{}", id),
            &format!("/exercise-templates/public/by-muscle-group/{}", id),
        )
        .await
        .map(|fetched| fetched.data)
    }
}
