//! Muscle group endpoints

use super::{encode, fallback, ApiClient, ClientResult, Fetched, Timeout};
use crate::models::MuscleGroup;

impl ApiClient {
    /// All muscle groups, or the built-in list when the request fails
    pub async fn muscle_groups(&self) -> Fetched<Vec<MuscleGroup>> {
        match self
            .get::<Vec<MuscleGroup>>("/muscle-groups/public", Timeout::Standard)
            .await
        {
            Ok(groups) => Fetched::remote(groups),
            Err(e) => {
                tracing::warn!(error = %e, "Muscle group request failed, using fallback data");
                Fetched::fallback(fallback::muscle_groups())
            }
        }
    }

    pub async fn muscle_group(&self, id: &str) -> ClientResult<MuscleGroup> {
        self.get(&format!("/muscle-groups/public/{}", encode(id)), Timeout::Standard)
            .await
    }
}
