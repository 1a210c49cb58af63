//! Local workout cache
//!
//! The last successful workout listing is kept in a JSON file so the list
//! can still be shown when the backend is unreachable. Workouts created
//! while offline are queued in the same file with `pendingSync` set and
//! pushed later by [`WorkoutCache::sync_pending`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::client::ApiClient;
use crate::models::{MuscleGroup, NewWorkout, Workout};

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt cache file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A workout created locally that the server has not accepted yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingWorkout {
    pub local_id: String,
    pub request: NewWorkout,
    #[serde(default)]
    pub target_muscle_groups: Vec<MuscleGroup>,
    pub created_at: DateTime<Utc>,
}

impl PendingWorkout {
    /// Shape shown in listings next to server workouts
    pub fn to_workout(&self) -> Workout {
        let mut workout = Workout {
            id: self.local_id.clone(),
            name: self.request.name.clone(),
            date: self.request.date.clone(),
            day_of_week: String::new(),
            target_muscle_groups: self.target_muscle_groups.clone(),
            exercises: Vec::new(),
            notes: Some(self.request.notes.clone()).filter(|n| !n.is_empty()),
            pending_sync: true,
        };
        workout.normalize();
        workout
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheFile {
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    workouts: Vec<Workout>,
    #[serde(default)]
    pending: Vec<PendingWorkout>,
}

/// Workouts read back from the cache
#[derive(Debug, Clone, Default)]
pub struct CachedWorkouts {
    /// When the server listing was stored, if ever
    pub saved_at: Option<DateTime<Utc>>,
    /// Server workouts followed by pending local ones
    pub workouts: Vec<Workout>,
}

/// JSON file cache of the workout list
pub struct WorkoutCache {
    path: PathBuf,
}

impl WorkoutCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<CacheFile, CacheError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CacheFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, file: &CacheFile) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(file)?).await?;
        Ok(())
    }

    /// Replace the cached server listing, keeping queued local workouts
    pub async fn store(&self, workouts: &[Workout]) -> Result<(), CacheError> {
        let mut file = self.read().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding unreadable workout cache");
            CacheFile::default()
        });
        file.saved_at = Some(Utc::now());
        file.workouts = workouts.iter().filter(|w| !w.pending_sync).cloned().collect();
        self.write(&file).await?;

        tracing::debug!(count = file.workouts.len(), path = ?self.path, "Workout cache updated");
        Ok(())
    }

    /// Cached listing plus pending workouts. A missing file is an empty cache.
    pub async fn load(&self) -> Result<CachedWorkouts, CacheError> {
        let file = self.read().await?;
        let mut workouts = file.workouts;
        workouts.extend(file.pending.iter().map(PendingWorkout::to_workout));
        Ok(CachedWorkouts {
            saved_at: file.saved_at,
            workouts,
        })
    }

    pub async fn pending(&self) -> Result<Vec<PendingWorkout>, CacheError> {
        Ok(self.read().await?.pending)
    }

    /// Queue a workout the server could not take. Muscle group names are
    /// resolved from `known`, falling back to the id.
    pub async fn add_pending(&self, request: NewWorkout, known: &[MuscleGroup]) -> Result<Workout, CacheError> {
        let target_muscle_groups = request
            .target_muscle_group_ids
            .iter()
            .map(|id| {
                known
                    .iter()
                    .find(|g| &g.id == id)
                    .cloned()
                    .unwrap_or_else(|| MuscleGroup::new(id.clone(), id.clone()))
            })
            .collect();

        let pending = PendingWorkout {
            local_id: format!("local-{}", uuid::Uuid::new_v4()),
            request,
            target_muscle_groups,
            created_at: Utc::now(),
        };
        let workout = pending.to_workout();

        let mut file = self.read().await?;
        file.pending.push(pending);
        self.write(&file).await?;

        tracing::info!(id = %workout.id, date = %workout.date, "Workout saved locally, pending sync");
        Ok(workout)
    }

    /// Create every pending workout on the server. Those accepted are
    /// dropped from the queue; failures stay queued. Returns how many synced.
    pub async fn sync_pending(&self, client: &ApiClient) -> Result<usize, CacheError> {
        let mut file = self.read().await?;
        if file.pending.is_empty() {
            return Ok(0);
        }

        let mut remaining = Vec::new();
        let mut synced = 0;
        for pending in std::mem::take(&mut file.pending) {
            match client.create_workout(&pending.request).await {
                Ok(created) => {
                    tracing::info!(local_id = %pending.local_id, id = %created.id, "Pending workout synced");
                    file.workouts.push(created);
                    synced += 1;
                }
                Err(e) => {
                    tracing::warn!(local_id = %pending.local_id, error = %e, "Failed to sync pending workout");
                    remaining.push(pending);
                }
            }
        }

        file.pending = remaining;
        self.write(&file).await?;
        Ok(synced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn server_workout(id: &str) -> Workout {
        Workout {
            id: id.into(),
            name: format!("Workout {}", id),
            date: "2024-04-01".into(),
            day_of_week: "MONDAY".into(),
            target_muscle_groups: vec![],
            exercises: vec![],
            notes: None,
            pending_sync: false,
        }
    }

    fn request() -> NewWorkout {
        NewWorkout {
            name: "Offline Push".into(),
            date: "2024-04-03".into(),
            target_muscle_group_ids: vec!["chest".into(), "mystery".into()],
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_missing_cache_is_empty() {
        let dir = tempdir().unwrap();
        let cache = WorkoutCache::new(dir.path().join("workouts.json"));

        let cached = cache.load().await.unwrap();
        assert!(cached.workouts.is_empty());
        assert!(cached.saved_at.is_none());
    }

    #[tokio::test]
    async fn test_store_and_load() {
        let dir = tempdir().unwrap();
        let cache = WorkoutCache::new(dir.path().join("cache").join("workouts.json"));

        cache
            .store(&[server_workout("1"), server_workout("2")])
            .await
            .unwrap();

        let cached = cache.load().await.unwrap();
        assert_eq!(cached.workouts.len(), 2);
        assert!(cached.saved_at.is_some());
    }

    #[tokio::test]
    async fn test_pending_survives_store() {
        let dir = tempdir().unwrap();
        let cache = WorkoutCache::new(dir.path().join("workouts.json"));
        let known = [MuscleGroup::new("chest", "Chest")];

        let local = cache.add_pending(request(), &known).await.unwrap();
        assert!(local.pending_sync);
        assert!(local.id.starts_with("local-"));
        assert_eq!(local.day_of_week, "WEDNESDAY");
        assert_eq!(local.muscle_group_names(), ["Chest", "mystery"]);

        // A fresh server listing does not drop the queue
        cache.store(&[server_workout("1")]).await.unwrap();

        let cached = cache.load().await.unwrap();
        assert_eq!(cached.workouts.len(), 2);
        assert!(cached.workouts[1].pending_sync);
        assert_eq!(cache.pending().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workouts.json");
        std::fs::write(&path, "{ nope").unwrap();

        let cache = WorkoutCache::new(&path);
        assert!(matches!(cache.load().await, Err(CacheError::Corrupt(_))));

        // Storing a fresh listing recovers
        cache.store(&[server_workout("1")]).await.unwrap();
        assert_eq!(cache.load().await.unwrap().workouts.len(), 1);
    }
}
