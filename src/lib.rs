//! # MuscleMetrics
//!
//! Client library for the MuscleMetrics workout tracking backend: sign in,
//! browse the exercise library, plan and log workouts, and follow volume
//! progress over time.
//!
//! ## Features
//!
//! - **Typed REST client**: bearer token injection, per-endpoint timeouts
//! - **Graceful degradation**: public endpoint retry and built-in fallback data
//! - **Offline workouts**: local cache with pending sync
//! - **Local editing**: optimistic workout drafts with server rollback
//!
//! ## Modules
//!
//! - [`client`]: HTTP client and endpoint groups
//! - [`session`]: token storage and login lifecycle
//! - [`workout`]: volume, progress, filtering and workout drafts
//! - [`forms`]: input validation
//! - [`cache`]: offline workout cache
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use musclemetrics::{ApiClient, ClientConfig, MemoryTokenStore, Session};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default(), Arc::new(MemoryTokenStore::new()))?;
//!     let mut session = Session::new(client);
//!
//!     let user = session.login("sam@example.com", "secret").await?;
//!     println!("Hello {}", user.username);
//!
//!     let workouts = session.client().workouts().await?;
//!     for workout in &workouts {
//!         println!("{} {}: {:.0} kg", workout.date, workout.name, workout.volume());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod forms;
pub mod models;
pub mod notify;
pub mod render;
pub mod session;
pub mod workout;

// Re-export top-level types for convenience
pub use client::{
    ApiClient, ClientConfig, ClientError, ClientResult, DataSource, ErrorCategory, Fetched,
    DEFAULT_API_BASE,
};

pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionError, TokenStore};

pub use models::{
    ExerciseHistoryEntry, ExerciseSet, ExerciseTemplate, MuscleGroup, User, Workout,
    WorkoutExercise, WorkoutTemplate,
};

pub use cache::{CacheError, WorkoutCache};
pub use config::{Config, ConfigError};
pub use forms::ValidationError;
pub use notify::{ConsoleNotifier, Level, Notice, Notifier};
pub use workout::{ExerciseDraft, ProgressRange, WorkoutDraft, WorkoutSort};
