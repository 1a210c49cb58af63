//! Workout Logic
//!
//! Values derived from workouts on the client side.
//!
//! ## Architecture
//!
//! - **volume**: reps x weight arithmetic on sets, exercises and workouts
//! - **progress**: look-back ranges and the volume-over-time series
//! - **filter**: search, muscle group filter and sort for lists
//! - **editor**: local drafts of a workout and of a new exercise entry

mod editor;
mod filter;
mod progress;
mod volume;

pub use editor::{
    EditorError, EditorResult, ExerciseDraft, SetField, WorkoutDraft, DEFAULT_REPS, DEFAULT_WEIGHT,
};
pub use filter::{
    filter_exercises, filter_workouts, recent_window, recent_workouts, search_workouts,
    sort_workouts, WorkoutSort, ALL_GROUPS, RECENT_LIMIT,
};
pub use progress::{
    distinct_exercises, volume_change_percent, volume_series, ProgressRange, VolumePoint,
};
pub use volume::draft_volume;
