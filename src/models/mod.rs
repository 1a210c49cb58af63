//! Domain records and request payloads
//!
//! Every record here is a transient copy of server-owned state. The
//! server controls lifecycle; the client only normalizes optional fields
//! that older API versions omit.
//!
//! - [`types`]: users, muscle groups, exercise/workout templates, workouts
//! - [`dto`]: request and response bodies for individual endpoints

pub mod dto;
pub mod types;

pub use dto::{
    AuthResponse, ChangePasswordRequest, ExerciseInput, FromTemplateRequest, LoginRequest,
    NewWorkout, NewWorkoutTemplate, ProfileUpdate, SignupRequest, TemplateExerciseInput,
    WorkoutUpdate,
};
pub use types::{
    ExerciseHistoryEntry, ExerciseRef, ExerciseSet, ExerciseTemplate, MuscleGroup, PrototypeSet,
    TemplateExercise, User, Workout, WorkoutExercise, WorkoutTemplate,
};
