//! Core records returned by the MuscleMetrics API
//!
//! Field names follow the API's camelCase JSON. Missing collections and
//! flags are defaulted during deserialization so that the rest of the crate
//! never has to deal with half-populated records:
//! - `ExerciseTemplate` accepts the legacy primary/secondary muscle group shape
//! - `Workout` exercises, `WorkoutExercise` sets and `ExerciseSet::completed`
//!   default to empty/false
//! - `Workout::normalize` fills in a missing day of week from the date

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An authenticated account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Body weight in kg
    #[serde(default)]
    pub weight: Option<f64>,
    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
}

/// A muscle group used to tag exercises and workouts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MuscleGroup {
    pub id: String,
    pub name: String,
}

impl MuscleGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A catalog entry describing a named movement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "RawExerciseTemplate")]
pub struct ExerciseTemplate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub muscle_groups: Vec<MuscleGroup>,
    /// Whether sets of this exercise carry a weight value
    pub requires_weight: bool,
}

impl ExerciseTemplate {
    /// Whether this template is tagged with the given muscle group id
    pub fn targets(&self, muscle_group_id: &str) -> bool {
        self.muscle_groups.iter().any(|g| g.id == muscle_group_id)
    }

    /// Lightweight reference used inside workouts and templates
    pub fn to_ref(&self) -> ExerciseRef {
        ExerciseRef {
            id: self.id.clone(),
            name: self.name.clone(),
            muscle_groups: self.muscle_groups.clone(),
        }
    }
}

/// Wire shape of an exercise template, covering both the current
/// `muscleGroups` list and the older primary/secondary fields.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExerciseTemplate {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    muscle_groups: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    primary_muscle_group: Option<LegacyMuscleGroup>,
    #[serde(default)]
    secondary_muscle_group: Option<LegacyMuscleGroup>,
    #[serde(default)]
    requires_weight: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyMuscleGroup {
    Id(String),
    Object {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl LegacyMuscleGroup {
    fn into_group(self, default_name: &str) -> Option<MuscleGroup> {
        match self {
            LegacyMuscleGroup::Id(id) => Some(MuscleGroup::new(id, default_name)),
            LegacyMuscleGroup::Object { id, name } => {
                let id = id?;
                Some(MuscleGroup::new(id, name.unwrap_or_else(|| default_name.to_string())))
            }
        }
    }
}

impl From<RawExerciseTemplate> for ExerciseTemplate {
    fn from(raw: RawExerciseTemplate) -> Self {
        let muscle_groups = match raw.muscle_groups {
            Some(groups) => {
                let total = groups.len();
                let valid: Vec<MuscleGroup> = groups
                    .into_iter()
                    .filter_map(|g| serde_json::from_value(g).ok())
                    .collect();
                if valid.len() != total {
                    tracing::warn!(
                        template = %raw.name,
                        dropped = total - valid.len(),
                        "Dropped invalid muscle group entries"
                    );
                }
                valid
            }
            None => [
                raw.primary_muscle_group
                    .and_then(|g| g.into_group("Primary")),
                raw.secondary_muscle_group
                    .and_then(|g| g.into_group("Secondary")),
            ]
            .into_iter()
            .flatten()
            .collect(),
        };

        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            muscle_groups,
            requires_weight: raw.requires_weight.unwrap_or(true),
        }
    }
}

/// Reference to an exercise template as embedded in workouts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRef {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub muscle_groups: Vec<MuscleGroup>,
}

/// One logged unit of reps x weight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub reps: u32,
    /// Weight in kg (0 for bodyweight movements)
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

impl ExerciseSet {
    pub fn new(reps: u32, weight: f64) -> Self {
        Self {
            reps,
            weight,
            completed: false,
        }
    }
}

/// An exercise performed within a workout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: String,
    pub exercise_template: ExerciseRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sets: Vec<ExerciseSet>,
}

/// A dated collection of exercises with logged sets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub name: String,
    /// Calendar date, `YYYY-MM-DD` (a time suffix is tolerated)
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub day_of_week: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_muscle_groups: Vec<MuscleGroup>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exercises: Vec<WorkoutExercise>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Only ever set on workouts created locally and not yet saved remotely
    #[serde(default)]
    pub pending_sync: bool,
}

impl Workout {
    /// Parsed calendar date, if the server sent a recognizable one
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10).unwrap_or(&self.date);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Fill in fields older API versions leave out
    pub fn normalize(&mut self) {
        if self.day_of_week.trim().is_empty() {
            if let Some(date) = self.calendar_date() {
                self.day_of_week = weekday_name(date.weekday()).to_uppercase();
            }
        }
    }

    /// Day of week in title case ("MONDAY" -> "Monday")
    pub fn day_label(&self) -> String {
        let mut chars = self.day_of_week.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
            None => String::new(),
        }
    }

    pub fn muscle_group_names(&self) -> Vec<&str> {
        self.target_muscle_groups
            .iter()
            .map(|g| g.name.as_str())
            .collect()
    }
}

/// English weekday name
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Prescribed reps and weight for one set of a workout template
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PrototypeSet {
    pub reps: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
}

impl PrototypeSet {
    pub const fn new(reps: u32, weight: f64) -> Self {
        Self { reps, weight }
    }
}

/// An exercise slot in a workout template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExercise {
    pub exercise_template: ExerciseRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sets: Vec<PrototypeSet>,
}

/// A reusable, pre-populated workout blueprint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Split type, e.g. "Push", "Pull", "Legs"
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_muscle_groups: Vec<MuscleGroup>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exercises: Vec<TemplateExercise>,
}

/// Per-workout volume summary for one exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseHistoryEntry {
    pub date: String,
    pub workout_id: String,
    #[serde(default)]
    pub workout_name: String,
    #[serde(default)]
    pub exercise_id: String,
    /// Number of sets performed
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub total_volume: f64,
}

impl ExerciseHistoryEntry {
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10).unwrap_or(&self.date);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}
