//! Volume progress over time

use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::models::{ExerciseHistoryEntry, ExerciseRef, Workout};

/// Look-back window for the progress chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressRange {
    OneMonth,
    #[default]
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl ProgressRange {
    fn months(self) -> u32 {
        match self {
            ProgressRange::OneMonth => 1,
            ProgressRange::ThreeMonths => 3,
            ProgressRange::SixMonths => 6,
            ProgressRange::OneYear => 12,
        }
    }

    /// First day of the window ending at `today`, in calendar months.
    /// Month ends clamp (31 March minus one month is 29 February in a leap year).
    pub fn start_date(self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl FromStr for ProgressRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(ProgressRange::OneMonth),
            "3m" => Ok(ProgressRange::ThreeMonths),
            "6m" => Ok(ProgressRange::SixMonths),
            "1y" => Ok(ProgressRange::OneYear),
            other => Err(format!("Unknown range '{}', expected 1m, 3m, 6m or 1y", other)),
        }
    }
}

impl fmt::Display for ProgressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProgressRange::OneMonth => "1m",
            ProgressRange::ThreeMonths => "3m",
            ProgressRange::SixMonths => "6m",
            ProgressRange::OneYear => "1y",
        };
        f.write_str(s)
    }
}

/// One point on the volume chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePoint {
    pub date: NaiveDate,
    /// Short label such as "Mar 04"
    pub label: String,
    pub volume: f64,
    pub sets: u32,
    pub workout_name: String,
}

/// Chart points ordered by date. Entries with an unreadable date are skipped.
pub fn volume_series(history: &[ExerciseHistoryEntry]) -> Vec<VolumePoint> {
    let mut points: Vec<VolumePoint> = history
        .iter()
        .filter_map(|entry| {
            let Some(date) = entry.calendar_date() else {
                tracing::warn!(date = %entry.date, workout = %entry.workout_id, "Skipping history entry with bad date");
                return None;
            };
            Some(VolumePoint {
                date,
                label: date.format("%b %d").to_string(),
                volume: entry.total_volume,
                sets: entry.sets,
                workout_name: entry.workout_name.clone(),
            })
        })
        .collect();

    points.sort_by_key(|p| p.date);
    points
}

/// Change from the first to the last point as a percentage, when there are
/// at least two points and the first is non-zero.
pub fn volume_change_percent(points: &[VolumePoint]) -> Option<f64> {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && first.volume != 0.0 => {
            Some((last.volume - first.volume) / first.volume * 100.0)
        }
        _ => None,
    }
}

/// Every exercise performed across `workouts`, once each, sorted by name
pub fn distinct_exercises(workouts: &[Workout]) -> Vec<ExerciseRef> {
    let mut seen: HashMap<&str, &ExerciseRef> = HashMap::new();
    for exercise in workouts.iter().flat_map(|w| w.exercises.iter()) {
        let template = &exercise.exercise_template;
        if !template.id.is_empty() {
            seen.entry(template.id.as_str()).or_insert(template);
        }
    }

    let mut exercises: Vec<ExerciseRef> = seen.into_values().cloned().collect();
    exercises.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    exercises
}
