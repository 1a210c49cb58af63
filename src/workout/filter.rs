//! Client-side search, filtering and sorting

use chrono::{Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::models::{ExerciseTemplate, Workout};

/// Muscle group filter value meaning "no filter"
pub const ALL_GROUPS: &str = "all";

/// Number of workouts shown on the home summary
pub const RECENT_LIMIT: usize = 4;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Exercise templates whose name or muscle group names contain `search`,
/// optionally restricted to one muscle group id.
pub fn filter_exercises<'a>(
    templates: &'a [ExerciseTemplate],
    search: &str,
    muscle_group: Option<&str>,
) -> Vec<&'a ExerciseTemplate> {
    let needle = search.trim().to_lowercase();
    let group = muscle_group.filter(|g| !g.is_empty() && *g != ALL_GROUPS);

    templates
        .iter()
        .filter(|t| {
            needle.is_empty()
                || contains_ci(&t.name, &needle)
                || t.muscle_groups.iter().any(|g| contains_ci(&g.name, &needle))
        })
        .filter(|t| group.map_or(true, |id| t.targets(id)))
        .collect()
}

/// Workout list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkoutSort {
    #[default]
    Newest,
    Oldest,
    Name,
}

impl FromStr for WorkoutSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(WorkoutSort::Newest),
            "oldest" => Ok(WorkoutSort::Oldest),
            "name" => Ok(WorkoutSort::Name),
            other => Err(format!("Unknown sort '{}', expected newest, oldest or name", other)),
        }
    }
}

impl fmt::Display for WorkoutSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WorkoutSort::Newest => "newest",
            WorkoutSort::Oldest => "oldest",
            WorkoutSort::Name => "name",
        })
    }
}

/// Workouts matching `search` on name or target muscle group names
pub fn search_workouts<'a>(workouts: &'a [Workout], search: &str) -> Vec<&'a Workout> {
    let needle = search.trim().to_lowercase();
    workouts
        .iter()
        .filter(|w| {
            needle.is_empty()
                || contains_ci(&w.name, &needle)
                || w.target_muscle_groups
                    .iter()
                    .any(|g| contains_ci(&g.name, &needle))
        })
        .collect()
}

/// Sort in place. Workouts with unreadable dates sort as the oldest.
pub fn sort_workouts(workouts: &mut [&Workout], sort: WorkoutSort) {
    match sort {
        WorkoutSort::Newest => workouts.sort_by(|a, b| b.calendar_date().cmp(&a.calendar_date())),
        WorkoutSort::Oldest => workouts.sort_by(|a, b| a.calendar_date().cmp(&b.calendar_date())),
        WorkoutSort::Name => workouts.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        }),
    }
}

/// Search then sort
pub fn filter_workouts<'a>(workouts: &'a [Workout], search: &str, sort: WorkoutSort) -> Vec<&'a Workout> {
    let mut matching = search_workouts(workouts, search);
    sort_workouts(&mut matching, sort);
    matching
}

/// Window used for the recent workouts summary: one calendar month up to today
pub fn recent_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_months(Months::new(1))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

/// Newest `limit` workouts
pub fn recent_workouts(workouts: &[Workout], limit: usize) -> Vec<&Workout> {
    let mut all: Vec<&Workout> = workouts.iter().collect();
    sort_workouts(&mut all, WorkoutSort::Newest);
    all.truncate(limit);
    all
}
