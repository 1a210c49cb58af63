//! Output rendering for the CLI
//!
//! Lists are rendered through [`TableRow`] as an aligned text table, a JSON
//! array or CSV. Detail views render as text or as the full JSON record.

use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{ExerciseTemplate, MuscleGroup, User, Workout, WorkoutTemplate};
use crate::workout::VolumePoint;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type RenderResult = Result<(), RenderError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Unknown format '{}', expected table, json or csv", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        })
    }
}

/// A flat record that can be shown as one table row
pub trait TableRow: Serialize {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

fn kg(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn join_names(groups: &[MuscleGroup]) -> String {
    groups
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render rows in the requested format. `empty` is printed instead of an
/// empty table.
pub fn write_rows<W: Write, R: TableRow>(out: &mut W, format: OutputFormat, rows: &[R], empty: &str) -> RenderResult {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                writeln!(out, "{}", empty)?;
                return Ok(());
            }

            let headers = R::headers();
            let cells: Vec<Vec<String>> = rows.iter().map(R::cells).collect();
            let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
            for row in &cells {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }

            let line = |values: Vec<&str>| -> String {
                values
                    .iter()
                    .zip(&widths)
                    .map(|(v, w)| format!("{:<width$}", v, width = *w))
                    .collect::<Vec<_>>()
                    .join(" | ")
                    .trim_end()
                    .to_string()
            };

            writeln!(out, "{}", line(headers.to_vec()))?;
            writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)))?;
            for row in &cells {
                writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
            }
        }
    }
    Ok(())
}

/// Render a single record: full JSON, or the given text
pub fn write_detail<W: Write, T: Serialize>(out: &mut W, format: OutputFormat, value: &T, text: impl FnOnce(&mut W) -> std::io::Result<()>) -> RenderResult {
    match format {
        OutputFormat::Json | OutputFormat::Csv => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputFormat::Table => text(out)?,
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct WorkoutRow {
    pub id: String,
    pub date: String,
    pub day: String,
    pub name: String,
    pub muscle_groups: String,
    pub exercises: usize,
    pub sets: usize,
    pub volume: f64,
    pub pending_sync: bool,
}

impl From<&Workout> for WorkoutRow {
    fn from(w: &Workout) -> Self {
        Self {
            id: w.id.clone(),
            date: w.date.get(..10).unwrap_or(&w.date).to_string(),
            day: w.day_label(),
            name: w.name.clone(),
            muscle_groups: join_names(&w.target_muscle_groups),
            exercises: w.exercises.len(),
            sets: w.total_sets(),
            volume: w.volume(),
            pending_sync: w.pending_sync,
        }
    }
}

impl TableRow for WorkoutRow {
    fn headers() -> &'static [&'static str] {
        &["Date", "Day", "Name", "Muscle Groups", "Exercises", "Volume (kg)", "ID"]
    }

    fn cells(&self) -> Vec<String> {
        let name = if self.pending_sync {
            format!("{} (local)", self.name)
        } else {
            self.name.clone()
        };
        vec![
            self.date.clone(),
            self.day.clone(),
            name,
            self.muscle_groups.clone(),
            self.exercises.to_string(),
            kg(self.volume),
            self.id.clone(),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct ExerciseRow {
    pub id: String,
    pub name: String,
    pub muscle_groups: String,
    pub requires_weight: bool,
}

impl From<&ExerciseTemplate> for ExerciseRow {
    fn from(t: &ExerciseTemplate) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
            muscle_groups: join_names(&t.muscle_groups),
            requires_weight: t.requires_weight,
        }
    }
}

impl TableRow for ExerciseRow {
    fn headers() -> &'static [&'static str] {
        &["Name", "Muscle Groups", "Weighted", "ID"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.muscle_groups.clone(),
            if self.requires_weight { "yes" } else { "no" }.to_string(),
            self.id.clone(),
        ]
    }
}

impl TableRow for MuscleGroup {
    fn headers() -> &'static [&'static str] {
        &["Name", "ID"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.id.clone()]
    }
}

#[derive(Debug, Serialize)]
pub struct TemplateRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub muscle_groups: String,
    pub exercises: usize,
    pub planned_volume: f64,
}

impl From<&WorkoutTemplate> for TemplateRow {
    fn from(t: &WorkoutTemplate) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
            kind: t.kind.clone(),
            muscle_groups: join_names(&t.target_muscle_groups),
            exercises: t.exercises.len(),
            planned_volume: t.planned_volume(),
        }
    }
}

impl TableRow for TemplateRow {
    fn headers() -> &'static [&'static str] {
        &["Name", "Type", "Muscle Groups", "Exercises", "ID"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.clone(),
            self.muscle_groups.clone(),
            self.exercises.to_string(),
            self.id.clone(),
        ]
    }
}

impl TableRow for VolumePoint {
    fn headers() -> &'static [&'static str] {
        &["Date", "Workout", "Sets", "Volume (kg)"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.label.clone(),
            self.workout_name.clone(),
            self.sets.to_string(),
            kg(self.volume),
        ]
    }
}

/// One logged set, flattened for export
#[derive(Debug, Serialize)]
pub struct SetRow {
    pub workout_id: String,
    pub date: String,
    pub workout: String,
    pub exercise: String,
    pub set: usize,
    pub reps: u32,
    pub weight: f64,
    pub completed: bool,
    pub volume: f64,
}

impl TableRow for SetRow {
    fn headers() -> &'static [&'static str] {
        &["Date", "Workout", "Exercise", "Set", "Reps", "Weight (kg)", "Done"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.workout.clone(),
            self.exercise.clone(),
            self.set.to_string(),
            self.reps.to_string(),
            kg(self.weight),
            if self.completed { "✓" } else { "" }.to_string(),
        ]
    }
}

/// Every set of every workout, in order
pub fn set_rows(workouts: &[&Workout]) -> Vec<SetRow> {
    workouts
        .iter()
        .flat_map(|w| {
            w.exercises.iter().flat_map(move |e| {
                e.sets.iter().enumerate().map(move |(i, s)| SetRow {
                    workout_id: w.id.clone(),
                    date: w.date.get(..10).unwrap_or(&w.date).to_string(),
                    workout: w.name.clone(),
                    exercise: e.exercise_template.name.clone(),
                    set: i + 1,
                    reps: s.reps,
                    weight: s.weight,
                    completed: s.completed,
                    volume: s.volume(),
                })
            })
        })
        .collect()
}

/// Text view of one workout with all sets
pub fn workout_text<W: Write>(out: &mut W, workout: &Workout) -> std::io::Result<()> {
    let local = if workout.pending_sync { " (local, not synced)" } else { "" };
    writeln!(out, "{}{}", workout.name, local)?;
    writeln!(out, "{} {}", workout.day_label(), workout.date.get(..10).unwrap_or(&workout.date))?;
    if !workout.target_muscle_groups.is_empty() {
        writeln!(out, "Targets: {}", join_names(&workout.target_muscle_groups))?;
    }
    if let Some(notes) = workout.notes.as_deref().filter(|n| !n.is_empty()) {
        writeln!(out, "Notes: {}", notes)?;
    }
    writeln!(out, "ID: {}", workout.id)?;

    if workout.exercises.is_empty() {
        writeln!(out)?;
        writeln!(out, "No exercises added yet")?;
        return Ok(());
    }

    for exercise in &workout.exercises {
        writeln!(out)?;
        writeln!(
            out,
            "{}  [{} sets, {} kg]  ({})",
            exercise.exercise_template.name,
            exercise.sets.len(),
            kg(exercise.volume()),
            exercise.id
        )?;
        for (i, set) in exercise.sets.iter().enumerate() {
            let mark = if set.completed { "✓" } else { " " };
            writeln!(out, "  [{}] Set {}: {} reps × {} kg", mark, i + 1, set.reps, kg(set.weight))?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Total volume: {} kg ({} kg completed)",
        kg(workout.volume()),
        kg(workout.completed_volume())
    )
}

/// Text view of a workout template
pub fn template_text<W: Write>(out: &mut W, template: &WorkoutTemplate) -> std::io::Result<()> {
    writeln!(out, "{}", template.name)?;
    if !template.kind.is_empty() {
        writeln!(out, "Type: {}", template.kind)?;
    }
    if !template.description.is_empty() {
        writeln!(out, "{}", template.description)?;
    }
    if !template.target_muscle_groups.is_empty() {
        writeln!(out, "Targets: {}", join_names(&template.target_muscle_groups))?;
    }
    for exercise in &template.exercises {
        writeln!(out)?;
        writeln!(out, "{}", exercise.exercise_template.name)?;
        for (i, set) in exercise.sets.iter().enumerate() {
            writeln!(out, "  Set {}: {} reps × {} kg", i + 1, set.reps, kg(set.weight))?;
        }
    }
    Ok(())
}

pub fn user_text<W: Write>(out: &mut W, user: &User) -> std::io::Result<()> {
    writeln!(out, "{} <{}>", user.username, user.email)?;
    let measure = |v: Option<f64>, unit: &str| v.map(|v| format!("{} {}", kg(v), unit)).unwrap_or_else(|| "-".to_string());
    writeln!(out, "Weight: {}", measure(user.weight, "kg"))?;
    writeln!(out, "Height: {}", measure(user.height, "cm"))?;
    if !user.roles.is_empty() {
        writeln!(out, "Roles: {}", user.roles.join(", "))?;
    }
    writeln!(out, "ID: {}", user.id)
}
