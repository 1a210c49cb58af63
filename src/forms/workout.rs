//! New workout form

use chrono::NaiveDate;
use regex::Regex;

use super::ValidationError;
use crate::models::NewWorkout;

const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";
const DAY_FIRST_PATTERN: &str = r"^(\d{1,2})/(\d{1,2})/(\d{4})$";

/// Bring a date into `YYYY-MM-DD`.
///
/// `DD/MM/YYYY` (day and month may be one digit) is rearranged; anything
/// else must already be `YYYY-MM-DD` and name a real calendar day.
pub fn normalize_date(input: &str) -> Result<String, ValidationError> {
    let input = input.trim();

    let day_first = Regex::new(DAY_FIRST_PATTERN).map_err(|_| ValidationError::InvalidDate)?;
    let formatted = match day_first.captures(input) {
        Some(caps) => format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]),
        None => input.to_string(),
    };

    let iso = Regex::new(DATE_PATTERN).map_err(|_| ValidationError::InvalidDate)?;
    if !iso.is_match(&formatted) {
        return Err(ValidationError::InvalidDate);
    }
    NaiveDate::parse_from_str(&formatted, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)?;

    Ok(formatted)
}

/// Parse a user-entered date in either accepted format
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let normalized = normalize_date(input)?;
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

#[derive(Debug, Clone, Default)]
pub struct NewWorkoutForm {
    pub name: String,
    /// Empty means today
    pub date: String,
    pub muscle_group_ids: Vec<String>,
    pub notes: String,
}

impl NewWorkoutForm {
    pub fn validate(&self, today: NaiveDate) -> Result<NewWorkout, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("Workout name"));
        }
        if self.muscle_group_ids.iter().all(|id| id.trim().is_empty()) {
            return Err(ValidationError::NoMuscleGroups);
        }

        let date = if self.date.trim().is_empty() {
            today.format("%Y-%m-%d").to_string()
        } else {
            normalize_date(&self.date)?
        };

        let mut ids: Vec<String> = Vec::with_capacity(self.muscle_group_ids.len());
        for id in self.muscle_group_ids.iter().map(|id| id.trim()) {
            if !id.is_empty() && !ids.iter().any(|seen| seen == id) {
                ids.push(id.to_string());
            }
        }

        Ok(NewWorkout {
            name: name.to_string(),
            date,
            target_muscle_group_ids: ids,
            notes: self.notes.trim().to_string(),
        })
    }
}
