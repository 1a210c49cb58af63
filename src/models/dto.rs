//! Request and response bodies
//!
//! Shapes match what the backend expects on the wire (camelCase keys).

use serde::{Deserialize, Serialize};

use super::types::{ExerciseSet, PrototypeSet, User};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body returned by `/auth/login` and `/auth/signup`: the token plus the
/// user's fields at the top level.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: User,
}

/// Editable profile fields. Absent weight/height are sent as explicit nulls
/// so the server clears them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileUpdate {
    pub username: String,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    pub name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub target_muscle_group_ids: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkoutUpdate {
    pub name: String,
    pub notes: String,
    pub date: String,
}

/// Exercise payload for add/update on a workout
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInput {
    pub exercise_template_id: String,
    pub sets: Vec<ExerciseSet>,
}

impl ExerciseInput {
    /// Reject payloads the backend would refuse: a template id, at least one
    /// set, positive reps and a finite weight on every set.
    pub fn validate(&self) -> Result<(), String> {
        if self.exercise_template_id.trim().is_empty() {
            return Err("Missing required field: exerciseTemplateId".to_string());
        }
        if self.sets.is_empty() {
            return Err("Sets must be a non-empty array".to_string());
        }
        for set in &self.sets {
            if set.reps == 0 {
                return Err(format!("Invalid reps value: {}", set.reps));
            }
            if !set.weight.is_finite() {
                return Err(format!("Invalid weight value: {}", set.weight));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExerciseInput {
    pub exercise_template_id: String,
    pub sets: Vec<PrototypeSet>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutTemplate {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target_muscle_group_ids: Vec<String>,
    pub exercises: Vec<TemplateExerciseInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FromTemplateRequest {
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_flattens_user() {
        let json = r#"{"token": "abc", "id": "7", "username": "sam", "email": "s@x.io", "roles": ["ROLE_USER"]}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.token, "abc");
        assert_eq!(response.user.username, "sam");
        assert_eq!(response.user.roles, vec!["ROLE_USER"]);
    }

    #[test]
    fn test_profile_update_sends_nulls() {
        let update = ProfileUpdate {
            username: "sam".into(),
            weight: Some(82.5),
            height: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["weight"], 82.5);
        assert!(value["height"].is_null());
    }

    #[test]
    fn test_exercise_input_validation() {
        let mut input = ExerciseInput {
            exercise_template_id: "squat".into(),
            sets: vec![ExerciseSet::new(5, 100.0)],
        };
        assert!(input.validate().is_ok());

        input.sets.push(ExerciseSet::new(0, 100.0));
        assert_eq!(input.validate().unwrap_err(), "Invalid reps value: 0");

        input.sets.clear();
        assert!(input.validate().is_err());

        input.exercise_template_id = " ".into();
        assert_eq!(
            input.validate().unwrap_err(),
            "Missing required field: exerciseTemplateId"
        );
    }

    #[test]
    fn test_exercise_input_wire_format() {
        let input = ExerciseInput {
            exercise_template_id: "squat".into(),
            sets: vec![ExerciseSet::new(5, 100.0)],
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["exerciseTemplateId"], "squat");
        assert_eq!(value["sets"][0]["completed"], false);
    }
}
