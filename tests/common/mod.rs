//! Common test utilities for MuscleMetrics client integration tests
//!
//! Provides an in-process mock of the backend REST API with switches for
//! the failure modes the client has to survive.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use musclemetrics::client::fallback;
use musclemetrics::models::{
    ExerciseRef, ExerciseSet, MuscleGroup, NewWorkout, Workout, WorkoutExercise, WorkoutTemplate,
};
use musclemetrics::{ApiClient, ClientConfig, MemoryTokenStore, TokenStore};

pub const TOKEN: &str = "test-token";
pub const EMAIL: &str = "sam@example.com";
pub const PASSWORD: &str = "secret";

/// Mutable backend state plus failure switches
#[derive(Default)]
pub struct MockState {
    pub workouts: Vec<Workout>,
    pub templates: Vec<WorkoutTemplate>,
    /// Raw exercise template JSON, returned as-is
    pub exercise_templates: Vec<Value>,
    /// `Authorization` header of every request, in order
    pub auth_headers: Vec<Option<String>>,
    /// Every request path, in order
    pub paths: Vec<String>,
    /// Authenticated endpoints answer 401 "Token has expired"
    pub token_expired: bool,
    /// The authenticated exercise template endpoints answer 500
    pub fail_private_exercises: bool,
    /// The public exercise template endpoints answer 500
    pub fail_public_exercises: bool,
    /// Muscle groups answer 503
    pub fail_muscle_groups: bool,
    /// Exercise removal answers 500
    pub fail_exercise_removal: bool,
    next_id: u32,
}

impl MockState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

type Shared = Arc<Mutex<MockState>>;

/// A mock MuscleMetrics backend on a random local port
pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl MockBackend {
    /// Start an empty backend
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            exercise_templates: default_exercise_templates(),
            ..MockState::default()
        }));
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock backend stopped: {}", e);
            }
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Client with a short timeout against this backend
    pub fn client(&self, tokens: Arc<dyn TokenStore>) -> ApiClient {
        let config = ClientConfig {
            base_url: self.base_url(),
            timeout: Duration::from_secs(5),
            long_timeout: Duration::from_secs(5),
        };
        ApiClient::new(config, tokens).unwrap()
    }

    /// Client already holding a valid token
    pub fn logged_in_client(&self) -> (ApiClient, Arc<MemoryTokenStore>) {
        let tokens = Arc::new(MemoryTokenStore::with_token(TOKEN));
        (self.client(tokens.clone()), tokens)
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn insert_workout(&self, workout: Workout) {
        self.with_state(|s| s.workouts.push(workout));
    }

    pub fn insert_template(&self, template: WorkoutTemplate) {
        self.with_state(|s| s.templates.push(template));
    }

    pub fn workout(&self, id: &str) -> Option<Workout> {
        self.with_state(|s| s.workouts.iter().find(|w| w.id == id).cloned())
    }

    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.with_state(|s| s.auth_headers.clone())
    }

    pub fn paths(&self) -> Vec<String> {
        self.with_state(|s| s.paths.clone())
    }
}

/// Client pointed at a port nothing listens on
pub fn offline_client(tokens: Arc<dyn TokenStore>) -> ApiClient {
    let config = ClientConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        timeout: Duration::from_secs(2),
        long_timeout: Duration::from_secs(2),
    };
    ApiClient::new(config, tokens).unwrap()
}

/// A workout with one exercise of two sets, the first completed
pub fn sample_workout(id: &str, date: &str) -> Workout {
    let mut done = ExerciseSet::new(5, 100.0);
    done.completed = true;
    Workout {
        id: id.to_string(),
        name: "Leg Day".to_string(),
        date: date.to_string(),
        // Left empty so the client has to fill it in
        day_of_week: String::new(),
        target_muscle_groups: vec![MuscleGroup::new("legs", "Legs")],
        exercises: vec![WorkoutExercise {
            id: format!("{}-squat", id),
            exercise_template: ExerciseRef {
                id: "squat".to_string(),
                name: "Squat".to_string(),
                muscle_groups: Vec::new(),
            },
            sets: vec![done, ExerciseSet::new(5, 102.5)],
        }],
        notes: None,
        pending_sync: false,
    }
}

fn default_exercise_templates() -> Vec<Value> {
    vec![
        json!({
            "id": "db-bench",
            "name": "Dumbbell Bench",
            "muscleGroups": [{"id": "chest", "name": "Chest"}],
            "requiresWeight": true
        }),
        // Older shape with primary/secondary fields
        json!({
            "id": "dips",
            "name": "Dips",
            "primaryMuscleGroup": {"id": "triceps", "name": "Triceps"},
            "secondaryMuscleGroup": "chest",
            "requiresWeight": false
        }),
    ]
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/public/ping", get(ping))
        .route("/api/auth/login", post(login))
        .route("/api/auth/signup", post(signup))
        .route("/api/users/profile", get(profile).put(update_profile))
        .route("/api/users/change-password", post(change_password))
        .route("/api/muscle-groups/public", get(muscle_groups))
        .route("/api/exercise-templates", get(private_exercise_templates))
        .route("/api/exercise-templates/public", get(public_exercise_templates))
        .route(
            "/api/exercise-templates/by-muscle-group/:id",
            get(private_exercise_templates_by_group),
        )
        .route(
            "/api/exercise-templates/public/by-muscle-group/:id",
            get(public_exercise_templates_by_group),
        )
        .route("/api/exercise-templates/:id", get(private_exercise_template))
        .route("/api/exercise-templates/public/:id", get(public_exercise_template))
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/by-date-range", get(workouts_in_range))
        .route("/api/workouts/by-muscle-group/:id", get(workouts_by_group))
        .route("/api/workouts/exercise-history/:id", get(exercise_history))
        .route("/api/workouts/from-template/:id", post(from_template))
        .route(
            "/api/workouts/:id",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
        .route("/api/workouts/:id/copy", post(copy_workout))
        .route("/api/workouts/:id/exercises", post(add_exercise))
        .route(
            "/api/workouts/:id/exercises/:exercise_id",
            put(update_exercise).delete(remove_exercise),
        )
        .route("/api/workout-templates", get(list_templates).post(create_template))
        .route("/api/workout-templates/:id", get(get_template))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}

async fn record_request(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let auth = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    {
        let mut s = state.lock().unwrap();
        s.auth_headers.push(auth);
        s.paths.push(req.uri().to_string());
    }
    next.run(req).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Reject requests without the test token
fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(_) if state.token_expired => Err(error(StatusCode::UNAUTHORIZED, "Token has expired")),
        Some(value) if value == expected => Ok(()),
        Some(_) => Err(error(StatusCode::UNAUTHORIZED, "Invalid token")),
        None => Err(error(StatusCode::UNAUTHORIZED, "Authentication required")),
    }
}

macro_rules! authorized {
    ($state:expr, $headers:expr) => {{
        let guard = $state.lock().unwrap();
        if let Err(response) = authorize(&guard, &$headers) {
            return response;
        }
        guard
    }};
}

fn user() -> Value {
    json!({
        "id": "user-1",
        "username": "sam",
        "email": EMAIL,
        "weight": 82.5,
        "height": null,
        "roles": ["USER"]
    })
}

async fn ping() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        let mut response = user();
        response["token"] = json!(TOKEN);
        Json(response).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid email or password")
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL {
        return error(StatusCode::BAD_REQUEST, "Email is already in use");
    }
    Json(json!({
        "token": TOKEN,
        "id": "user-2",
        "username": body["username"],
        "email": body["email"],
        "roles": null
    }))
    .into_response()
}

async fn profile(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let _s = authorized!(state, headers);
    Json(user()).into_response()
}

async fn update_profile(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let _s = authorized!(state, headers);
    let mut updated = user();
    updated["username"] = body["username"].clone();
    updated["weight"] = body["weight"].clone();
    updated["height"] = body["height"].clone();
    Json(updated).into_response()
}

async fn change_password(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let _s = authorized!(state, headers);
    if body["currentPassword"] != PASSWORD {
        return error(StatusCode::BAD_REQUEST, "Current password is incorrect");
    }
    StatusCode::OK.into_response()
}

async fn muscle_groups(State(state): State<Shared>) -> Response {
    if state.lock().unwrap().fail_muscle_groups {
        return error(StatusCode::SERVICE_UNAVAILABLE, "Service unavailable");
    }
    Json(json!([
        {"id": "chest", "name": "Chest"},
        {"id": "legs", "name": "Legs"},
        {"id": "back", "name": "Back"}
    ]))
    .into_response()
}

async fn private_exercise_templates(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let s = authorized!(state, headers);
    if s.fail_private_exercises {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }
    Json(s.exercise_templates.clone()).into_response()
}

async fn public_exercise_templates(State(state): State<Shared>) -> Response {
    let s = state.lock().unwrap();
    if s.fail_public_exercises {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }
    Json(s.exercise_templates.clone()).into_response()
}

fn find_exercise_template(s: &MockState, id: &str) -> Response {
    match s.exercise_templates.iter().find(|t| t["id"] == id) {
        Some(t) => Json(t.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Exercise template not found"),
    }
}

async fn private_exercise_template(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let s = authorized!(state, headers);
    if s.fail_private_exercises {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }
    find_exercise_template(&s, &id)
}

async fn public_exercise_template(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let s = state.lock().unwrap();
    if s.fail_public_exercises {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }
    find_exercise_template(&s, &id)
}

/// Templates tagged with `group`, in either the current or the legacy shape
fn exercise_templates_for_group(s: &MockState, group: &str) -> Response {
    let matching: Vec<Value> = s
        .exercise_templates
        .iter()
        .filter(|t| {
            t["muscleGroups"]
                .as_array()
                .is_some_and(|groups| groups.iter().any(|g| g["id"] == group))
                || t["primaryMuscleGroup"]["id"] == group
                || t["secondaryMuscleGroup"] == group
        })
        .cloned()
        .collect();
    Json(matching).into_response()
}

async fn private_exercise_templates_by_group(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(group): Path<String>,
) -> Response {
    let s = authorized!(state, headers);
    if s.fail_private_exercises {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }
    exercise_templates_for_group(&s, &group)
}

async fn public_exercise_templates_by_group(State(state): State<Shared>, Path(group): Path<String>) -> Response {
    let s = state.lock().unwrap();
    if s.fail_public_exercises {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }
    exercise_templates_for_group(&s, &group)
}

async fn workouts_by_group(State(state): State<Shared>, headers: HeaderMap, Path(group): Path<String>) -> Response {
    let s = authorized!(state, headers);
    let matching: Vec<Workout> = s
        .workouts
        .iter()
        .filter(|w| w.target_muscle_groups.iter().any(|g| g.id == group))
        .cloned()
        .collect();
    Json(matching).into_response()
}

async fn list_workouts(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let s = authorized!(state, headers);
    Json(s.workouts.clone()).into_response()
}

async fn workouts_in_range(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let s = authorized!(state, headers);
    let (Some(start), Some(end)) = (params.get("startDate"), params.get("endDate")) else {
        return error(StatusCode::BAD_REQUEST, "startDate and endDate are required");
    };
    // ISO dates compare correctly as strings
    let matching: Vec<Workout> = s
        .workouts
        .iter()
        .filter(|w| {
            let day = w.date.get(..10).unwrap_or(&w.date);
            day >= start.as_str() && day <= end.as_str()
        })
        .cloned()
        .collect();
    Json(matching).into_response()
}

async fn exercise_history(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let s = authorized!(state, headers);
    let start = params.get("startDate").cloned().unwrap_or_default();
    let entries: Vec<Value> = s
        .workouts
        .iter()
        .filter(|w| w.date.as_str() >= start.as_str())
        .filter_map(|w| {
            let exercise = w.exercises.iter().find(|e| e.exercise_template.id == id)?;
            let volume: f64 = exercise.sets.iter().map(|s| s.reps as f64 * s.weight).sum();
            Some(json!({
                "date": w.date,
                "workoutId": w.id,
                "workoutName": w.name,
                "exerciseId": exercise.id,
                "sets": exercise.sets.len(),
                "totalVolume": volume
            }))
        })
        .collect();
    Json(entries).into_response()
}

async fn create_workout(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<NewWorkout>) -> Response {
    let mut s = authorized!(state, headers);
    let known = fallback::muscle_groups();
    let workout = Workout {
        id: s.next_id("workout"),
        name: body.name,
        date: body.date,
        day_of_week: String::new(),
        target_muscle_groups: body
            .target_muscle_group_ids
            .iter()
            .map(|id| {
                known
                    .iter()
                    .find(|g| &g.id == id)
                    .cloned()
                    .unwrap_or_else(|| MuscleGroup::new(id.clone(), id.clone()))
            })
            .collect(),
        exercises: Vec::new(),
        notes: Some(body.notes),
        pending_sync: false,
    };
    s.workouts.push(workout.clone());
    (StatusCode::CREATED, Json(workout)).into_response()
}

async fn get_workout(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let s = authorized!(state, headers);
    match s.workouts.iter().find(|w| w.id == id) {
        Some(w) => Json(w.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Workout not found"),
    }
}

async fn update_workout(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = authorized!(state, headers);
    let Some(workout) = s.workouts.iter_mut().find(|w| w.id == id) else {
        return error(StatusCode::NOT_FOUND, "Workout not found");
    };
    if let Some(name) = body["name"].as_str() {
        workout.name = name.to_string();
    }
    workout.notes = body["notes"].as_str().map(str::to_string);
    if let Some(date) = body["date"].as_str() {
        workout.date = date.to_string();
    }
    Json(workout.clone()).into_response()
}

async fn delete_workout(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let mut s = authorized!(state, headers);
    let before = s.workouts.len();
    s.workouts.retain(|w| w.id != id);
    if s.workouts.len() == before {
        return error(StatusCode::NOT_FOUND, "Workout not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn copy_workout(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut s = authorized!(state, headers);
    let Some(original) = s.workouts.iter().find(|w| w.id == id).cloned() else {
        return error(StatusCode::NOT_FOUND, "Workout not found");
    };
    let Some(date) = params.get("newDate") else {
        return error(StatusCode::BAD_REQUEST, "newDate is required");
    };

    let mut copy = original;
    copy.id = s.next_id("workout");
    copy.date = date.clone();
    copy.day_of_week = String::new();
    for exercise in &mut copy.exercises {
        exercise.id = format!("{}-{}", copy.id, exercise.exercise_template.id);
        exercise.sets.iter_mut().for_each(|set| set.completed = false);
    }
    s.workouts.push(copy.clone());
    (StatusCode::CREATED, Json(copy)).into_response()
}

fn exercise_from_input(s: &MockState, id: String, body: &Value) -> Option<WorkoutExercise> {
    let template_id = body["exerciseTemplateId"].as_str()?.to_string();
    let sets: Vec<ExerciseSet> = serde_json::from_value(body["sets"].clone()).ok()?;
    let name = s
        .exercise_templates
        .iter()
        .find(|t| t["id"] == template_id.as_str())
        .and_then(|t| t["name"].as_str().map(str::to_string))
        .or_else(|| {
            fallback::exercise_templates()
                .into_iter()
                .find(|t| t.id == template_id)
                .map(|t| t.name)
        })
        .unwrap_or_else(|| template_id.clone());
    Some(WorkoutExercise {
        id,
        exercise_template: ExerciseRef {
            id: template_id,
            name,
            muscle_groups: Vec::new(),
        },
        sets,
    })
}

async fn add_exercise(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = authorized!(state, headers);
    let exercise_id = s.next_id("exercise");
    let Some(exercise) = exercise_from_input(&s, exercise_id, &body) else {
        return error(StatusCode::BAD_REQUEST, "Invalid exercise");
    };
    let Some(workout) = s.workouts.iter_mut().find(|w| w.id == id) else {
        return error(StatusCode::NOT_FOUND, "Workout not found");
    };
    workout.exercises.push(exercise);
    (StatusCode::CREATED, Json(workout.clone())).into_response()
}

async fn update_exercise(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, exercise_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = authorized!(state, headers);
    let Some(updated) = exercise_from_input(&s, exercise_id.clone(), &body) else {
        return error(StatusCode::BAD_REQUEST, "Invalid exercise");
    };
    let Some(exercise) = s
        .workouts
        .iter_mut()
        .find(|w| w.id == id)
        .and_then(|w| w.exercises.iter_mut().find(|e| e.id == exercise_id))
    else {
        return error(StatusCode::NOT_FOUND, "Exercise not found");
    };
    *exercise = updated;
    Json(exercise.clone()).into_response()
}

async fn remove_exercise(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, exercise_id)): Path<(String, String)>,
) -> Response {
    let mut s = authorized!(state, headers);
    if s.fail_exercise_removal {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }
    let Some(workout) = s.workouts.iter_mut().find(|w| w.id == id) else {
        return error(StatusCode::NOT_FOUND, "Workout not found");
    };
    workout.exercises.retain(|e| e.id != exercise_id);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_templates(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let s = authorized!(state, headers);
    Json(s.templates.clone()).into_response()
}

async fn get_template(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let s = authorized!(state, headers);
    match s.templates.iter().find(|t| t.id == id) {
        Some(t) => Json(t.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Workout template not found"),
    }
}

async fn create_template(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let mut s = authorized!(state, headers);
    let Some(name) = body["name"].as_str().filter(|n| !n.is_empty()) else {
        return error(StatusCode::BAD_REQUEST, "Template name is required");
    };
    let exercises = body["exercises"]
        .as_array()
        .map(|list| {
            list.iter()
                .map(|e| {
                    json!({
                        "exerciseTemplate": {
                            "id": e["exerciseTemplateId"],
                            "name": e["exerciseTemplateId"]
                        },
                        "sets": e["sets"]
                    })
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    let groups: Vec<Value> = body["targetMuscleGroupIds"]
        .as_array()
        .map(|ids| ids.iter().map(|id| json!({"id": id, "name": id})).collect())
        .unwrap_or_default();

    let raw = json!({
        "id": s.next_id("template"),
        "name": name,
        "description": body["description"],
        "type": body["type"],
        "targetMuscleGroups": groups,
        "exercises": exercises
    });
    let template: WorkoutTemplate = match serde_json::from_value(raw) {
        Ok(t) => t,
        Err(e) => return error(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    s.templates.push(template.clone());
    (StatusCode::CREATED, Json(template)).into_response()
}

async fn from_template(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = authorized!(state, headers);
    let Some(template) = s.templates.iter().find(|t| t.id == id).cloned() else {
        return error(StatusCode::NOT_FOUND, "Workout template not found");
    };
    let Some(date) = body["date"].as_str() else {
        return error(StatusCode::BAD_REQUEST, "date is required");
    };

    let workout_id = s.next_id("workout");
    let workout = Workout {
        id: workout_id.clone(),
        name: template.name.clone(),
        date: date.to_string(),
        day_of_week: String::new(),
        target_muscle_groups: template.target_muscle_groups.clone(),
        exercises: template
            .exercises
            .iter()
            .map(|e| WorkoutExercise {
                id: format!("{}-{}", workout_id, e.exercise_template.id),
                exercise_template: e.exercise_template.clone(),
                sets: e
                    .sets
                    .iter()
                    .map(|p| ExerciseSet::new(p.reps, p.weight))
                    .collect(),
            })
            .collect(),
        notes: Some(template.description.clone()),
        pending_sync: false,
    };
    s.workouts.push(workout.clone());
    (StatusCode::CREATED, Json(workout)).into_response()
}
