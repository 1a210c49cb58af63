//! MuscleMetrics CLI
//!
//! Command-line interface for the MuscleMetrics backend:
//! - Sign in and manage the profile
//! - Browse muscle groups and the exercise library
//! - Plan, log and edit workouts, with an offline cache
//! - Use workout templates
//! - Follow volume progress per exercise

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use musclemetrics::client::fallback;
use musclemetrics::config::{generate_default_config, Config};
use musclemetrics::forms::{
    parse_date, ChangePasswordForm, NewWorkoutForm, ProfileForm, RegistrationForm, TemplateForm,
};
use musclemetrics::models::{ExerciseSet, ExerciseTemplate, MuscleGroup, PrototypeSet, Workout};
use musclemetrics::notify::{ConsoleNotifier, Notice, Notifier};
use musclemetrics::render::{
    self, write_detail, write_rows, ExerciseRow, OutputFormat, TemplateRow, WorkoutRow,
};
use musclemetrics::workout::{
    self, EditorError, ExerciseDraft, ProgressRange, SetField, WorkoutDraft, WorkoutSort,
};
use musclemetrics::{
    ApiClient, ClientConfig, ClientError, ErrorCategory, FileTokenStore, Session, TokenStore,
    WorkoutCache,
};

#[derive(Parser)]
#[command(name = "musclemetrics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Plan, log and track strength workouts")]
#[command(long_about = "MuscleMetrics client.\nLog your workouts, reuse templates, and follow your training volume over time.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend API URL, including the /api prefix (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Config file (default: platform config dir, then ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        email: String,
        /// Password (prompted when omitted)
        #[arg(long, env = "MUSCLEMETRICS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        username: String,
        email: String,
        #[arg(long, env = "MUSCLEMETRICS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Password confirmation (prompted when omitted)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Update the profile or password
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// List muscle groups
    MuscleGroups,

    /// Browse the exercise library
    Exercises {
        #[command(subcommand)]
        action: ExerciseCommand,
    },

    /// Plan, log and edit workouts
    Workouts {
        #[command(subcommand)]
        action: WorkoutCommand,
    },

    /// Reusable workout templates
    Templates {
        #[command(subcommand)]
        action: TemplateCommand,
    },

    /// Volume progress for one exercise
    Progress {
        /// Exercise id or name (default: first exercise trained in the last 3 months)
        exercise: Option<String>,
        /// Time range (1m, 3m, 6m, 1y)
        #[arg(short, long, default_value = "3m")]
        range: ProgressRange,
    },

    /// Check that the backend is reachable
    Ping,

    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Change username, weight (kg) or height (cm). 0 clears a value.
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
    },
    /// Change the password (all values prompted)
    Password,
}

#[derive(Subcommand)]
pub enum ExerciseCommand {
    /// List exercise templates
    List {
        /// Match name or muscle group name
        #[arg(short, long, default_value = "")]
        search: String,
        /// Muscle group id, or "all"
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Show one exercise template
    Show { id: String },
}

#[derive(Subcommand)]
pub enum WorkoutCommand {
    /// List workouts (falls back to the local cache when offline)
    List {
        #[arg(short, long, default_value = "")]
        search: String,
        /// newest, oldest or name
        #[arg(long, default_value = "newest")]
        sort: WorkoutSort,
        /// Only workouts on or after this date
        #[arg(long)]
        from: Option<String>,
        /// Only workouts on or before this date (default: today)
        #[arg(long)]
        to: Option<String>,
        /// Only workouts targeting this muscle group id
        #[arg(short, long)]
        group: Option<String>,
    },
    /// The four most recent workouts of the last month
    Recent,
    /// Show one workout with all sets
    Show { id: String },
    /// Create a workout
    New {
        name: String,
        /// YYYY-MM-DD or DD/MM/YYYY (default: today)
        #[arg(short, long, default_value = "")]
        date: String,
        /// Muscle group ids, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        groups: Vec<String>,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Rename a workout or change its notes
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a workout
    Delete { id: String },
    /// Copy a workout with all exercises and sets to another date
    Copy {
        id: String,
        /// Target date (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Add an exercise to a workout
    AddExercise {
        workout_id: String,
        /// Exercise template id or name
        exercise: String,
        /// Sets as REPSxWEIGHT, e.g. 8x60 (default: one set of 8)
        #[arg(short, long, value_delimiter = ',')]
        sets: Vec<String>,
    },
    /// Remove an exercise from a workout
    RemoveExercise { workout_id: String, exercise_id: String },
    /// Mark a set done or not done (sets are numbered from 1)
    Toggle {
        workout_id: String,
        exercise_id: String,
        set: usize,
    },
    /// Append a set copying the last one
    AddSet { workout_id: String, exercise_id: String },
    /// Remove a set (an exercise keeps at least one)
    RemoveSet {
        workout_id: String,
        exercise_id: String,
        set: usize,
    },
    /// Change the reps or weight of a set
    UpdateSet {
        workout_id: String,
        exercise_id: String,
        set: usize,
        #[arg(long)]
        reps: Option<u32>,
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Push workouts created while offline
    Sync,
    /// Export every logged set as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommand {
    /// List workout templates (demo split when none are available)
    List,
    /// Show a template with its sets
    Show { id: String },
    /// Create a template
    New {
        name: String,
        /// Split type (Push, Pull, Legs, Upper Body, Lower Body, Full Body, Cardio, Custom)
        #[arg(short = 't', long = "type", default_value = "Custom")]
        kind: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Muscle group ids, comma separated
        #[arg(short, long, value_delimiter = ',')]
        groups: Vec<String>,
        /// Exercises as ID or ID:REPSxWEIGHT/REPSxWEIGHT, e.g. bench-press:10x60/8x70
        #[arg(short, long = "exercise")]
        exercises: Vec<String>,
    },
    /// Start a workout from a template
    Use {
        id: String,
        /// Workout date (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print a default config file
    Init {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration
    Show,
}

struct App {
    session: Session,
    cache: WorkoutCache,
    notifier: ConsoleNotifier,
    format: OutputFormat,
}

impl App {
    fn client(&self) -> &ApiClient {
        self.session.client()
    }

    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let notifier = ConsoleNotifier::with_quiet(cli.quiet);

    let loaded = match &cli.config {
        Some(path) => Config::load_with_env(path),
        None => Config::load_default(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config);

    if let Err(e) = run(cli, config, notifier).await {
        notifier.notify(error_notice(&e));
        std::process::exit(1);
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("musclemetrics={}", config.logging.level)));
    let json = config.logging.format.eq_ignore_ascii_case("json");

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

/// The API error behind `err`, if there is one
fn client_error(err: &anyhow::Error) -> Option<&ClientError> {
    err.downcast_ref::<ClientError>().or_else(|| match err.downcast_ref::<EditorError>() {
        Some(EditorError::Client(inner)) => Some(inner),
        _ => None,
    })
}

fn error_notice(err: &anyhow::Error) -> Notice {
    match client_error(err) {
        Some(client_err) if client_err.category() == ErrorCategory::Auth => Notice::error(
            err.to_string(),
            format!("{} Run `musclemetrics login` to sign in.", client_err.user_message()),
        ),
        Some(client_err) => Notice::from_error(err.to_string(), client_err),
        None => Notice::error("Error", format!("{:#}", err)),
    }
}

async fn run(cli: Cli, config: Config, notifier: ConsoleNotifier) -> anyhow::Result<()> {
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.session.token_path()));
    let client = ApiClient::new(ClientConfig::from(&config.api), tokens)?;

    let mut app = App {
        session: Session::new(client),
        cache: WorkoutCache::new(config.cache.workouts_path()),
        notifier,
        format: cli.format,
    };

    match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            let user = app
                .session
                .login(&email, &password)
                .await
                .context("Login failed")?;
            let message = format!("Logged in as {}", user.username);
            app.notify(Notice::success("Welcome back", message));
        }

        Commands::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            let confirm_password = match confirm_password {
                Some(p) => p,
                None => prompt("Confirm password: ")?,
            };
            let form = RegistrationForm {
                username,
                email,
                password,
                confirm_password,
            };
            form.validate()?;

            let user = app
                .session
                .register(form.username.trim(), form.email.trim(), &form.password)
                .await
                .context("Registration failed")?;
            let message = format!("Account created for {}", user.username);
            app.notify(Notice::success("Welcome", message));
        }

        Commands::Logout => {
            app.session.logout().await?;
            app.notify(Notice::success("Logged out", ""));
        }

        Commands::Whoami => {
            let format = app.format;
            match app.session.restore().await.context("Failed to load profile")? {
                Some(user) => {
                    let mut out = std::io::stdout().lock();
                    write_detail(&mut out, format, user, |out| render::user_text(out, user))?;
                }
                None => println!("Not logged in"),
            }
        }

        Commands::Profile { action } => profile_command(&mut app, action).await?,

        Commands::MuscleGroups => {
            let groups = app.client().muscle_groups().await;
            if groups.is_fallback() {
                app.notify(Notice::warning(
                    "Offline",
                    "Using local muscle group data due to connection issues",
                ));
            }
            write_rows(&mut std::io::stdout().lock(), app.format, &groups.data, "No muscle groups found")?;
        }

        Commands::Exercises { action } => exercise_command(&app, action).await?,

        Commands::Workouts { action } => workout_command(&app, action).await?,

        Commands::Templates { action } => template_command(&app, action).await?,

        Commands::Progress { exercise, range } => progress_command(&app, exercise, range).await?,

        Commands::Ping => {
            let started = std::time::Instant::now();
            let response = app
                .client()
                .ping()
                .await
                .context("Backend is not reachable")?;
            let elapsed = started.elapsed();
            match app.format {
                OutputFormat::Table => {
                    println!("Backend: {}", app.client().config().base_url);
                    println!("Response time: {} ms", elapsed.as_millis());
                    println!("Response: {}", response);
                }
                _ => println!("{}", serde_json::to_string_pretty(&response)?),
            }
        }

        Commands::Config { action } => config_command(&action, &config)?,
    }

    Ok(())
}

fn config_command(action: &ConfigCommand, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigCommand::Init { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
        ConfigCommand::Show => {
            if let Some(path) = Config::default_path() {
                println!("# Default location: {:?}", path);
            }
            print!("{}", toml::to_string_pretty(config)?);
        }
    }
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn date_or_today(input: Option<&str>) -> anyhow::Result<NaiveDate> {
    match input {
        Some(s) if !s.trim().is_empty() => Ok(parse_date(s)?),
        _ => Ok(today()),
    }
}

/// Parse `REPS` or `REPSxWEIGHT`
fn parse_set(input: &str) -> anyhow::Result<(u32, f64)> {
    let input = input.trim().to_lowercase();
    let (reps, weight) = match input.split_once(['x', '@']) {
        Some((reps, weight)) => (reps.trim(), weight.trim().trim_end_matches("kg")),
        None => (input.as_str(), "0"),
    };
    let reps: u32 = reps
        .parse()
        .with_context(|| format!("Invalid reps in set '{}'", input))?;
    let weight: f64 = weight
        .parse()
        .with_context(|| format!("Invalid weight in set '{}'", input))?;
    Ok((reps, weight))
}

/// Find an exercise by id, or by name ignoring case
fn find_exercise<'a>(templates: &'a [ExerciseTemplate], key: &str) -> Option<&'a ExerciseTemplate> {
    templates
        .iter()
        .find(|t| t.id == key)
        .or_else(|| templates.iter().find(|t| t.name.eq_ignore_ascii_case(key)))
}

/// Display names for the groups an exercise targets, as the backend names them
fn muscle_group_names(template: &ExerciseTemplate, groups: &[MuscleGroup]) -> Vec<String> {
    template
        .muscle_groups
        .iter()
        .map(|tagged| {
            groups
                .iter()
                .find(|g| g.id == tagged.id)
                .unwrap_or(tagged)
                .name
                .clone()
        })
        .collect()
}

async fn profile_command(app: &mut App, action: ProfileCommand) -> anyhow::Result<()> {
    match action {
        ProfileCommand::Update {
            username,
            weight,
            height,
        } => {
            let current = app
                .session
                .restore()
                .await
                .context("Failed to load profile")?
                .cloned();
            let Some(current) = current else {
                bail!("Not logged in. Run `musclemetrics login` first.");
            };

            let form = ProfileForm {
                username: username.unwrap_or(current.username),
                weight: weight.or(current.weight),
                height: height.or(current.height),
            };
            let update = form.validate()?;
            let user = app
                .session
                .update_profile(&update)
                .await
                .context("Failed to update profile")?
                .clone();
            app.notify(Notice::success("Profile updated", "Your profile has been updated"));
            let mut out = std::io::stdout().lock();
            write_detail(&mut out, app.format, &user, |out| render::user_text(out, &user))?;
        }
        ProfileCommand::Password => {
            let form = ChangePasswordForm {
                current_password: prompt("Current password: ")?,
                new_password: prompt("New password: ")?,
                confirm_password: prompt("Confirm new password: ")?,
            };
            let request = form.validate()?;
            app.client()
                .change_password(&request.current_password, &request.new_password)
                .await
                .context("Failed to update password")?;
            app.notify(Notice::success("Success", "Your password has been updated"));
        }
    }
    Ok(())
}

async fn exercise_command(app: &App, action: ExerciseCommand) -> anyhow::Result<()> {
    match action {
        ExerciseCommand::List { search, group } => {
            let templates = app.client().exercise_templates().await;
            if templates.is_fallback() {
                app.notify(Notice::warning(
                    "Offline",
                    "Showing the built-in exercise catalog",
                ));
            }
            let rows: Vec<ExerciseRow> = workout::filter_exercises(&templates.data, &search, group.as_deref())
                .into_iter()
                .map(ExerciseRow::from)
                .collect();
            write_rows(&mut std::io::stdout().lock(), app.format, &rows, "No exercises found")?;
        }
        ExerciseCommand::Show { id } => {
            let template = app
                .client()
                .exercise_template(&id)
                .await
                .context("Failed to load exercise")?;
            let mut out = std::io::stdout().lock();
            write_detail(&mut out, app.format, &template, |out| {
                writeln!(out, "{}", template.name)?;
                if let Some(description) = &template.description {
                    writeln!(out, "{}", description)?;
                }
                let groups: Vec<_> = template.muscle_groups.iter().map(|g| g.name.as_str()).collect();
                writeln!(out, "Muscle groups: {}", groups.join(", "))?;
                writeln!(out, "Weighted: {}", if template.requires_weight { "yes" } else { "no" })?;
                writeln!(out, "ID: {}", template.id)
            })?;
        }
    }
    Ok(())
}

/// Workouts from the server, refreshing the cache, or the cache when the
/// server cannot be reached.
async fn load_workouts(app: &App) -> anyhow::Result<Vec<Workout>> {
    match app.client().workouts().await {
        Ok(workouts) => {
            if let Err(e) = app.cache.store(&workouts).await {
                tracing::warn!(error = %e, "Failed to update workout cache");
            }
            // Locally created workouts that have not been synced yet
            let pending = app.cache.pending().await.unwrap_or_default();
            let mut all = workouts;
            all.extend(pending.iter().map(|p| p.to_workout()));
            Ok(all)
        }
        // Auth failures are reported; anything else falls back to the cache
        Err(e) if e.category() != ErrorCategory::Auth => {
            let cached = app.cache.load().await.unwrap_or_else(|cache_err| {
                tracing::warn!(error = %cache_err, "Workout cache unreadable");
                Default::default()
            });
            let since = cached
                .saved_at
                .map(|t| format!(" from {}", t.with_timezone(&Local).format("%Y-%m-%d %H:%M")))
                .unwrap_or_default();
            app.notify(Notice::warning(
                "Using local data",
                format!("{} Showing cached workouts{}.", e.user_message(), since),
            ));
            Ok(cached.workouts)
        }
        Err(e) => Err(e).context("Failed to load workouts"),
    }
}

async fn workout_command(app: &App, action: WorkoutCommand) -> anyhow::Result<()> {
    let client = app.client();
    let mut out = std::io::stdout().lock();

    match action {
        WorkoutCommand::List {
            search,
            sort,
            from,
            to,
            group,
        } => {
            let workouts = match (&from, &group) {
                (Some(from), _) => {
                    let start = parse_date(from)?;
                    let end = date_or_today(to.as_deref())?;
                    client
                        .workouts_in_range(start, end)
                        .await
                        .context("Failed to load workouts")?
                }
                (None, Some(group)) => client
                    .workouts_by_muscle_group(group)
                    .await
                    .context("Failed to load workouts")?,
                (None, None) => load_workouts(app).await?,
            };

            let rows: Vec<WorkoutRow> = workout::filter_workouts(&workouts, &search, sort)
                .into_iter()
                .map(WorkoutRow::from)
                .collect();
            let empty = if search.is_empty() {
                "No workouts yet. Create one with `musclemetrics workouts new`."
            } else {
                "No workouts match your search"
            };
            write_rows(&mut out, app.format, &rows, empty)?;
        }

        WorkoutCommand::Recent => {
            let (start, end) = workout::recent_window(today());
            let workouts = client
                .workouts_in_range(start, end)
                .await
                .context("Failed to load recent workouts")?;
            let rows: Vec<WorkoutRow> = workout::recent_workouts(&workouts, workout::RECENT_LIMIT)
                .into_iter()
                .map(WorkoutRow::from)
                .collect();
            write_rows(&mut out, app.format, &rows, "No workouts in the last month")?;
        }

        WorkoutCommand::Show { id } => {
            let workout = if id.starts_with("local-") {
                app.cache
                    .load()
                    .await?
                    .workouts
                    .into_iter()
                    .find(|w| w.id == id)
                    .with_context(|| format!("No local workout {}", id))?
            } else {
                client.workout(&id).await.context("Failed to load workout")?
            };
            write_detail(&mut out, app.format, &workout, |out| render::workout_text(out, &workout))?;
        }

        WorkoutCommand::New {
            name,
            date,
            groups,
            notes,
        } => {
            let form = NewWorkoutForm {
                name,
                date,
                muscle_group_ids: groups,
                notes,
            };
            let request = form.validate(today())?;

            match client.create_workout(&request).await {
                Ok(created) => {
                    app.notify(Notice::success("Success", "Workout created successfully"));
                    write_detail(&mut out, app.format, &created, |out| render::workout_text(out, &created))?;
                }
                Err(e) if e.category() == ErrorCategory::Connection => {
                    let known = client.muscle_groups().await.data;
                    let local = app.cache.add_pending(request, &known).await?;
                    app.notify(Notice::warning(
                        "Saved locally",
                        "The server is unreachable. Run `musclemetrics workouts sync` when back online.",
                    ));
                    write_detail(&mut out, app.format, &local, |out| render::workout_text(out, &local))?;
                }
                Err(e) => return Err(e).context("Failed to create workout"),
            }
        }

        WorkoutCommand::Edit { id, name, notes } => {
            if name.is_none() && notes.is_none() {
                bail!("Nothing to change. Pass --name and/or --notes.");
            }
            let mut draft = WorkoutDraft::load(client, &id)
                .await
                .context("Failed to load workout")?;
            if let Some(name) = name {
                if name.trim().is_empty() {
                    bail!("Workout name cannot be empty");
                }
                draft.set_name(name.trim());
            }
            if let Some(notes) = notes {
                draft.set_notes(notes);
            }
            draft
                .save_details(client)
                .await
                .context("Failed to update workout")?;
            app.notify(Notice::success("Success", "Workout updated successfully"));
        }

        WorkoutCommand::Delete { id } => {
            client
                .delete_workout(&id)
                .await
                .context("Failed to delete workout")?;
            app.notify(Notice::success("Success", "Workout deleted successfully"));
        }

        WorkoutCommand::Copy { id, date } => {
            let date = date_or_today(date.as_deref())?;
            let copy = client
                .copy_workout(&id, date)
                .await
                .context("Failed to copy workout")?;
            app.notify(Notice::success(
                "Workout copied",
                format!("{} copied to {}", copy.name, date.format("%Y-%m-%d")),
            ));
            write_detail(&mut out, app.format, &copy, |out| render::workout_text(out, &copy))?;
        }

        WorkoutCommand::AddExercise {
            workout_id,
            exercise,
            sets,
        } => {
            // Independent lookups; each result is handled on its own
            let (templates, groups) = tokio::join!(client.exercise_templates(), client.muscle_groups());
            if templates.is_fallback() {
                app.notify(Notice::warning("Offline", "Using the built-in exercise catalog"));
            }

            let template = find_exercise(&templates.data, &exercise)
                .with_context(|| format!("Unknown exercise '{}'", exercise))?;

            let parsed = sets
                .iter()
                .map(|s| parse_set(s).map(|(reps, weight)| ExerciseSet::new(reps, weight)))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let draft = ExerciseDraft::new(template).with_sets(parsed);

            draft
                .submit(client, &workout_id)
                .await
                .context("Failed to add exercise")?;
            app.notify(Notice::success(
                "Exercise added",
                format!(
                    "{} ({}): {} sets, {:.0} kg volume",
                    template.name,
                    muscle_group_names(template, &groups.data).join(", "),
                    draft.sets().len(),
                    draft.volume()
                ),
            ));
        }

        WorkoutCommand::RemoveExercise {
            workout_id,
            exercise_id,
        } => {
            let mut draft = WorkoutDraft::load(client, &workout_id)
                .await
                .context("Failed to load workout")?;
            let removed = draft
                .remove_exercise(client, &exercise_id)
                .await
                .context("Failed to remove exercise")?;
            app.notify(Notice::success(
                "Success",
                format!("{} removed from workout", removed.exercise_template.name),
            ));
        }

        WorkoutCommand::Toggle {
            workout_id,
            exercise_id,
            set,
        } => {
            let mut draft = WorkoutDraft::load(client, &workout_id).await?;
            let completed = draft.toggle_set(&exercise_id, set_index(set)?)?;
            draft.save_exercise(client, &exercise_id).await?;
            let state = if completed { "done" } else { "not done" };
            app.notify(Notice::success("Exercise sets updated", format!("Set {} marked {}", set, state)));
        }

        WorkoutCommand::AddSet {
            workout_id,
            exercise_id,
        } => {
            let mut draft = WorkoutDraft::load(client, &workout_id).await?;
            let count = draft.add_set(&exercise_id)?;
            draft.save_exercise(client, &exercise_id).await?;
            app.notify(Notice::success("Exercise sets updated", format!("Exercise now has {} sets", count)));
        }

        WorkoutCommand::RemoveSet {
            workout_id,
            exercise_id,
            set,
        } => {
            let mut draft = WorkoutDraft::load(client, &workout_id).await?;
            draft.remove_set(&exercise_id, set_index(set)?)?;
            draft.save_exercise(client, &exercise_id).await?;
            app.notify(Notice::success("Exercise sets updated", format!("Set {} removed", set)));
        }

        WorkoutCommand::UpdateSet {
            workout_id,
            exercise_id,
            set,
            reps,
            weight,
        } => {
            if reps.is_none() && weight.is_none() {
                bail!("Nothing to change. Pass --reps and/or --weight.");
            }
            let index = set_index(set)?;
            let mut draft = WorkoutDraft::load(client, &workout_id).await?;
            if let Some(reps) = reps {
                draft.update_set(&exercise_id, index, SetField::Reps(reps))?;
            }
            if let Some(weight) = weight {
                draft.update_set(&exercise_id, index, SetField::Weight(weight))?;
            }
            draft.save_all(client).await?;
            app.notify(Notice::success("Exercise sets updated", format!("Set {} updated", set)));
        }

        WorkoutCommand::Sync => {
            let pending = app.cache.pending().await?.len();
            if pending == 0 {
                app.notify(Notice::info("Nothing to sync", "No workouts are waiting to be synced"));
                return Ok(());
            }
            let synced = app.cache.sync_pending(client).await?;
            if synced == pending {
                app.notify(Notice::success("Synced", format!("{} workout(s) saved to the server", synced)));
            } else {
                app.notify(Notice::warning(
                    "Partially synced",
                    format!("{} of {} workout(s) synced, the rest stay queued", synced, pending),
                ));
            }
        }

        WorkoutCommand::Export { output } => {
            let workouts = load_workouts(app).await?;
            let sorted = workout::filter_workouts(&workouts, "", WorkoutSort::Oldest);
            let rows = render::set_rows(&sorted);
            match output {
                Some(path) => {
                    let mut file = std::fs::File::create(&path)
                        .with_context(|| format!("Cannot create {:?}", path))?;
                    write_rows(&mut file, OutputFormat::Csv, &rows, "")?;
                    app.notify(Notice::success(
                        "Exported",
                        format!("{} sets written to {:?}", rows.len(), path),
                    ));
                }
                None => write_rows(&mut out, OutputFormat::Csv, &rows, "")?,
            }
        }
    }

    Ok(())
}

/// 1-based set number to index
fn set_index(set: usize) -> anyhow::Result<usize> {
    if set == 0 {
        bail!("Sets are numbered from 1");
    }
    Ok(set - 1)
}

async fn template_command(app: &App, action: TemplateCommand) -> anyhow::Result<()> {
    let client = app.client();
    let mut out = std::io::stdout().lock();

    match action {
        TemplateCommand::List => {
            let templates = client.workout_templates_or_demo().await;
            if templates.is_fallback() {
                app.notify(Notice::info(
                    "Using demo templates",
                    "No templates available from the server. Showing the 6-day push/pull/legs split.",
                ));
            }
            let rows: Vec<TemplateRow> = templates.data.iter().map(TemplateRow::from).collect();
            write_rows(&mut out, app.format, &rows, "No templates found")?;
        }

        TemplateCommand::Show { id } => {
            let template = match client.workout_template(&id).await {
                Ok(template) => template,
                Err(e) => fallback::demo_workout_templates()
                    .into_iter()
                    .find(|t| t.id == id)
                    .ok_or(e)
                    .context("Failed to load template")?,
            };
            write_detail(&mut out, app.format, &template, |out| render::template_text(out, &template))?;
        }

        TemplateCommand::New {
            name,
            kind,
            description,
            groups,
            exercises,
        } => {
            if !fallback::WORKOUT_TYPES.iter().any(|t| t.eq_ignore_ascii_case(&kind)) {
                tracing::warn!(kind = %kind, "Unrecognized template type");
            }

            let known: Vec<MuscleGroup> = {
                let mut all = client.muscle_groups().await.data;
                for group in fallback::template_muscle_groups() {
                    if !all.iter().any(|g| g.id == group.id) {
                        all.push(group);
                    }
                }
                all
            };

            let mut form = TemplateForm::new(name);
            form.kind = kind;
            form.description = description;
            for id in groups.iter().map(|g| g.trim()).filter(|g| !g.is_empty()) {
                let group = known
                    .iter()
                    .find(|g| g.id == id)
                    .cloned()
                    .unwrap_or_else(|| MuscleGroup::new(id, id));
                form.toggle_muscle_group(&group);
            }
            for entry in &exercises {
                let (exercise_id, sets) = match entry.split_once(':') {
                    Some((id, sets)) => (id.trim(), Some(sets)),
                    None => (entry.trim(), None),
                };
                let index = form.add_exercise(exercise_id);
                if let Some(sets) = sets {
                    let parsed = sets
                        .split('/')
                        .map(|s| parse_set(s).map(|(reps, weight)| PrototypeSet::new(reps, weight)))
                        .collect::<anyhow::Result<Vec<_>>>()?;
                    form.set_sets(index, parsed)?;
                }
            }

            let request = form.validate()?;
            let created = client
                .create_workout_template(&request)
                .await
                .context("Failed to save template")?;
            app.notify(Notice::success("Template saved", "Your workout template has been saved successfully."));
            write_detail(&mut out, app.format, &created, |out| render::template_text(out, &created))?;
        }

        TemplateCommand::Use { id, date } => {
            let date = date_or_today(date.as_deref())?;
            let workout = client
                .create_workout_from_template(&id, date)
                .await
                .context("Failed to create workout from template")?;
            app.notify(Notice::success(
                "Workout created",
                format!(
                    "Created {} for {} with {} exercises",
                    workout.name,
                    date.format("%Y-%m-%d"),
                    workout.exercises.len()
                ),
            ));
            write_detail(&mut out, app.format, &workout, |out| render::workout_text(out, &workout))?;
        }
    }

    Ok(())
}

async fn progress_command(app: &App, exercise: Option<String>, range: ProgressRange) -> anyhow::Result<()> {
    let client = app.client();
    let today = today();

    let (exercise_id, exercise_name) = match exercise {
        Some(key) => {
            let templates = client.exercise_templates().await;
            match find_exercise(&templates.data, &key) {
                Some(t) => (t.id.clone(), t.name.clone()),
                None => (key.clone(), key),
            }
        }
        None => {
            let start = ProgressRange::ThreeMonths.start_date(today);
            let recent = client
                .workouts_in_range(start, today)
                .await
                .context("Failed to load exercises")?;
            let Some(first) = workout::distinct_exercises(&recent).into_iter().next() else {
                app.notify(Notice::info(
                    "No exercises",
                    "Log some workouts to see your progress",
                ));
                return Ok(());
            };
            (first.id, first.name)
        }
    };

    let history = client
        .exercise_history(&exercise_id, Some(range.start_date(today)))
        .await
        .context("Failed to load volume history")?;
    let points = workout::volume_series(&history);

    let mut out = std::io::stdout().lock();
    if app.format == OutputFormat::Table {
        writeln!(out, "{} - volume over the last {}", exercise_name, range)?;
        writeln!(out)?;
    }
    write_rows(&mut out, app.format, &points, "No data available for this time period")?;

    if app.format == OutputFormat::Table {
        if let Some(change) = workout::volume_change_percent(&points) {
            writeln!(out)?;
            writeln!(out, "Change: {:+.1}%", change)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        assert_eq!(parse_set("8x60").unwrap(), (8, 60.0));
        assert_eq!(parse_set("10 x 22.5kg").unwrap(), (10, 22.5));
        assert_eq!(parse_set("12@40").unwrap(), (12, 40.0));
        assert_eq!(parse_set("15").unwrap(), (15, 0.0));
        assert!(parse_set("x60").is_err());
        assert!(parse_set("8xheavy").is_err());
    }

    #[test]
    fn test_set_index() {
        assert_eq!(set_index(1).unwrap(), 0);
        assert!(set_index(0).is_err());
    }

    #[test]
    fn test_find_exercise() {
        let catalog = fallback::exercise_templates();
        assert_eq!(find_exercise(&catalog, "squat").unwrap().name, "Squat");
        assert_eq!(find_exercise(&catalog, "bench press").unwrap().id, "bench-press");
        assert!(find_exercise(&catalog, "curl").is_none());
    }

    #[test]
    fn test_muscle_group_names() {
        let catalog = fallback::exercise_templates();
        let squat = find_exercise(&catalog, "squat").unwrap();
        let groups = vec![MuscleGroup::new("legs", "Lower Body"), MuscleGroup::new("chest", "Chest")];

        // Groups the server did not list keep their tagged name
        assert_eq!(muscle_group_names(squat, &groups), ["Lower Body", "Quadriceps"]);
        assert_eq!(muscle_group_names(squat, &[]), ["Legs", "Quadriceps"]);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "musclemetrics",
            "--format",
            "json",
            "workouts",
            "add-exercise",
            "w1",
            "squat",
            "--sets",
            "5x100,5x110",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Workouts {
                action: WorkoutCommand::AddExercise { sets, .. },
            } => assert_eq!(sets, ["5x100", "5x110"]),
            _ => panic!("wrong command"),
        }

        let cli = Cli::try_parse_from(["musclemetrics", "progress", "squat", "-r", "1y"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Progress {
                range: ProgressRange::OneYear,
                ..
            }
        ));
    }

    #[test]
    fn test_error_notice_for_auth() {
        let err = anyhow::Error::new(ClientError::from_status(401, "Token expired".into()))
            .context("Failed to load workouts");
        let notice = error_notice(&err);
        assert_eq!(notice.title, "Failed to load workouts");
        assert!(notice.description.contains("musclemetrics login"));
    }
}
