//! User-facing notices
//!
//! Short messages about the outcome of an operation, shown once and then
//! forgotten. The CLI prints them to stderr so they never mix with output
//! meant for piping.

use std::sync::Mutex;

use crate::client::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    fn icon(self) -> &'static str {
        match self {
            Level::Success => "✓",
            Level::Info => "ℹ",
            Level::Warning => "⚠",
            Level::Error => "✕",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(level: Level, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Success, title, description)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Info, title, description)
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Warning, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Error, title, description)
    }

    /// Error notice carrying the generic message for the error's category
    pub fn from_error(title: impl Into<String>, err: &ClientError) -> Self {
        Self::error(title, err.user_message())
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            write!(f, "{} {}", self.level.icon(), self.title)
        } else {
            write!(f, "{} {}: {}", self.level.icon(), self.title, self.description)
        }
    }
}

/// Receiver of notices
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `quiet`, only warnings and errors are printed
    pub fn with_quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        if self.quiet && matches!(notice.level, Level::Success | Level::Info) {
            return;
        }
        eprintln!("{}", notice);
    }
}

/// Keeps notices in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_uses_generic_messages() {
        let notice = Notice::from_error("Failed to load workouts", &ClientError::Timeout);
        assert_eq!(notice.level, Level::Error);
        assert_eq!(
            notice.description,
            "Could not connect to the server. Please check your connection."
        );

        let server = ClientError::from_status(502, "Bad Gateway".into());
        assert_eq!(
            Notice::from_error("Error", &server).description,
            "Server error - the backend may be experiencing issues"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Notice::success("Success", "Workout created successfully").to_string(),
            "✓ Success: Workout created successfully"
        );
        assert_eq!(Notice::warning("Offline", "").to_string(), "⚠ Offline");
    }

    #[test]
    fn test_console_quiet_setting_survives_copies() {
        let quiet = ConsoleNotifier::with_quiet(true);
        let handed_over = quiet;
        assert!(handed_over.is_quiet());
        assert!(!ConsoleNotifier::with_quiet(false).is_quiet());
        assert!(!ConsoleNotifier::new().is_quiet());
    }

    #[test]
    fn test_memory_notifier() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notice::info("Using demo templates", "No templates found"));
        notifier.notify(Notice::error("Error", "Failed to delete workout"));

        let notices = notifier.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].level, Level::Error);
    }
}
