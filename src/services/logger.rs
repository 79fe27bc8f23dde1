use crate::constants::env;
use crate::utils::redact::redact_text;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn from_env() -> Self {
        std::env::var(env::LOG_LEVEL)
            .map(|raw| Self::parse(&raw))
            .unwrap_or(LogLevel::Warn)
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            _ => LogLevel::Warn,
        }
    }

    fn rank(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
        }
    }

    fn allows(self, other: LogLevel) -> bool {
        other.rank() <= self.rank()
    }

    fn label(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Diagnostic logger writing to the process stderr. Lines relayed from the
/// remote command do not go through here.
#[derive(Debug, Clone)]
pub struct Logger {
    context: String,
    level: LogLevel,
    secrets: Arc<Vec<String>>,
}

impl Logger {
    pub fn new(context: &str) -> Self {
        Self {
            context: context.to_string(),
            level: LogLevel::from_env(),
            secrets: Arc::new(Vec::new()),
        }
    }

    pub fn child(&self, suffix: &str) -> Self {
        let context = if suffix.is_empty() {
            self.context.clone()
        } else {
            format!("{}:{}", self.context, suffix)
        };
        Self {
            context,
            level: self.level,
            secrets: self.secrets.clone(),
        }
    }

    /// Returns a logger that scrubs `secrets` from every message.
    pub fn with_secrets(&self, secrets: Vec<String>) -> Self {
        Self {
            context: self.context.clone(),
            level: self.level,
            secrets: Arc::new(secrets),
        }
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level.allows(level)
    }

    /// Formats a log line; `None` when the level is filtered out.
    pub fn render(
        &self,
        level: LogLevel,
        message: &str,
        meta: Option<&serde_json::Value>,
    ) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }
        let timestamp = chrono::Utc::now().to_rfc3339();
        let meta_suffix = meta
            .filter(|m| !m.is_null())
            .map(|m| format!(" {}", m))
            .unwrap_or_default();
        let line = format!(
            "[{}] {} [{}] {}{}",
            timestamp,
            level.label(),
            self.context,
            message,
            meta_suffix
        );
        Some(redact_text(&line, &self.secrets))
    }

    fn log(&self, level: LogLevel, message: &str, meta: Option<&serde_json::Value>) {
        if let Some(line) = self.render(level, message, meta) {
            eprintln!("{}", line);
        }
    }

    pub fn error(&self, message: &str, meta: Option<&serde_json::Value>) {
        self.log(LogLevel::Error, message, meta);
    }

    pub fn warn(&self, message: &str, meta: Option<&serde_json::Value>) {
        self.log(LogLevel::Warn, message, meta);
    }

    pub fn info(&self, message: &str, meta: Option<&serde_json::Value>) {
        self.log(LogLevel::Info, message, meta);
    }

    pub fn debug(&self, message: &str, meta: Option<&serde_json::Value>) {
        self.log(LogLevel::Debug, message, meta);
    }
}
