use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable overriding the preference file location.
pub const PREFS_ENV: &str = "JOPLIN_LAUNCHER_PREFS";

/// Preferences as the host stores them: every value is a raw string and any
/// of them may be missing.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Base URL of the Joplin Web Clipper service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Number of notebooks suggested. Parsed as an integer by [`crate::config::Config`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_note_notebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_todo_notebook: Option<String>,
}

impl Preferences {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse preferences at {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write preferences to {}", path.display()))?;
        Ok(())
    }

    pub fn get(&self, id: PreferenceId) -> Option<&str> {
        match id {
            PreferenceId::Server => self.server.as_deref(),
            PreferenceId::Token => self.token.as_deref(),
            PreferenceId::Limit => self.limit.as_deref(),
            PreferenceId::DefaultNoteNotebook => self.default_note_notebook.as_deref(),
            PreferenceId::DefaultTodoNotebook => self.default_todo_notebook.as_deref(),
        }
    }

    pub fn set(&mut self, id: PreferenceId, value: &str) {
        let slot = match id {
            PreferenceId::Server => &mut self.server,
            PreferenceId::Token => &mut self.token,
            PreferenceId::Limit => &mut self.limit,
            PreferenceId::DefaultNoteNotebook => &mut self.default_note_notebook,
            PreferenceId::DefaultTodoNotebook => &mut self.default_todo_notebook,
        };
        *slot = Some(value.to_string());
    }

    /// Fill default-notebook slots this snapshot leaves unset or empty with
    /// the values from `stored`.
    pub fn fill_missing_defaults(&mut self, stored: &Preferences) {
        for id in [
            PreferenceId::DefaultNoteNotebook,
            PreferenceId::DefaultTodoNotebook,
        ] {
            if self.get(id).is_some_and(|v| !v.is_empty()) {
                continue;
            }
            if let Some(value) = stored.get(id).filter(|v| !v.is_empty()) {
                self.set(id, value);
            }
        }
    }
}

/// Identifier of a single preference as used in change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceId {
    Server,
    Token,
    Limit,
    DefaultNoteNotebook,
    DefaultTodoNotebook,
}

impl PreferenceId {
    pub fn key(self) -> &'static str {
        match self {
            PreferenceId::Server => "server",
            PreferenceId::Token => "token",
            PreferenceId::Limit => "limit",
            PreferenceId::DefaultNoteNotebook => "default_note_notebook",
            PreferenceId::DefaultTodoNotebook => "default_todo_notebook",
        }
    }
}

impl FromStr for PreferenceId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "server" => Ok(PreferenceId::Server),
            "token" => Ok(PreferenceId::Token),
            "limit" => Ok(PreferenceId::Limit),
            "default_note_notebook" => Ok(PreferenceId::DefaultNoteNotebook),
            "default_todo_notebook" => Ok(PreferenceId::DefaultTodoNotebook),
            other => anyhow::bail!("unknown preference id `{other}`"),
        }
    }
}

/// Durable storage for preferences changed from inside the extension.
pub trait PreferenceStore {
    fn persist(&mut self, id: PreferenceId, value: &str) -> anyhow::Result<()>;
    /// Everything persisted so far.
    fn load(&self) -> anyhow::Result<Preferences>;
}

/// Stores preferences in a JSON file, rewriting it on every change.
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn persist(&mut self, id: PreferenceId, value: &str) -> anyhow::Result<()> {
        let mut prefs = Preferences::load(&self.path)?;
        prefs.set(id, value);
        prefs.save(&self.path)
    }

    fn load(&self) -> anyhow::Result<Preferences> {
        Preferences::load(&self.path)
    }
}

/// Resolve the preference file: explicit path, then [`PREFS_ENV`], then the
/// platform config directory.
pub fn preferences_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Some(path) = std::env::var_os(PREFS_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("joplin_launcher")
        .join("preferences.json")
}
