use crate::actions::NoteType;
use crate::settings::{PreferenceId, Preferences};

pub const DEFAULT_SERVER: &str = "http://localhost:41184";
pub const DEFAULT_LIMIT: usize = 10;

/// Live extension configuration, built from a preference snapshot and
/// updated in place as single preferences change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: String,
    pub token: String,
    /// Maximum number of ranked notebooks suggested per query.
    pub limit: usize,
    pub default_note_notebook: Option<String>,
    pub default_todo_notebook: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_preferences(&Preferences::default())
    }
}

impl Config {
    /// Initialise every field from `prefs`. An unparsable or missing limit
    /// falls back to [`DEFAULT_LIMIT`].
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            server: prefs
                .server
                .clone()
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            token: prefs.token.clone().unwrap_or_default(),
            limit: prefs
                .limit
                .as_deref()
                .and_then(parse_limit)
                .unwrap_or(DEFAULT_LIMIT),
            default_note_notebook: non_empty(prefs.default_note_notebook.as_deref()),
            default_todo_notebook: non_empty(prefs.default_todo_notebook.as_deref()),
        }
    }

    /// Apply a single preference change. A limit that does not parse leaves
    /// the current value untouched.
    pub fn apply_update(&mut self, id: PreferenceId, value: &str) {
        match id {
            PreferenceId::Limit => match parse_limit(value) {
                Some(n) => self.limit = n,
                None => tracing::debug!(value, "ignoring invalid limit"),
            },
            PreferenceId::Server => self.server = value.to_string(),
            PreferenceId::Token => self.token = value.to_string(),
            PreferenceId::DefaultNoteNotebook => self.default_note_notebook = non_empty(Some(value)),
            PreferenceId::DefaultTodoNotebook => self.default_todo_notebook = non_empty(Some(value)),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.server.is_empty() && !self.token.is_empty()
    }

    pub fn default_notebook(&self, note_type: NoteType) -> Option<&str> {
        match note_type {
            NoteType::Note => self.default_note_notebook.as_deref(),
            NoteType::Todo => self.default_todo_notebook.as_deref(),
        }
    }

    pub fn set_default_notebook(&mut self, note_type: NoteType, notebook_id: &str) {
        let slot = match note_type {
            NoteType::Note => &mut self.default_note_notebook,
            NoteType::Todo => &mut self.default_todo_notebook,
        };
        *slot = non_empty(Some(notebook_id));
    }
}

/// Preference id holding the default notebook for `note_type`.
pub fn default_notebook_pref(note_type: NoteType) -> PreferenceId {
    match note_type {
        NoteType::Note => PreferenceId::DefaultNoteNotebook,
        NoteType::Todo => PreferenceId::DefaultTodoNotebook,
    }
}

fn parse_limit(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
