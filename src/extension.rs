use crate::actions::{NoteType, Payload, Response};
use crate::config::Config;
use crate::joplin::NotebookBackend;
use crate::query::handle_query;
use crate::selection::handle_selection;
use crate::settings::{PreferenceId, PreferenceStore, Preferences};
use serde::Deserialize;
use std::ops::ControlFlow;

/// Events delivered by the launcher host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Query {
        keyword: String,
        #[serde(default)]
        argument: Option<String>,
    },
    ItemEnter {
        payload: Payload,
    },
    Preferences {
        preferences: Preferences,
    },
    PreferencesUpdate {
        id: String,
        new_value: String,
    },
    SystemExit,
}

/// Keywords the extension registers with the host.
pub const KEYWORDS: [NoteType; 2] = [NoteType::Note, NoteType::Todo];

/// The Joplin extension: owns the live configuration and dispatches host
/// events to the query and selection handlers.
pub struct Extension<B, S> {
    config: Config,
    backend: B,
    store: S,
}

impl<B: NotebookBackend, S: PreferenceStore> Extension<B, S> {
    pub fn new(config: Config, backend: B, store: S) -> Self {
        Self {
            config,
            backend,
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one event. `Break` means the host asked the extension to exit.
    pub fn handle(&mut self, event: Event) -> ControlFlow<(), Response> {
        let response = match event {
            Event::Query { keyword, argument } => match NoteType::from_keyword(&keyword) {
                Some(note_type) => {
                    handle_query(&self.config, &self.backend, note_type, argument.as_deref())
                }
                None => {
                    tracing::warn!(%keyword, "query for unknown keyword");
                    Response::Nothing
                }
            },
            Event::ItemEnter { payload } => {
                handle_selection(&mut self.config, &self.backend, &mut self.store, payload)
            }
            Event::Preferences { mut preferences } => {
                match self.store.load() {
                    Ok(stored) => preferences.fill_missing_defaults(&stored),
                    Err(e) => tracing::warn!("could not read stored preferences: {e:#}"),
                }
                self.config = Config::from_preferences(&preferences);
                tracing::debug!(limit = self.config.limit, "preferences loaded");
                Response::Nothing
            }
            Event::PreferencesUpdate { id, new_value } => {
                match id.parse::<PreferenceId>() {
                    Ok(id) => self.config.apply_update(id, &new_value),
                    Err(e) => tracing::debug!("ignoring preference update: {e}"),
                }
                Response::Nothing
            }
            Event::SystemExit => return ControlFlow::Break(()),
        };
        ControlFlow::Continue(response)
    }
}
