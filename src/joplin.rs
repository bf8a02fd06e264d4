//! Client for the Joplin Web Clipper REST API.
//!
//! Only the three calls the launcher needs are implemented: list folders,
//! fetch one folder and create a note. Every request carries the API token
//! as the `token` query parameter and gives up after [`REQUEST_TIMEOUT`].

use crate::config::Config;
use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// A Joplin folder ("notebook").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub note_count: u64,
}

/// Body of `POST /notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub is_todo: bool,
    pub parent_id: String,
}

/// Outcome of a successful `GET /folders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Notebooks(Vec<Notebook>),
    /// The body was neither an array nor an object with an `items` array.
    Malformed { shape: String, len: usize },
}

/// The backend operations the query and selection handlers rely on.
pub trait NotebookBackend {
    /// List all notebooks. Fails on transport errors and non-2xx statuses.
    fn list_notebooks(&self, config: &Config) -> Result<Listing>;
    /// Look up one notebook, returning `None` on any failure.
    fn notebook_by_id(&self, config: &Config, id: &str) -> Option<Notebook>;
    fn create_note(&self, config: &Config, note: &NewNote) -> Result<()>;
}

pub struct JoplinClient {
    client: Client,
}

impl JoplinClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("joplin-launcher")
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl NotebookBackend for JoplinClient {
    fn list_notebooks(&self, config: &Config) -> Result<Listing> {
        let url = endpoint(config, &["folders"])?;
        let body: Value = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json()
            .context("invalid JSON from /folders")?;
        parse_listing(body)
    }

    fn notebook_by_id(&self, config: &Config, id: &str) -> Option<Notebook> {
        if id.is_empty() {
            return None;
        }
        let fetch = || -> Result<Notebook> {
            let url = endpoint(config, &["folders", id])?;
            Ok(self.client.get(url).send()?.error_for_status()?.json()?)
        };
        match fetch() {
            Ok(notebook) => Some(notebook),
            Err(e) => {
                tracing::debug!(id, "could not resolve notebook: {e:#}");
                None
            }
        }
    }

    fn create_note(&self, config: &Config, note: &NewNote) -> Result<()> {
        let url = endpoint(config, &["notes"])?;
        self.client.post(url).json(note).send()?.error_for_status()?;
        Ok(())
    }
}

/// Build `{server}/{segments..}?token={token}`, keeping any path prefix the
/// server URL already has.
pub fn endpoint(config: &Config, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(config.server.trim())
        .with_context(|| format!("invalid server address `{}`", config.server))?;
    {
        let mut path = match url.path_segments_mut() {
            Ok(path) => path,
            Err(()) => bail!("server address `{}` cannot be a base URL", config.server),
        };
        path.pop_if_empty().extend(segments);
    }
    url.query_pairs_mut().append_pair("token", &config.token);
    Ok(url)
}

/// Accept either a bare array of folders or an envelope `{"items": [...]}`.
pub fn parse_listing(body: Value) -> Result<Listing> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items,
            _ => {
                return Ok(Listing::Malformed {
                    shape: "object".into(),
                    len: map.len(),
                })
            }
        },
        other => {
            return Ok(Listing::Malformed {
                shape: json_type_name(&other).into(),
                len: 0,
            })
        }
    };
    let notebooks = items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<std::result::Result<Vec<Notebook>, _>>()
        .context("unexpected folder entry")?;
    Ok(Listing::Notebooks(notebooks))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            json_type_name(&other)
        ))),
    }
}
