use serde::{Deserialize, Serialize};
use std::fmt;

/// Icon shown next to every result item.
pub const ICON: &str = "images/icon.png";

/// Kind of entry created in Joplin, selected by the invocation keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Note,
    Todo,
}

impl NoteType {
    /// Map a launcher keyword (`note` / `todo`) to its note type.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim();
        if keyword.eq_ignore_ascii_case("note") {
            Some(NoteType::Note)
        } else if keyword.eq_ignore_ascii_case("todo") {
            Some(NoteType::Todo)
        } else {
            None
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            NoteType::Note => "note",
            NoteType::Todo => "todo",
        }
    }

    pub fn is_todo(self) -> bool {
        self == NoteType::Todo
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Data attached to a result and handed back on selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Payload {
    CreateNote {
        text: String,
        #[serde(rename = "type")]
        note_type: NoteType,
        #[serde(rename = "notebookId")]
        notebook_id: String,
    },
    SetDefault {
        #[serde(rename = "type")]
        note_type: NoteType,
        #[serde(rename = "notebookId")]
        notebook_id: String,
    },
}

/// What the host does when a result is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OnEnter {
    HideWindow,
    Custom {
        data: Payload,
        #[serde(default)]
        keep_app_open: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub icon: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub on_enter: OnEnter,
}

impl ResultItem {
    /// Item that only dismisses the window, used for warnings and errors.
    pub fn notice(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            icon: ICON.into(),
            name: name.into(),
            description: Some(description.into()),
            on_enter: OnEnter::HideWindow,
        }
    }

    /// Item that hands `payload` back on selection and closes the window.
    pub fn with_payload(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            icon: ICON.into(),
            name: name.into(),
            description: None,
            on_enter: OnEnter::Custom {
                data: payload,
                keep_app_open: false,
            },
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn payload(&self) -> Option<&Payload> {
        match &self.on_enter {
            OnEnter::Custom { data, .. } => Some(data),
            OnEnter::HideWindow => None,
        }
    }
}

/// Reply to a host event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "response", rename_all = "snake_case")]
pub enum Response {
    /// The host shows nothing.
    #[serde(rename = "none")]
    Nothing,
    Render { items: Vec<ResultItem> },
    HideWindow,
}

impl Response {
    pub fn render(items: Vec<ResultItem>) -> Self {
        Response::Render { items }
    }

    pub fn items(&self) -> &[ResultItem] {
        match self {
            Response::Render { items } => items.as_slice(),
            _ => &[],
        }
    }
}
