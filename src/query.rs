use crate::actions::{NoteType, Payload, Response, ResultItem};
use crate::config::Config;
use crate::joplin::{Listing, Notebook, NotebookBackend};

/// Argument that switches a keyword into default-notebook selection.
pub const CONFIG_ARGUMENT: &str = "config";
/// Prefix marking the current default in config mode.
pub const DEFAULT_MARKER: &str = "★ ";

/// Build the result list for `keyword argument`.
pub fn handle_query<B: NotebookBackend + ?Sized>(
    config: &Config,
    backend: &B,
    note_type: NoteType,
    argument: Option<&str>,
) -> Response {
    let Some(argument) = argument.filter(|a| !a.trim().is_empty()) else {
        return Response::Nothing;
    };

    if argument.trim().eq_ignore_ascii_case(CONFIG_ARGUMENT) {
        return config_listing(config, backend, note_type);
    }

    let notebooks = match fetch_ranked(config, backend) {
        Ok(notebooks) => notebooks,
        Err(item) => return Response::render(vec![item]),
    };

    let mut items = Vec::with_capacity(config.limit + 1);
    if let Some(default) = config
        .default_notebook(note_type)
        .and_then(|id| backend.notebook_by_id(config, id))
    {
        items.push(ResultItem::with_payload(
            format!("Add {note_type} to DEFAULT: {}", default.title),
            create_payload(argument, note_type, &default),
        ));
    }
    items.extend(notebooks.iter().take(config.limit).map(|nb| {
        ResultItem::with_payload(
            format!("Add {note_type} to notebook {}", nb.title),
            create_payload(argument, note_type, nb),
        )
    }));
    Response::render(items)
}

/// List every notebook so the user can pick a new default for `note_type`.
fn config_listing<B: NotebookBackend + ?Sized>(
    config: &Config,
    backend: &B,
    note_type: NoteType,
) -> Response {
    let notebooks = match fetch_ranked(config, backend) {
        Ok(notebooks) => notebooks,
        Err(item) => return Response::render(vec![item]),
    };
    let current = config.default_notebook(note_type);
    let items = notebooks
        .into_iter()
        .map(|nb| {
            let marker = if current == Some(nb.id.as_str()) {
                DEFAULT_MARKER
            } else {
                ""
            };
            ResultItem::with_payload(
                format!("{marker}Set as default {note_type} notebook: {}", nb.title),
                Payload::SetDefault {
                    note_type,
                    notebook_id: nb.id.clone(),
                },
            )
            .described(format!("Notebook ID: {}", nb.id))
        })
        .collect();
    Response::render(items)
}

/// Fetch and rank notebooks, or produce the single item explaining why not.
fn fetch_ranked<B: NotebookBackend + ?Sized>(
    config: &Config,
    backend: &B,
) -> Result<Vec<Notebook>, ResultItem> {
    if !config.is_configured() {
        return Err(ResultItem::notice(
            "⚠ Configuration Required",
            "Please configure Joplin server address and API token in extension settings",
        ));
    }
    match backend.list_notebooks(config) {
        Err(e) => {
            tracing::warn!("failed to list notebooks: {e:#}");
            Err(ResultItem::notice(
                "⚠ Error Connecting to Joplin",
                format!("Error: {e:#}. Check server address and API token."),
            ))
        }
        Ok(Listing::Malformed { shape, len }) => {
            tracing::warn!(%shape, len, "unexpected /folders response");
            Err(ResultItem::notice(
                "⚠ No Notebooks Found",
                format!(
                    "Response type: {shape}, Length: {len}. Is Joplin running with Web Clipper enabled?"
                ),
            ))
        }
        Ok(Listing::Notebooks(notebooks)) if notebooks.is_empty() => Err(ResultItem::notice(
            "⚠ No Notebooks in Joplin",
            "Joplin has no notebooks. Create at least one notebook in Joplin first.",
        )),
        Ok(Listing::Notebooks(mut notebooks)) => {
            rank_notebooks(&mut notebooks);
            Ok(notebooks)
        }
    }
}

/// Order by note count, busiest first. Ties keep the backend's order.
pub fn rank_notebooks(notebooks: &mut [Notebook]) {
    notebooks.sort_by(|a, b| b.note_count.cmp(&a.note_count));
}

fn create_payload(text: &str, note_type: NoteType, notebook: &Notebook) -> Payload {
    Payload::CreateNote {
        text: text.to_string(),
        note_type,
        notebook_id: notebook.id.clone(),
    }
}
