use crate::actions::{Payload, Response};
use crate::config::{default_notebook_pref, Config};
use crate::joplin::{NewNote, NotebookBackend};
use crate::settings::PreferenceStore;

/// Perform the side effect attached to a chosen result.
///
/// Setting a default updates `config` before returning so the next query
/// already sees it; the preference store is written in the same step.
/// Failures are logged only, the window closes regardless.
pub fn handle_selection<B, S>(
    config: &mut Config,
    backend: &B,
    store: &mut S,
    payload: Payload,
) -> Response
where
    B: NotebookBackend + ?Sized,
    S: PreferenceStore + ?Sized,
{
    match payload {
        Payload::SetDefault {
            note_type,
            notebook_id,
        } => {
            config.set_default_notebook(note_type, &notebook_id);
            let pref = default_notebook_pref(note_type);
            tracing::info!(pref = pref.key(), %notebook_id, "default notebook changed");
            if let Err(e) = store.persist(pref, &notebook_id) {
                tracing::warn!("failed to persist default notebook: {e:#}");
            }
            Response::HideWindow
        }
        Payload::CreateNote {
            text,
            note_type,
            notebook_id,
        } => {
            let note = NewNote {
                title: text,
                is_todo: note_type.is_todo(),
                parent_id: notebook_id,
            };
            if let Err(e) = backend.create_note(config, &note) {
                tracing::warn!(%note_type, parent = %note.parent_id, "failed to create note: {e:#}");
            }
            Response::Nothing
        }
    }
}
