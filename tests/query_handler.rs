mod common;

use common::{configured, notebook, work_and_home, FakeBackend};
use joplin_launcher::actions::{NoteType, OnEnter, Payload, Response};
use joplin_launcher::joplin::Listing;
use joplin_launcher::query::handle_query;

fn names(resp: &Response) -> Vec<&str> {
    resp.items().iter().map(|i| i.name.as_str()).collect()
}

fn create(text: &str, note_type: NoteType, id: &str) -> Payload {
    Payload::CreateNote {
        text: text.into(),
        note_type,
        notebook_id: id.into(),
    }
}

#[test]
fn ranks_notebooks_by_note_count() {
    let backend = FakeBackend::with_notebooks(work_and_home());
    let resp = handle_query(&configured(), &backend, NoteType::Note, Some("buy milk"));
    assert_eq!(
        names(&resp),
        ["Add note to notebook Home", "Add note to notebook Work"]
    );
    let payloads: Vec<_> = resp.items().iter().filter_map(|i| i.payload()).collect();
    assert_eq!(
        payloads,
        [
            &create("buy milk", NoteType::Note, "2"),
            &create("buy milk", NoteType::Note, "1"),
        ]
    );
    assert!(resp.items().iter().all(|i| matches!(
        i.on_enter,
        OnEnter::Custom {
            keep_app_open: false,
            ..
        }
    )));
}

#[test]
fn default_notebook_is_pinned_first_and_duplicated() {
    let backend = FakeBackend::with_notebooks(work_and_home());
    let mut cfg = configured();
    cfg.default_note_notebook = Some("1".into());
    let resp = handle_query(&cfg, &backend, NoteType::Note, Some("buy milk"));
    assert_eq!(
        names(&resp),
        [
            "Add note to DEFAULT: Work",
            "Add note to notebook Home",
            "Add note to notebook Work",
        ]
    );
    assert_eq!(
        resp.items()[0].payload(),
        Some(&create("buy milk", NoteType::Note, "1"))
    );
}

#[test]
fn default_slot_follows_keyword() {
    let backend = FakeBackend::with_notebooks(work_and_home());
    let mut cfg = configured();
    cfg.default_note_notebook = Some("1".into());
    let resp = handle_query(&cfg, &backend, NoteType::Todo, Some("call mom"));
    assert_eq!(
        names(&resp),
        ["Add todo to notebook Home", "Add todo to notebook Work"]
    );
    assert_eq!(backend.lookup_calls.get(), 0);
}

#[test]
fn unresolvable_default_is_skipped() {
    let backend = FakeBackend::with_notebooks(work_and_home());
    let mut cfg = configured();
    cfg.default_todo_notebook = Some("deleted".into());
    let resp = handle_query(&cfg, &backend, NoteType::Todo, Some("x"));
    assert_eq!(resp.items().len(), 2);
    assert_eq!(backend.lookup_calls.get(), 1);
}

#[test]
fn limit_caps_ranked_entries_but_not_default() {
    let books: Vec<_> = (0..15)
        .map(|i| notebook(&i.to_string(), &format!("NB{i}"), i))
        .collect();
    let backend = FakeBackend::with_notebooks(books);
    let mut cfg = configured();
    cfg.limit = 3;
    cfg.default_note_notebook = Some("0".into());
    let resp = handle_query(&cfg, &backend, NoteType::Note, Some("x"));
    assert_eq!(
        names(&resp),
        [
            "Add note to DEFAULT: NB0",
            "Add note to notebook NB14",
            "Add note to notebook NB13",
            "Add note to notebook NB12",
        ]
    );
}

#[test]
fn empty_argument_renders_nothing() {
    let backend = FakeBackend::with_notebooks(work_and_home());
    assert_eq!(
        handle_query(&configured(), &backend, NoteType::Note, None),
        Response::Nothing
    );
    assert_eq!(
        handle_query(&configured(), &backend, NoteType::Note, Some("  ")),
        Response::Nothing
    );
    assert_eq!(backend.calls(), 0);
}

#[test]
fn missing_configuration_makes_no_backend_calls() {
    let backend = FakeBackend::with_notebooks(work_and_home());
    let mut no_token = configured();
    no_token.token.clear();
    let mut no_server = configured();
    no_server.server.clear();

    for cfg in [&no_token, &no_server] {
        for arg in ["buy milk", "config", " CONFIG "] {
            let resp = handle_query(cfg, &backend, NoteType::Note, Some(arg));
            assert_eq!(names(&resp), ["⚠ Configuration Required"]);
            assert_eq!(resp.items()[0].on_enter, OnEnter::HideWindow);
        }
    }
    assert_eq!(backend.calls(), 0);
}

#[test]
fn backend_error_is_rendered_with_its_text() {
    let backend = FakeBackend::with_listing(Err("connection refused".into()));
    let resp = handle_query(&configured(), &backend, NoteType::Note, Some("x"));
    assert_eq!(names(&resp), ["⚠ Error Connecting to Joplin"]);
    let desc = resp.items()[0].description.as_deref().unwrap();
    assert!(desc.contains("connection refused"), "{desc}");
    assert!(resp.items()[0].payload().is_none());
}

#[test]
fn empty_catalog_shows_guidance() {
    let backend = FakeBackend::with_notebooks(Vec::new());
    for arg in ["buy milk", "config"] {
        let resp = handle_query(&configured(), &backend, NoteType::Todo, Some(arg));
        assert_eq!(names(&resp), ["⚠ No Notebooks in Joplin"]);
        assert!(resp.items()[0].payload().is_none());
    }
}

#[test]
fn malformed_listing_reports_shape() {
    let backend = FakeBackend::with_listing(Ok(Listing::Malformed {
        shape: "string".into(),
        len: 0,
    }));
    let resp = handle_query(&configured(), &backend, NoteType::Note, Some("x"));
    assert_eq!(names(&resp), ["⚠ No Notebooks Found"]);
    assert!(resp.items()[0]
        .description
        .as_deref()
        .unwrap()
        .starts_with("Response type: string, Length: 0."));
}

#[test]
fn config_mode_lists_everything_and_marks_default() {
    let books: Vec<_> = (0..15)
        .map(|i| notebook(&i.to_string(), &format!("NB{i}"), i))
        .collect();
    let backend = FakeBackend::with_notebooks(books);
    let mut cfg = configured();
    cfg.limit = 2;
    cfg.default_todo_notebook = Some("13".into());
    cfg.default_note_notebook = Some("14".into());

    let resp = handle_query(&cfg, &backend, NoteType::Todo, Some(" Config "));
    let items = resp.items();
    assert_eq!(items.len(), 15);
    assert_eq!(items[0].name, "Set as default todo notebook: NB14");
    assert_eq!(items[1].name, "★ Set as default todo notebook: NB13");
    assert_eq!(items[1].description.as_deref(), Some("Notebook ID: 13"));
    assert_eq!(
        items[1].payload(),
        Some(&Payload::SetDefault {
            note_type: NoteType::Todo,
            notebook_id: "13".into(),
        })
    );
    assert_eq!(items.iter().filter(|i| i.name.starts_with('★')).count(), 1);
    assert_eq!(backend.lookup_calls.get(), 0);
}
