#![allow(dead_code)]

use joplin_launcher::config::Config;
use joplin_launcher::joplin::{Listing, NewNote, Notebook, NotebookBackend};
use joplin_launcher::settings::{PreferenceId, PreferenceStore, Preferences};
use std::cell::{Cell, RefCell};

/// In-memory backend recording every call it receives.
pub struct FakeBackend {
    pub listing: Result<Listing, String>,
    pub fail_create: bool,
    pub list_calls: Cell<usize>,
    pub lookup_calls: Cell<usize>,
    pub created: RefCell<Vec<NewNote>>,
}

impl FakeBackend {
    pub fn with_notebooks(notebooks: Vec<Notebook>) -> Self {
        Self::with_listing(Ok(Listing::Notebooks(notebooks)))
    }

    pub fn with_listing(listing: Result<Listing, String>) -> Self {
        Self {
            listing,
            fail_create: false,
            list_calls: Cell::new(0),
            lookup_calls: Cell::new(0),
            created: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.list_calls.get() + self.lookup_calls.get() + self.created.borrow().len()
    }
}

impl NotebookBackend for FakeBackend {
    fn list_notebooks(&self, _config: &Config) -> anyhow::Result<Listing> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.listing.clone().map_err(anyhow::Error::msg)
    }

    fn notebook_by_id(&self, _config: &Config, id: &str) -> Option<Notebook> {
        self.lookup_calls.set(self.lookup_calls.get() + 1);
        match &self.listing {
            Ok(Listing::Notebooks(books)) => books.iter().find(|b| b.id == id).cloned(),
            _ => None,
        }
    }

    fn create_note(&self, _config: &Config, note: &NewNote) -> anyhow::Result<()> {
        self.created.borrow_mut().push(note.clone());
        if self.fail_create {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

/// Preference store keeping writes in memory.
#[derive(Default)]
pub struct MemoryStore {
    pub writes: Vec<(PreferenceId, String)>,
    pub fail: bool,
}

impl PreferenceStore for MemoryStore {
    fn persist(&mut self, id: PreferenceId, value: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("read-only");
        }
        self.writes.push((id, value.to_string()));
        Ok(())
    }

    fn load(&self) -> anyhow::Result<Preferences> {
        if self.fail {
            anyhow::bail!("read-only");
        }
        let mut prefs = Preferences::default();
        for (id, value) in &self.writes {
            prefs.set(*id, value);
        }
        Ok(prefs)
    }
}

pub fn notebook(id: &str, title: &str, note_count: u64) -> Notebook {
    Notebook {
        id: id.into(),
        title: title.into(),
        note_count,
    }
}

pub fn work_and_home() -> Vec<Notebook> {
    vec![notebook("1", "Work", 5), notebook("2", "Home", 9)]
}

pub fn configured() -> Config {
    Config {
        token: "secret".into(),
        ..Config::default()
    }
}
