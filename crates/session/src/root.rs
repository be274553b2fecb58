use std::sync::mpsc::Receiver;

use chrono::Utc;
use tracing::debug;

use crate::accounts::{Account, AccountsStore};
use crate::error::Result;
use crate::events::{SessionEvent, Subscribers};
use crate::files::{File, FileType, FilesStore, NewFile};
use crate::settings::{Node, SettingsStore};
use crate::snapshot::{CURRENT_VERSION, SessionSnapshot};
use crate::tabs::{Tab, TabsStore};

/// Owns the four registries for one application session. Mutations go
/// through the methods here, which emit a [`SessionEvent`] per touched
/// registry; reads go straight to the public registry fields and the
/// derived helpers, which are plain functions over current state.
#[derive(Debug)]
pub struct RootStore {
    pub accounts: AccountsStore,
    pub tabs: TabsStore,
    pub files: FilesStore,
    pub settings: SettingsStore,
    subscribers: Subscribers,
}

impl RootStore {
    /// Fresh session with stock registries: one generated account, no tabs,
    /// no files, the stock nodes.
    pub fn new() -> Result<Self> {
        Self::from_snapshot(SessionSnapshot::empty())
    }

    /// Restores a session from a persisted snapshot. The snapshot is
    /// migrated to the current schema first; absent slices seed stock
    /// defaults.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self> {
        let snapshot = snapshot.migrate()?;
        let accounts = match snapshot.accounts_store {
            Some(accounts) => accounts,
            None => AccountsStore::stock()?,
        };
        Ok(Self {
            accounts,
            tabs: snapshot.tabs_store.unwrap_or_default(),
            files: snapshot.files_store.unwrap_or_default(),
            settings: snapshot.settings_store.unwrap_or_else(SettingsStore::stock),
            subscribers: Subscribers::default(),
        })
    }

    /// Serializable view of the current session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: CURRENT_VERSION.to_string(),
            saved_at: Some(Utc::now().to_rfc3339()),
            accounts_store: Some(self.accounts.clone()),
            tabs_store: Some(self.tabs.clone()),
            files_store: Some(self.files.clone()),
            settings_store: Some(self.settings.clone()),
        }
    }

    /// Registers a change listener. Events arrive on the returned channel
    /// until the receiver is dropped.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        self.subscribers.subscribe()
    }

    // --- accounts ---

    pub fn add_account(&mut self, account: Account) {
        self.accounts.add(account);
        self.subscribers.emit(SessionEvent::AccountsChanged);
    }

    pub fn set_default_account(&mut self, index: usize) {
        self.accounts.set_default(index);
        self.subscribers.emit(SessionEvent::AccountsChanged);
    }

    pub fn delete_account(&mut self, index: usize) {
        if self.accounts.remove(index) {
            self.subscribers.emit(SessionEvent::AccountsChanged);
        }
    }

    pub fn set_account_label(&mut self, index: usize, label: &str) {
        if self.accounts.set_label(index, label) {
            self.subscribers.emit(SessionEvent::AccountsChanged);
        }
    }

    pub fn set_account_seed(&mut self, index: usize, seed: &str) {
        if self.accounts.set_seed(index, seed) {
            self.subscribers.emit(SessionEvent::AccountsChanged);
        }
    }

    // --- tabs ---

    pub fn add_tab(&mut self, tab: Tab) {
        self.tabs.add_tab(tab);
        self.subscribers.emit(SessionEvent::TabsChanged);
    }

    pub fn select_tab(&mut self, index: usize) {
        self.tabs.select_tab(index);
        self.subscribers.emit(SessionEvent::TabsChanged);
    }

    pub fn close_tab(&mut self, index: usize) {
        if self.tabs.close_tab(index) {
            self.subscribers.emit(SessionEvent::TabsChanged);
        }
    }

    /// Opens an editor tab for `file_id` and activates it.
    pub fn open_file(&mut self, file_id: &str) {
        self.tabs.open_file(file_id);
        self.subscribers.emit(SessionEvent::TabsChanged);
    }

    // --- files ---

    /// Creates a file and returns the created record.
    pub fn create_file(&mut self, file_type: FileType, new_file: NewFile) -> File {
        let file = self.files.create(file_type, new_file);
        self.subscribers.emit(SessionEvent::FilesChanged);
        file
    }

    /// Removes the file with `id`. When the active tab is an editor tab for
    /// this file, that tab is closed as well so no open editor points at a
    /// deleted file.
    pub fn delete_file(&mut self, id: &str) {
        let removed = self.files.remove(id).is_some();

        let active_references = self
            .tabs
            .active_tab()
            .and_then(Tab::file_id)
            .is_some_and(|file_id| file_id == id);
        if active_references && let Some(index) = self.tabs.active_tab_index() {
            debug!(file_id = %id, "closing editor tab for deleted file");
            self.tabs.close_tab(index);
            self.subscribers.emit(SessionEvent::TabsChanged);
        }

        if removed {
            self.subscribers.emit(SessionEvent::FilesChanged);
        }
    }

    pub fn change_file_content(&mut self, id: &str, content: &str) {
        if self.files.change_content(id, content) {
            self.subscribers.emit(SessionEvent::FilesChanged);
        }
    }

    pub fn rename_file(&mut self, id: &str, name: &str) {
        if self.files.rename(id, name) {
            self.subscribers.emit(SessionEvent::FilesChanged);
        }
    }

    /// The file behind the active editor tab, or `None` when no tab is
    /// active, the welcome tab is active, or the reference dangles.
    #[must_use]
    pub fn current_file(&self) -> Option<&File> {
        let file_id = self.tabs.active_tab()?.file_id()?;
        self.files.file_by_id(file_id)
    }

    // --- settings ---

    pub fn add_node(&mut self, node: Node) {
        self.settings.add_node(node);
        self.subscribers.emit(SessionEvent::SettingsChanged);
    }

    pub fn delete_node(&mut self, index: usize) {
        if self.settings.remove_node(index) {
            self.subscribers.emit(SessionEvent::SettingsChanged);
        }
    }

    pub fn set_default_node(&mut self, index: usize) {
        self.settings.set_default_node(index);
        self.subscribers.emit(SessionEvent::SettingsChanged);
    }
}
