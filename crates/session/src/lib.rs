//! Client-side session state for Ride Studio: the account, tab, file, and
//! node registries, the root aggregator that owns them, and the versioned
//! snapshot used to restore a session.
//!
//! Mutation is explicit: registry methods and the root-level wrappers are
//! the only way state changes, and the root emits a coarse
//! [`SessionEvent`] per touched registry. Derived values (`current_file`,
//! `default_account`, `console_env`, ...) are plain functions over current
//! state, recomputed on read.

#![cfg_attr(test, allow(clippy::expect_used))]

mod accounts;
mod error;
mod events;
mod files;
mod root;
mod settings;
mod snapshot;
mod tabs;

pub use accounts::{Account, AccountsStore, generate_account, generate_seed_phrase};
pub use error::{Result, SessionError};
pub use events::SessionEvent;
pub use files::{File, FileType, FilesStore, NewFile};
pub use root::RootStore;
pub use settings::{Node, SettingsStore};
pub use snapshot::{CURRENT_VERSION, SessionSnapshot, SnapshotError};
pub use tabs::{CloseActivation, Tab, TabsStore};
