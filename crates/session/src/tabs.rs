use serde::{Deserialize, Serialize};

/// An open workspace tab: either an editor bound to a file by id, or the
/// welcome screen. At most one tab is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Tab {
    Editor { file_id: String, active: bool },
    Welcome { active: bool },
}

impl Tab {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        match self {
            Self::Editor { active, .. } | Self::Welcome { active } => *active,
        }
    }

    /// File id for editor tabs, `None` for the welcome tab.
    #[must_use]
    pub fn file_id(&self) -> Option<&str> {
        match self {
            Self::Editor { file_id, .. } => Some(file_id),
            Self::Welcome { .. } => None,
        }
    }

    fn set_active(&mut self, value: bool) {
        match self {
            Self::Editor { active, .. } | Self::Welcome { active } => *active = value,
        }
    }
}

/// Which neighbor inherits activation when the active tab is closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CloseActivation {
    /// Activation transfers to the successor only when the closed tab had a
    /// neighbor on both sides; with a single neighbor no tab stays active.
    /// This reproduces the historical behavior; see `Nearest` for the
    /// corrected rule.
    #[default]
    Flanked,
    /// Activation transfers to the successor when one exists, otherwise to
    /// the predecessor.
    Nearest,
}

/// Ordered tab registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabsStore {
    pub tabs: Vec<Tab>,
    #[serde(skip, default)]
    pub close_activation: CloseActivation,
}

impl TabsStore {
    /// Appends the tab and immediately activates it, deactivating all others.
    pub fn add_tab(&mut self, tab: Tab) {
        self.tabs.push(tab);
        self.select_tab(self.tabs.len() - 1);
    }

    /// Reassigns every tab's active flag in one pass; only the tab at
    /// `index` ends up active.
    pub fn select_tab(&mut self, index: usize) {
        for (i, tab) in self.tabs.iter_mut().enumerate() {
            tab.set_active(i == index);
        }
    }

    /// Removes the tab at `index`. If it was active, activation transfers to
    /// a neighbor per the configured [`CloseActivation`] policy.
    pub fn close_tab(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        if self.tabs[index].is_active() {
            let has_predecessor = index > 0;
            let has_successor = index + 1 < self.tabs.len();
            match self.close_activation {
                CloseActivation::Flanked => {
                    if has_predecessor && has_successor {
                        self.tabs[index + 1].set_active(true);
                    }
                }
                CloseActivation::Nearest => {
                    if has_successor {
                        self.tabs[index + 1].set_active(true);
                    } else if has_predecessor {
                        self.tabs[index - 1].set_active(true);
                    }
                }
            }
        }
        self.tabs.remove(index);
        true
    }

    /// Opens an editor tab for `file_id` and activates it.
    pub fn open_file(&mut self, file_id: &str) {
        self.add_tab(Tab::Editor {
            file_id: file_id.to_string(),
            active: true,
        });
    }

    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.is_active())
    }

    #[must_use]
    pub fn active_tab_index(&self) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.is_active())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
