use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of editable artifact. The wire name doubles as the prefix for
/// auto-generated file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "assetScript")]
    AssetScript,
    #[serde(rename = "accountScript")]
    AccountScript,
    #[serde(rename = "test")]
    Test,
}

impl FileType {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::AssetScript => "assetScript",
            Self::AccountScript => "accountScript",
            Self::Test => "test",
        }
    }
}

/// An editable script or test artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub name: String,
    pub content: String,
}

/// Input for [`FilesStore::create`]. Absent id and name are auto-filled.
#[derive(Debug, Clone, Default)]
pub struct NewFile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub content: String,
}

impl NewFile {
    #[must_use]
    pub fn with_content(content: &str) -> Self {
        Self {
            id: None,
            name: None,
            content: content.to_string(),
        }
    }
}

/// Ordered file registry keyed by generated id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesStore {
    pub files: Vec<File>,
}

impl FilesStore {
    #[must_use]
    pub fn file_by_id(&self, id: &str) -> Option<&File> {
        self.files.iter().find(|file| file.id == id)
    }

    /// Appends a new file, filling in a fresh uuid and an auto-generated
    /// name unless the caller supplied them. Returns the created record.
    pub fn create(&mut self, file_type: FileType, new_file: NewFile) -> File {
        let file = File {
            id: new_file.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            file_type,
            name: new_file
                .name
                .unwrap_or_else(|| self.generate_name(file_type)),
            content: new_file.content,
        };
        self.files.push(file.clone());
        file
    }

    /// Removes the file with `id`, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<File> {
        let index = self.files.iter().position(|file| file.id == id)?;
        Some(self.files.remove(index))
    }

    /// In-place content update; no-op when `id` is absent.
    pub fn change_content(&mut self, id: &str, content: &str) -> bool {
        let Some(file) = self.files.iter_mut().find(|file| file.id == id) else {
            return false;
        };
        file.content = content.to_string();
        true
    }

    /// In-place rename; no-op when `id` is absent.
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let Some(file) = self.files.iter_mut().find(|file| file.id == id) else {
            return false;
        };
        file.name = name.to_string();
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Next name in the `<prefix>_<N>` sequence for `file_type`: one past
    /// the highest numeric suffix among same-type files, starting at 1.
    fn generate_name(&self, file_type: FileType) -> String {
        let prefix = file_type.prefix();
        let max_index = self
            .files
            .iter()
            .filter(|file| file.file_type == file_type)
            .filter_map(|file| file.name.strip_prefix(prefix))
            .filter_map(|rest| rest.strip_prefix('_'))
            .filter_map(|digits| digits.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{prefix}_{}", max_index + 1)
    }
}
