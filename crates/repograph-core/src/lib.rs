use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub mod category;
pub mod error;

pub use category::{FileCategory, NodeType, extension_of};
pub use error::ParseError;

/// Kind tag of a raw listing entry. Accepts git-tree spellings (`blob`, `tree`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[serde(alias = "blob")]
    File,
    #[serde(alias = "tree")]
    Directory,
}

/// One entry of a flat repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    /// Slash-delimited, relative to the repository root
    pub path: String,
    #[serde(alias = "type")]
    pub kind: EntryKind,
    /// Bytes, files only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl PathEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size: None,
        }
    }

    pub fn file_with_size(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size: Some(size),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            size: None,
        }
    }

    /// Last `/`-segment of the path
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Path with the last segment stripped, `None` at root level
    pub fn parent_path(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(parent, _)| parent)
    }
}

/// A node of the nested repository hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub name: String,
    /// Unique key within the tree
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Bytes, 0 for directories
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
    /// Paths referencing this file. Opaque metadata, may be heuristic.
    #[serde(default, rename = "usedIn", skip_serializing_if = "Option::is_none")]
    pub used_in: Option<Vec<String>>,
}

impl HierarchyNode {
    pub fn is_directory(&self) -> bool {
        self.node_type == NodeType::Directory
    }

    pub fn category(&self) -> Option<FileCategory> {
        match self.node_type {
            NodeType::Directory => None,
            NodeType::File(category) => Some(category),
        }
    }

    pub fn extension(&self) -> Option<&str> {
        if self.is_directory() {
            None
        } else {
            extension_of(&self.name)
        }
    }
}

/// Owner/repository pair identifying a loaded repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoIdentity {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Input handed over by the fetch/cache collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryData {
    pub owner: String,
    pub repo: String,
    pub structure: Vec<HierarchyNode>,
    /// Unique lowercase extensions, no leading dot
    #[serde(default)]
    pub file_types: Vec<String>,
    /// Opaque; not required to be accurate
    #[serde(default)]
    pub dependencies: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir_count: Option<usize>,
}

impl RepositoryData {
    pub fn identity(&self) -> RepoIdentity {
        RepoIdentity {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Structure,
    Dependencies,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Structure => f.write_str("structure"),
            ViewMode::Dependencies => f.write_str("dependencies"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "structure" => Ok(ViewMode::Structure),
            "dependencies" | "dependency" => Ok(ViewMode::Dependencies),
            _ => Err(ParseError::InvalidViewMode(s.to_string())),
        }
    }
}

/// Resolved theme consumed by the style tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseError::InvalidTheme(s.to_string())),
        }
    }
}

/// User-facing theme choice; `System` is resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn resolve(self, system_prefers_dark: bool) -> Theme {
        match self {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::System if system_prefers_dark => Theme::Dark,
            ThemePreference::System => Theme::Light,
        }
    }
}

impl FromStr for ThemePreference {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            _ => Err(ParseError::InvalidTheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_entry_segments() {
        let entry = PathEntry::file("src/components/App.tsx");
        assert_eq!(entry.name(), "App.tsx");
        assert_eq!(entry.parent_path(), Some("src/components"));

        let top = PathEntry::directory("src");
        assert_eq!(top.name(), "src");
        assert_eq!(top.parent_path(), None);
    }

    #[test]
    fn test_path_entry_accepts_git_tree_spelling() {
        let json = r#"[
            {"path": "src", "type": "tree"},
            {"path": "src/main.rs", "type": "blob", "size": 120}
        ]"#;
        let entries: Vec<PathEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[1].size, Some(120));
    }

    #[test]
    fn test_repository_data_camel_case() {
        let json = r#"{
            "owner": "octo",
            "repo": "demo",
            "structure": [
                {"name": "a.ts", "path": "a.ts", "type": "typescript", "size": 3, "usedIn": ["b.ts"]}
            ],
            "fileTypes": ["ts"],
            "dependencies": {"a.ts": []}
        }"#;
        let data: RepositoryData = serde_json::from_str(json).unwrap();
        assert_eq!(data.display_name(), "octo/demo");
        assert_eq!(data.file_types, vec!["ts".to_string()]);
        let node = &data.structure[0];
        assert_eq!(node.category(), Some(FileCategory::Typescript));
        assert_eq!(node.used_in.as_deref(), Some(&["b.ts".to_string()][..]));
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_theme_preference_resolution() {
        assert_eq!(ThemePreference::System.resolve(true), Theme::Dark);
        assert_eq!(ThemePreference::System.resolve(false), Theme::Light);
        assert_eq!(ThemePreference::Light.resolve(true), Theme::Light);
        assert_eq!("DARK".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("structure".parse::<ViewMode>(), Ok(ViewMode::Structure));
        assert_eq!("Dependencies".parse::<ViewMode>(), Ok(ViewMode::Dependencies));
        assert!("radial".parse::<ViewMode>().is_err());
    }
}
