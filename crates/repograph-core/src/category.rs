//! File categories resolved from extensions.
//!
//! The category set is closed: every consumer (style tables, statistics)
//! matches exhaustively, so a new category is a compile-checked extension.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    Javascript,
    Typescript,
    Stylesheet,
    Html,
    Json,
    Markdown,
    Image,
    Python,
    Ruby,
    Php,
    Java,
    Go,
    Rust,
    C,
    Cpp,
    CHeader,
    Csharp,
    Swift,
    Kotlin,
    Dart,
    Solidity,
    Yaml,
    Toml,
    Shell,
    Batch,
    Powershell,
    Text,
    Csv,
    Pdf,
    Document,
    Spreadsheet,
    /// Unknown or missing extension
    File,
}

impl FileCategory {
    pub const ALL: [FileCategory; 32] = [
        FileCategory::Javascript,
        FileCategory::Typescript,
        FileCategory::Stylesheet,
        FileCategory::Html,
        FileCategory::Json,
        FileCategory::Markdown,
        FileCategory::Image,
        FileCategory::Python,
        FileCategory::Ruby,
        FileCategory::Php,
        FileCategory::Java,
        FileCategory::Go,
        FileCategory::Rust,
        FileCategory::C,
        FileCategory::Cpp,
        FileCategory::CHeader,
        FileCategory::Csharp,
        FileCategory::Swift,
        FileCategory::Kotlin,
        FileCategory::Dart,
        FileCategory::Solidity,
        FileCategory::Yaml,
        FileCategory::Toml,
        FileCategory::Shell,
        FileCategory::Batch,
        FileCategory::Powershell,
        FileCategory::Text,
        FileCategory::Csv,
        FileCategory::Pdf,
        FileCategory::Document,
        FileCategory::Spreadsheet,
        FileCategory::File,
    ];

    /// Resolve a category from a bare extension (no leading dot), case-insensitively.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "js" | "jsx" => FileCategory::Javascript,
            "ts" | "tsx" => FileCategory::Typescript,
            "css" | "scss" | "less" => FileCategory::Stylesheet,
            "html" => FileCategory::Html,
            "json" => FileCategory::Json,
            "md" => FileCategory::Markdown,
            "png" | "jpg" | "jpeg" | "gif" | "svg" => FileCategory::Image,
            "py" => FileCategory::Python,
            "rb" => FileCategory::Ruby,
            "php" => FileCategory::Php,
            "java" => FileCategory::Java,
            "go" => FileCategory::Go,
            "rs" => FileCategory::Rust,
            "c" => FileCategory::C,
            "cpp" => FileCategory::Cpp,
            "h" => FileCategory::CHeader,
            "cs" => FileCategory::Csharp,
            "swift" => FileCategory::Swift,
            "kt" => FileCategory::Kotlin,
            "dart" => FileCategory::Dart,
            "sol" => FileCategory::Solidity,
            "yaml" | "yml" => FileCategory::Yaml,
            "toml" => FileCategory::Toml,
            "sh" => FileCategory::Shell,
            "bat" => FileCategory::Batch,
            "ps1" => FileCategory::Powershell,
            "txt" => FileCategory::Text,
            "csv" => FileCategory::Csv,
            "pdf" => FileCategory::Pdf,
            "doc" | "docx" => FileCategory::Document,
            "xls" | "xlsx" => FileCategory::Spreadsheet,
            _ => FileCategory::File,
        }
    }

    pub fn from_file_name(name: &str) -> Self {
        extension_of(name)
            .map(Self::from_extension)
            .unwrap_or(FileCategory::File)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Javascript => "javascript",
            FileCategory::Typescript => "typescript",
            FileCategory::Stylesheet => "stylesheet",
            FileCategory::Html => "html",
            FileCategory::Json => "json",
            FileCategory::Markdown => "markdown",
            FileCategory::Image => "image",
            FileCategory::Python => "python",
            FileCategory::Ruby => "ruby",
            FileCategory::Php => "php",
            FileCategory::Java => "java",
            FileCategory::Go => "go",
            FileCategory::Rust => "rust",
            FileCategory::C => "c",
            FileCategory::Cpp => "cpp",
            FileCategory::CHeader => "c-header",
            FileCategory::Csharp => "csharp",
            FileCategory::Swift => "swift",
            FileCategory::Kotlin => "kotlin",
            FileCategory::Dart => "dart",
            FileCategory::Solidity => "solidity",
            FileCategory::Yaml => "yaml",
            FileCategory::Toml => "toml",
            FileCategory::Shell => "shell",
            FileCategory::Batch => "batch",
            FileCategory::Powershell => "powershell",
            FileCategory::Text => "text",
            FileCategory::Csv => "csv",
            FileCategory::Pdf => "pdf",
            FileCategory::Document => "document",
            FileCategory::Spreadsheet => "spreadsheet",
            FileCategory::File => "file",
        }
    }

    /// Script sources the usage heuristics consider (javascript/typescript).
    pub fn is_script(&self) -> bool {
        matches!(self, FileCategory::Javascript | FileCategory::Typescript)
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseError::InvalidCategory(s.to_string()))
    }
}

/// Extension of a file name: the text after the last `.`, if the name has one
/// and the suffix is non-empty. `.gitignore` yields `gitignore`.
pub fn extension_of(name: &str) -> Option<&str> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() { None } else { Some(ext) }
}

/// The `type` of a hierarchy node: a directory or a resolved file category.
///
/// Serialized as its string form (`"directory"`, `"typescript"`, `"file"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Directory,
    File(FileCategory),
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Directory => "directory",
            NodeType::File(category) => category.as_str(),
        }
    }
}

impl From<String> for NodeType {
    fn from(value: String) -> Self {
        if value == "directory" {
            NodeType::Directory
        } else {
            NodeType::File(value.parse().unwrap_or(FileCategory::File))
        }
    }
}

impl From<NodeType> for String {
    fn from(value: NodeType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
