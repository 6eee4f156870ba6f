use crate::library::titles::{canonical_text, simplify};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A show library record as stored, with its titles and attached files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowRecord {
    pub id: i32,
    pub identifier: String,
    pub show_type: String,
    pub primary_provider: String,
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub tagline: Option<String>,
    pub status_id: i32,
    pub show_status: Option<String>,
    pub airs_time: Option<String>,
    pub airs_dayofweek: i32,
    pub last_updated: Option<i64>,
    pub info: Map<String, Value>,
    pub titles: Vec<TitleRecord>,
    pub files: Vec<FileRecord>,
}

impl ShowRecord {
    /// The first title flagged default, falling back to the first title.
    #[must_use]
    pub fn default_title(&self) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.is_default)
            .or_else(|| self.titles.first())
            .map(|t| t.title.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub title: String,
    pub simple_title: String,
    #[serde(rename = "default")]
    pub is_default: bool,
}

impl TitleRecord {
    /// Builds a title row, storing the canonical text and its simplified form.
    #[must_use]
    pub fn new(title: &str, is_default: bool) -> Self {
        let title = canonical_text(title);
        let simple_title = simplify(&title);
        Self {
            title,
            simple_title,
            is_default,
        }
    }
}

/// `(category, subtype)` classification of a file, e.g. `("image", "poster")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileType {
    pub category: String,
    pub subtype: String,
}

impl FileType {
    pub fn new(category: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subtype: subtype.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: i32,
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

/// Handle returned by the file registry after registering a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: i32,
    pub identifier: String,
    pub label: String,
}

/// Attributes a caller supplies when adding a show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowAttrs {
    pub identifier: String,
    #[serde(default, rename = "type")]
    pub show_type: Option<String>,
    #[serde(default)]
    pub primary_provider: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ShowAttrs {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, show_type: impl Into<String>) -> Self {
        self.show_type = Some(show_type.into());
        self
    }
}

/// Everything needed to insert a fresh record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShow {
    pub identifier: String,
    pub show_type: String,
    pub primary_provider: String,
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub tagline: Option<String>,
    pub status_id: i32,
    /// Provisional title; `None` when the caller supplied none.
    pub title: Option<TitleRecord>,
}

/// Serializable projection of a [`ShowRecord`] handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowSnapshot {
    pub id: i32,
    pub identifier: String,
    #[serde(rename = "type")]
    pub show_type: String,
    pub primary_provider: String,
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub tagline: Option<String>,
    pub status_id: i32,
    pub show_status: Option<String>,
    pub airs_time: Option<String>,
    pub airs_dayofweek: i32,
    pub last_updated: Option<i64>,
    pub info: Map<String, Value>,
    pub titles: Vec<TitleRecord>,
    pub files: Vec<FileRecord>,
}

impl From<ShowRecord> for ShowSnapshot {
    fn from(record: ShowRecord) -> Self {
        Self {
            id: record.id,
            identifier: record.identifier,
            show_type: record.show_type,
            primary_provider: record.primary_provider,
            year: record.year,
            plot: record.plot,
            tagline: record.tagline,
            status_id: record.status_id,
            show_status: record.show_status,
            airs_time: record.airs_time,
            airs_dayofweek: record.airs_dayofweek,
            last_updated: record.last_updated,
            info: record.info,
            titles: record.titles,
            files: record.files,
        }
    }
}

impl ShowSnapshot {
    #[must_use]
    pub fn title_strings(&self) -> Vec<String> {
        self.titles.iter().map(|t| t.title.clone()).collect()
    }
}
