//! Interfaces the reconciler consumes.
//!
//! Each collaborator is a trait object injected at construction time. The
//! SQLite [`Store`](crate::db::Store) provides persistence, statuses, and the
//! file registry; the info source and the downloader come from the host.

use crate::models::info::ShowInfo;
use crate::models::show::{FileRecord, FileRef, FileType, NewShow, ShowRecord, Status};
use anyhow::Result;
use std::path::{Path, PathBuf};

#[async_trait::async_trait]
pub trait ShowRepository: Send + Sync {
    async fn find_show(&self, show_type: &str, identifier: &str) -> Result<Option<ShowRecord>>;

    /// First record with this identifier, whatever its type.
    async fn find_show_by_identifier(&self, identifier: &str) -> Result<Option<ShowRecord>>;

    /// Inserts unless a record with the same `(show_type, identifier)` exists.
    /// Returns the stored record and whether this call created it.
    async fn insert_show(&self, show: NewShow) -> Result<(ShowRecord, bool)>;

    /// Persists scalar fields and replaces all titles in one transaction.
    /// File associations are left alone.
    async fn replace_show(&self, show: &ShowRecord) -> Result<ShowRecord>;

    async fn attach_file(&self, show_id: i32, file_id: i32) -> Result<()>;
}

#[async_trait::async_trait]
pub trait StatusRegistry: Send + Sync {
    /// Looks up a status by its symbolic name (`needs_update`, `done`).
    async fn get_status(&self, name: &str) -> Result<Option<Status>>;
}

#[async_trait::async_trait]
pub trait ShowInfoSource: Send + Sync {
    async fn fetch_show_info(&self, identifier: &str) -> Result<Option<ShowInfo>>;
}

#[async_trait::async_trait]
pub trait FileDownloader: Send + Sync {
    /// Fetches `url` to local storage, returning the stored path.
    async fn download(&self, url: &str) -> Result<Option<PathBuf>>;
}

#[async_trait::async_trait]
pub trait FileRegistry: Send + Sync {
    async fn register_file(&self, path: &Path, file_type: &FileType) -> Result<Option<FileRef>>;

    async fn lookup_file(&self, id: i32) -> Result<FileRecord>;
}

/// Process lifecycle, polled cooperatively.
pub trait Lifecycle: Send + Sync {
    fn is_shutting_down(&self) -> bool;
}
