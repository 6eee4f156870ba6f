use crate::db::repositories::show::ShowLibraryRepository;
use crate::entities::{files, prelude::*};
use crate::models::show::{FileRecord, FileRef, FileType};
use anyhow::Context;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::path::Path;

/// Repository for the file registry. Rows here outlive any show that
/// references them.
pub struct FileRepository {
    conn: DatabaseConnection,
}

impl FileRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Registers `path`, reusing the existing row when the path is already
    /// known. The stored type is refreshed to `file_type`.
    pub async fn register(&self, path: &Path, file_type: &FileType) -> anyhow::Result<FileRef> {
        let path = path.to_string_lossy().into_owned();

        let active_model = files::ActiveModel {
            path: Set(path.clone()),
            type_category: Set(file_type.category.clone()),
            type_subtype: Set(file_type.subtype.clone()),
            ..Default::default()
        };

        Files::insert(active_model)
            .on_conflict(
                OnConflict::column(files::Column::Path)
                    .update_columns([files::Column::TypeCategory, files::Column::TypeSubtype])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        let row = Files::find()
            .filter(files::Column::Path.eq(&path))
            .one(&self.conn)
            .await?
            .with_context(|| format!("File {path} missing after register"))?;

        Ok(FileRef { id: row.id })
    }

    pub async fn get(&self, id: i32) -> anyhow::Result<Option<FileRecord>> {
        let row = Files::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(ShowLibraryRepository::map_file))
    }
}
