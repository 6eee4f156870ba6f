use crate::entities::{files, library_titles, prelude::*, show_files, show_library};
use crate::models::show::{FileRecord, FileType, NewShow, ShowRecord, TitleRecord};
use anyhow::Context;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde_json::{Map, Value};
use tracing::debug;

pub struct ShowLibraryRepository {
    conn: DatabaseConnection,
}

impl ShowLibraryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_title(model: library_titles::Model) -> TitleRecord {
        TitleRecord {
            title: model.title,
            simple_title: model.simple_title,
            is_default: model.is_default,
        }
    }

    pub(crate) fn map_file(model: files::Model) -> FileRecord {
        FileRecord {
            id: model.id,
            path: model.path,
            file_type: FileType::new(model.type_category, model.type_subtype),
        }
    }

    fn title_models(show_id: i32, titles: &[TitleRecord]) -> Vec<library_titles::ActiveModel> {
        titles
            .iter()
            .map(|t| library_titles::ActiveModel {
                show_id: Set(show_id),
                title: Set(t.title.clone()),
                simple_title: Set(t.simple_title.clone()),
                is_default: Set(t.is_default),
                ..Default::default()
            })
            .collect()
    }

    async fn load<C: ConnectionTrait>(
        db: &C,
        model: show_library::Model,
    ) -> anyhow::Result<ShowRecord> {
        let titles = LibraryTitles::find()
            .filter(library_titles::Column::ShowId.eq(model.id))
            .order_by_asc(library_titles::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(Self::map_title)
            .collect();

        let files = ShowFiles::find()
            .filter(show_files::Column::ShowId.eq(model.id))
            .order_by_asc(show_files::Column::Id)
            .find_also_related(Files)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(_, file)| file.map(Self::map_file))
            .collect();

        let info: Map<String, Value> = serde_json::from_str(&model.info).unwrap_or_default();

        Ok(ShowRecord {
            id: model.id,
            identifier: model.identifier,
            show_type: model.r#type,
            primary_provider: model.primary_provider,
            year: model.year,
            plot: model.plot,
            tagline: model.tagline,
            status_id: model.status_id,
            show_status: model.show_status,
            airs_time: model.airs_time,
            airs_dayofweek: model.airs_dayofweek,
            last_updated: model.last_updated,
            info,
            titles,
            files,
        })
    }

    pub async fn get(&self, id: i32) -> anyhow::Result<Option<ShowRecord>> {
        match ShowLibrary::find_by_id(id).one(&self.conn).await? {
            Some(model) => Ok(Some(Self::load(&self.conn, model).await?)),
            None => Ok(None),
        }
    }

    pub async fn find(
        &self,
        show_type: &str,
        identifier: &str,
    ) -> anyhow::Result<Option<ShowRecord>> {
        let model = ShowLibrary::find()
            .filter(show_library::Column::Type.eq(show_type))
            .filter(show_library::Column::Identifier.eq(identifier))
            .one(&self.conn)
            .await?;

        match model {
            Some(model) => Ok(Some(Self::load(&self.conn, model).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_identifier(&self, identifier: &str) -> anyhow::Result<Option<ShowRecord>> {
        let model = ShowLibrary::find()
            .filter(show_library::Column::Identifier.eq(identifier))
            .order_by_asc(show_library::Column::Id)
            .one(&self.conn)
            .await?;

        match model {
            Some(model) => Ok(Some(Self::load(&self.conn, model).await?)),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> anyhow::Result<Vec<ShowRecord>> {
        let models = ShowLibrary::find()
            .order_by_asc(show_library::Column::Id)
            .all(&self.conn)
            .await?;

        let mut records = Vec::with_capacity(models.len());
        for model in models {
            records.push(Self::load(&self.conn, model).await?);
        }
        Ok(records)
    }

    /// Inserts the show unless `(type, identifier)` is already taken.
    /// The provisional title is only written when this call created the row.
    pub async fn insert(&self, show: NewShow) -> anyhow::Result<(ShowRecord, bool)> {
        let txn = self.conn.begin().await?;

        let active_model = show_library::ActiveModel {
            r#type: Set(show.show_type.clone()),
            identifier: Set(show.identifier.clone()),
            primary_provider: Set(show.primary_provider),
            year: Set(show.year),
            plot: Set(show.plot),
            tagline: Set(show.tagline),
            status_id: Set(show.status_id),
            show_status: Set(None),
            airs_time: Set(None),
            airs_dayofweek: Set(0),
            last_updated: Set(None),
            info: Set("{}".to_string()),
            ..Default::default()
        };

        let inserted = ShowLibrary::insert(active_model)
            .on_conflict(
                OnConflict::columns([show_library::Column::Type, show_library::Column::Identifier])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;
        let created = inserted > 0;

        let model = ShowLibrary::find()
            .filter(show_library::Column::Type.eq(&show.show_type))
            .filter(show_library::Column::Identifier.eq(&show.identifier))
            .one(&txn)
            .await?
            .with_context(|| format!("Show {} vanished after insert", show.identifier))?;

        if created && let Some(title) = show.title {
            let titles = Self::title_models(model.id, std::slice::from_ref(&title));
            LibraryTitles::insert_many(titles).exec(&txn).await?;
        }

        txn.commit().await?;

        if !created {
            debug!(
                identifier = %show.identifier,
                show_type = %show.show_type,
                "Show already present, reusing existing record"
            );
        }

        let record = Self::load(&self.conn, model).await?;
        Ok((record, created))
    }

    /// Writes scalar fields and swaps the title set atomically.
    pub async fn replace(&self, show: &ShowRecord) -> anyhow::Result<ShowRecord> {
        let info = serde_json::to_string(&show.info)?;

        let txn = self.conn.begin().await?;

        let active_model = show_library::ActiveModel {
            id: Set(show.id),
            primary_provider: Set(show.primary_provider.clone()),
            year: Set(show.year),
            plot: Set(show.plot.clone()),
            tagline: Set(show.tagline.clone()),
            status_id: Set(show.status_id),
            show_status: Set(show.show_status.clone()),
            airs_time: Set(show.airs_time.clone()),
            airs_dayofweek: Set(show.airs_dayofweek),
            last_updated: Set(show.last_updated),
            info: Set(info),
            ..Default::default()
        };

        let model = ShowLibrary::update(active_model).exec(&txn).await?;

        LibraryTitles::delete_many()
            .filter(library_titles::Column::ShowId.eq(show.id))
            .exec(&txn)
            .await?;

        let titles = Self::title_models(show.id, &show.titles);
        if !titles.is_empty() {
            LibraryTitles::insert_many(titles).exec(&txn).await?;
        }

        txn.commit().await?;

        Self::load(&self.conn, model).await
    }

    pub async fn attach_file(&self, show_id: i32, file_id: i32) -> anyhow::Result<()> {
        let active_model = show_files::ActiveModel {
            show_id: Set(show_id),
            file_id: Set(file_id),
            ..Default::default()
        };

        ShowFiles::insert(active_model)
            .on_conflict(
                OnConflict::columns([show_files::Column::ShowId, show_files::Column::FileId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let result = ShowLibrary::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
