use crate::constants::status;
use crate::entities::prelude::*;
use crate::entities::{files, library_titles, show_files, show_library, statuses};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Statuses)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Files)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(ShowLibrary)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(LibraryTitles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(ShowFiles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // One record per (type, identifier); insert-if-absent relies on it.
        manager
            .create_index(
                Index::create()
                    .name("idx_show_library_type_identifier")
                    .table(ShowLibrary)
                    .col(show_library::Column::Type)
                    .col(show_library::Column::Identifier)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // A stored path is registered once and shared by every show using it.
        manager
            .create_index(
                Index::create()
                    .name("idx_files_path")
                    .table(Files)
                    .col(files::Column::Path)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_library_titles_show_id")
                    .table(LibraryTitles)
                    .col(library_titles::Column::ShowId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_show_files_show_file")
                    .table(ShowFiles)
                    .col(show_files::Column::ShowId)
                    .col(show_files::Column::FileId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(Statuses)
            .columns([statuses::Column::Identifier, statuses::Column::Label])
            .values_panic([status::NEEDS_UPDATE.into(), "Needs update".into()])
            .values_panic([status::DONE.into(), "Done".into()])
            .to_owned();

        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShowFiles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LibraryTitles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShowLibrary).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Files).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Statuses).to_owned())
            .await?;

        Ok(())
    }
}
