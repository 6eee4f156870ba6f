use sea_orm::entity::prelude::*;

/// Association between a show and a file owned by the file subsystem.
/// Removing a row here never touches the `files` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "show_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub show_id: i32,
    pub file_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::show_library::Entity",
        from = "Column::ShowId",
        to = "super::show_library::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ShowLibrary,
    #[sea_orm(
        belongs_to = "super::files::Entity",
        from = "Column::FileId",
        to = "super::files::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Files,
}

impl Related<super::show_library::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShowLibrary.def()
    }
}

impl Related<super::files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
