use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "show_library")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub r#type: String,
    pub identifier: String,
    pub primary_provider: String,
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub tagline: Option<String>,
    pub status_id: i32,
    pub show_status: Option<String>,
    pub airs_time: Option<String>,
    pub airs_dayofweek: i32,
    pub last_updated: Option<i64>,
    /// JSON object merged from every info payload seen so far.
    pub info: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::statuses::Entity",
        from = "Column::StatusId",
        to = "super::statuses::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Statuses,
    #[sea_orm(has_many = "super::library_titles::Entity")]
    LibraryTitles,
    #[sea_orm(has_many = "super::show_files::Entity")]
    ShowFiles,
}

impl Related<super::statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Statuses.def()
    }
}

impl Related<super::library_titles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LibraryTitles.def()
    }
}

impl Related<super::files::Entity> for Entity {
    fn to() -> RelationDef {
        super::show_files::Relation::Files.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::show_files::Relation::ShowLibrary.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
