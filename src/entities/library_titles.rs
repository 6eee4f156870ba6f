use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "library_titles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub show_id: i32,
    pub title: String,
    pub simple_title: String,
    pub is_default: bool,
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
}

impl Related<super::show_library::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShowLibrary.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
