use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub path: String,
    pub type_category: String,
    pub type_subtype: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show_files::Entity")]
    ShowFiles,
}

impl Related<super::show_files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShowFiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
