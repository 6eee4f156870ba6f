use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "statuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub identifier: String,
    pub label: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show_library::Entity")]
    ShowLibrary,
}

impl Related<super::show_library::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShowLibrary.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
