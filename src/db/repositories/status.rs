use crate::entities::{prelude::*, statuses};
use crate::models::show::Status;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

pub struct StatusRepository {
    conn: DatabaseConnection,
}

impl StatusRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_identifier(&self, identifier: &str) -> anyhow::Result<Option<Status>> {
        let row = Statuses::find()
            .filter(statuses::Column::Identifier.eq(identifier))
            .one(&self.conn)
            .await?;

        Ok(row.map(|m| Status {
            id: m.id,
            identifier: m.identifier,
            label: m.label,
        }))
    }
}
