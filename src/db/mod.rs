use crate::models::show::{FileRecord, FileRef, FileType, NewShow, ShowRecord, Status};
use crate::services::collaborators::{FileRegistry, ShowRepository, StatusRegistry};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to `:memory:` opens its own database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn show_repo(&self) -> repositories::show::ShowLibraryRepository {
        repositories::show::ShowLibraryRepository::new(self.conn.clone())
    }

    fn file_repo(&self) -> repositories::file::FileRepository {
        repositories::file::FileRepository::new(self.conn.clone())
    }

    fn status_repo(&self) -> repositories::status::StatusRepository {
        repositories::status::StatusRepository::new(self.conn.clone())
    }

    pub async fn get_show(&self, id: i32) -> Result<Option<ShowRecord>> {
        self.show_repo().get(id).await
    }

    pub async fn list_shows(&self) -> Result<Vec<ShowRecord>> {
        self.show_repo().list().await
    }

    /// Removes the show, its titles and its file associations. Registered
    /// files stay in the registry.
    pub async fn delete_show(&self, id: i32) -> Result<bool> {
        self.show_repo().delete(id).await
    }

    pub async fn get_file(&self, id: i32) -> Result<Option<FileRecord>> {
        self.file_repo().get(id).await
    }
}

#[async_trait::async_trait]
impl ShowRepository for Store {
    async fn find_show(&self, show_type: &str, identifier: &str) -> Result<Option<ShowRecord>> {
        self.show_repo().find(show_type, identifier).await
    }

    async fn find_show_by_identifier(&self, identifier: &str) -> Result<Option<ShowRecord>> {
        self.show_repo().find_by_identifier(identifier).await
    }

    async fn insert_show(&self, show: NewShow) -> Result<(ShowRecord, bool)> {
        self.show_repo().insert(show).await
    }

    async fn replace_show(&self, show: &ShowRecord) -> Result<ShowRecord> {
        self.show_repo().replace(show).await
    }

    async fn attach_file(&self, show_id: i32, file_id: i32) -> Result<()> {
        self.show_repo().attach_file(show_id, file_id).await
    }
}

#[async_trait::async_trait]
impl StatusRegistry for Store {
    async fn get_status(&self, name: &str) -> Result<Option<Status>> {
        self.status_repo().get_by_identifier(name).await
    }
}

#[async_trait::async_trait]
impl FileRegistry for Store {
    async fn register_file(&self, path: &Path, file_type: &FileType) -> Result<Option<FileRef>> {
        self.file_repo().register(path, file_type).await.map(Some)
    }

    async fn lookup_file(&self, id: i32) -> Result<FileRecord> {
        self.file_repo()
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("File {id} is not registered"))
    }
}
