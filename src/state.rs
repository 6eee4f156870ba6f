use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use crate::config::Config;
use crate::db::Store;
use crate::domain::events::LibraryEvent;
use crate::services::{
    Collaborators, FileDownloader, LibraryHandle, LibraryReconciler, ShowInfoSource, ShowService,
    create_library_actor,
};
use crate::shutdown::ShutdownFlag;

/// Collaborators only the host can provide.
#[derive(Clone)]
pub struct HostServices {
    pub info_source: Arc<dyn ShowInfoSource>,

    pub downloader: Arc<dyn FileDownloader>,
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub event_bus: broadcast::Sender<LibraryEvent>,

    pub shutdown: ShutdownFlag,

    pub shows: Arc<dyn ShowService>,

    pub library: LibraryHandle,
}

impl SharedState {
    pub async fn new(config: Config, host: HostServices) -> anyhow::Result<Self> {
        let (event_bus, _) = broadcast::channel(config.general.event_bus_buffer_size.max(1));
        Self::with_event_bus(config, host, event_bus).await
    }

    pub async fn with_event_bus(
        config: Config,
        host: HostServices,
        event_bus: broadcast::Sender<LibraryEvent>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let shutdown = ShutdownFlag::new();
        let store_arc = Arc::new(store.clone());

        let deps = Collaborators {
            shows: store_arc.clone(),
            statuses: store_arc.clone(),
            info_source: host.info_source,
            downloader: host.downloader,
            files: store_arc,
            lifecycle: Arc::new(shutdown.clone()),
        };

        let shows: Arc<dyn ShowService> = Arc::new(LibraryReconciler::new(
            deps,
            config.library.clone(),
            event_bus.clone(),
        ));

        let library = create_library_actor(
            shows.clone(),
            config.library.add_update_mode,
            config.general.mailbox_size,
        );

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            event_bus,
            shutdown,
            shows,
            library,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LibraryEvent> {
        self.event_bus.subscribe()
    }
}
