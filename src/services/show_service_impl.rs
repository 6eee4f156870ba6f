//! Collaborator-backed implementation of [`ShowService`].
//!
//! The reconciler never mutates storage rows in place: it reads a
//! [`ShowRecord`], computes the next value with the pure helpers in
//! [`crate::library::reconcile`], and hands that to the repository.

use crate::config::LibraryConfig;
use crate::constants::{library::IMAGE_CATEGORY, status};
use crate::domain::UpdateMode;
use crate::domain::events::LibraryEvent;
use crate::library::reconcile::apply_info;
use crate::library::titles::canonical_text;
use crate::models::info::ShowInfo;
use crate::models::show::{
    FileRecord, FileType, NewShow, ShowAttrs, ShowRecord, ShowSnapshot, Status, TitleRecord,
};
use crate::services::collaborators::{
    FileDownloader, FileRegistry, Lifecycle, ShowInfoSource, ShowRepository, StatusRegistry,
};
use crate::services::show_service::{ShowError, ShowService, UpdateOutcome};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Everything the reconciler talks to, injected as trait objects.
#[derive(Clone)]
pub struct Collaborators {
    pub shows: Arc<dyn ShowRepository>,
    pub statuses: Arc<dyn StatusRegistry>,
    pub info_source: Arc<dyn ShowInfoSource>,
    pub downloader: Arc<dyn FileDownloader>,
    pub files: Arc<dyn FileRegistry>,
    pub lifecycle: Arc<dyn Lifecycle>,
}

/// Creates show records and keeps them in step with the info source.
///
/// Cheap to clone; detached refreshes run on a clone.
#[derive(Clone)]
pub struct LibraryReconciler {
    deps: Collaborators,
    config: LibraryConfig,
    event_bus: broadcast::Sender<LibraryEvent>,
}

impl LibraryReconciler {
    #[must_use]
    pub const fn new(
        deps: Collaborators,
        config: LibraryConfig,
        event_bus: broadcast::Sender<LibraryEvent>,
    ) -> Self {
        Self {
            deps,
            config,
            event_bus,
        }
    }

    async fn status(&self, name: &str) -> Result<Status, ShowError> {
        self.deps
            .statuses
            .get_status(name)
            .await?
            .ok_or_else(|| ShowError::StatusMissing(name.to_string()))
    }

    fn publish(&self, event: LibraryEvent) {
        let _ = self.event_bus.send(event);
    }

    /// Fetches the payload and strips bookkeeping keys. Any failure, or a
    /// payload with nothing left in it, counts as "no info".
    async fn fetch_info(&self, identifier: &str) -> Option<ShowInfo> {
        match self.deps.info_source.fetch_show_info(identifier).await {
            Ok(Some(mut info)) => {
                info.strip_transient();
                (!info.is_empty()).then_some(info)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(identifier = %identifier, error = %e, "Info source lookup failed");
                None
            }
        }
    }

    /// Attaches the first artwork image that makes it all the way through
    /// download, registration, and lookup. Failures are logged and skipped.
    async fn attach_artwork(&self, show: &ShowRecord, info: &ShowInfo) -> Option<FileRecord> {
        for category in &self.config.image_categories {
            for url in info.images(category) {
                match self.attach_image(show.id, url, category).await {
                    Ok(Some(file)) => return Some(file),
                    Ok(None) => {}
                    Err(e) => {
                        debug!(url = %url, error = ?e, "Failed to attach to library");
                    }
                }
            }
        }
        None
    }

    async fn attach_image(
        &self,
        show_id: i32,
        url: &str,
        category: &str,
    ) -> anyhow::Result<Option<FileRecord>> {
        let Some(path) = self.deps.downloader.download(url).await? else {
            return Ok(None);
        };

        let file_type = FileType::new(IMAGE_CATEGORY, category);
        let Some(file_ref) = self.deps.files.register_file(&path, &file_type).await? else {
            return Ok(None);
        };

        let file = self.deps.files.lookup_file(file_ref.id).await?;
        self.deps.shows.attach_file(show_id, file.id).await?;

        info!(show_id, file_id = file.id, path = %file.path, "Attached artwork");
        Ok(Some(file))
    }

    fn spawn_update(&self, identifier: String, default_title: String) {
        let reconciler = self.clone();
        tokio::spawn(async move {
            if let Err(e) = reconciler
                .update_show(&identifier, &default_title, false)
                .await
            {
                error!(identifier = %identifier, error = %e, "Background show update failed");
                reconciler.publish(LibraryEvent::UpdateFailed {
                    identifier,
                    message: e.to_string(),
                });
            }
        });
    }
}

#[async_trait::async_trait]
impl ShowService for LibraryReconciler {
    async fn create_show(
        &self,
        attrs: ShowAttrs,
        mode: UpdateMode,
    ) -> Result<ShowSnapshot, ShowError> {
        let identifier = attrs.identifier.trim().to_string();
        if identifier.is_empty() {
            return Err(ShowError::InvalidData(
                "show identifier must not be empty".to_string(),
            ));
        }

        let show_type = attrs
            .show_type
            .clone()
            .unwrap_or_else(|| self.config.default_show_type.clone());

        let (record, created) = match self.deps.shows.find_show(&show_type, &identifier).await? {
            Some(existing) => (existing, false),
            None => {
                let needs_update = self.status(status::NEEDS_UPDATE).await?;
                let new_show = NewShow {
                    identifier: identifier.clone(),
                    show_type: show_type.clone(),
                    primary_provider: attrs
                        .primary_provider
                        .clone()
                        .unwrap_or_else(|| self.config.default_provider.clone()),
                    year: attrs.year,
                    plot: attrs.plot.as_deref().map(canonical_text),
                    tagline: attrs.tagline.as_deref().map(canonical_text),
                    status_id: needs_update.id,
                    title: attrs
                        .title
                        .as_deref()
                        .filter(|t| !t.is_empty())
                        .map(|t| TitleRecord::new(t, false)),
                };
                self.deps.shows.insert_show(new_show).await?
            }
        };

        if created {
            info!(identifier = %identifier, show_type = %show_type, "Added show to library");
            self.publish(LibraryEvent::ShowAdded {
                identifier: identifier.clone(),
                show_type,
                title: record.default_title().map(str::to_string),
            });
        }

        let default_title = attrs.title.map(|t| canonical_text(&t)).unwrap_or_default();
        let snapshot = ShowSnapshot::from(record);
        debug!(identifier = %identifier, mode = %mode, "Show record ready");

        match mode {
            UpdateMode::Synchronous => {
                match self.update_show(&identifier, &default_title, false).await {
                    Ok(UpdateOutcome::Updated(updated)) => return Ok(updated),
                    Ok(UpdateOutcome::NoInfo | UpdateOutcome::ShuttingDown) => {}
                    Err(e) => {
                        error!(identifier = %identifier, error = %e, "Show update after add failed");
                        self.publish(LibraryEvent::UpdateFailed {
                            identifier,
                            message: e.to_string(),
                        });
                    }
                }
            }
            UpdateMode::Detached => self.spawn_update(identifier, default_title),
            UpdateMode::Skip => {}
        }

        Ok(snapshot)
    }

    async fn update_show(
        &self,
        identifier: &str,
        default_title: &str,
        force: bool,
    ) -> Result<UpdateOutcome, ShowError> {
        if self.deps.lifecycle.is_shutting_down() {
            debug!(identifier = %identifier, "Skipping show update during shutdown");
            return Ok(UpdateOutcome::ShuttingDown);
        }

        debug!(identifier = %identifier, force, "Refreshing show");

        let record = self.deps.shows.find_show_by_identifier(identifier).await?;

        let Some(info) = self.fetch_info(identifier).await else {
            error!("Could not update, no show info to work with: {}", identifier);
            return Ok(UpdateOutcome::NoInfo);
        };

        let record = record.ok_or_else(|| ShowError::NotFound(identifier.to_string()))?;
        let done = self.status(status::DONE).await?;
        let now = chrono::Utc::now().timestamp();

        let refreshed = apply_info(&record, &info, default_title, done.id, now);
        debug!(
            identifier = %identifier,
            titles = ?refreshed.titles.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
            "Adding titles"
        );

        let mut stored = self.deps.shows.replace_show(&refreshed).await?;

        if let Some(file) = self.attach_artwork(&stored, &info).await
            && !stored.files.iter().any(|f| f.id == file.id)
        {
            stored.files.push(file);
        }

        info!(
            identifier = %identifier,
            titles = stored.titles.len(),
            files = stored.files.len(),
            "Updated show from info source"
        );
        self.publish(LibraryEvent::ShowUpdated {
            identifier: identifier.to_string(),
            title: stored.default_title().map(str::to_string),
            titles: stored.titles.len(),
            files: stored.files.len(),
        });

        Ok(UpdateOutcome::Updated(ShowSnapshot::from(stored)))
    }
}
