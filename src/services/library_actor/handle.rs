use tokio::sync::{mpsc, oneshot};

use super::messages::LibraryMessage;
use crate::domain::UpdateMode;
use crate::library::titles::{QueryOptions, TitleQuery};
use crate::models::show::{ShowAttrs, ShowSnapshot};
use crate::services::show_service::{ShowError, UpdateOutcome};

/// Cloneable front door to the library actor.
///
/// Every request goes through one mailbox, so creates and refreshes for the
/// library are applied one at a time.
#[derive(Clone)]
pub struct LibraryHandle {
    sender: mpsc::Sender<LibraryMessage>,
}

impl LibraryHandle {
    pub const fn new(sender: mpsc::Sender<LibraryMessage>) -> Self {
        Self { sender }
    }

    pub async fn add_show(
        &self,
        attrs: ShowAttrs,
        mode: Option<UpdateMode>,
    ) -> Result<ShowSnapshot, ShowError> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(LibraryMessage::AddShow { attrs, mode, reply })
            .await
            .map_err(|_| ShowError::Unavailable)?;
        rx.await.map_err(|_| ShowError::Unavailable)?
    }

    pub async fn update_show(
        &self,
        identifier: &str,
        default_title: &str,
        force: bool,
    ) -> Result<UpdateOutcome, ShowError> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(LibraryMessage::UpdateShow {
                identifier: identifier.to_string(),
                default_title: default_title.to_string(),
                force,
                reply,
            })
            .await
            .map_err(|_| ShowError::Unavailable)?;
        rx.await.map_err(|_| ShowError::Unavailable)?
    }

    /// Queue a refresh (fire-and-forget). Results surface as library events.
    pub fn refresh_show(&self, identifier: impl Into<String>) {
        let sender = self.sender.clone();
        let identifier = identifier.into();
        tokio::spawn(async move {
            let _ = sender.send(LibraryMessage::RefreshShow { identifier }).await;
        });
    }

    pub async fn query_titles(
        &self,
        show: ShowSnapshot,
        options: QueryOptions,
    ) -> Result<Option<TitleQuery>, ShowError> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(LibraryMessage::QueryTitles {
                show: Box::new(show),
                options,
                reply,
            })
            .await
            .map_err(|_| ShowError::Unavailable)?;
        rx.await.map_err(|_| ShowError::Unavailable)
    }
}
