use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::LibraryMessage;
use crate::domain::UpdateMode;
use crate::services::show_service::{ShowService, UpdateOutcome};

/// Library actor main loop
pub struct LibraryActor {
    service: Arc<dyn ShowService>,
    default_mode: UpdateMode,
    receiver: mpsc::Receiver<LibraryMessage>,
}

impl LibraryActor {
    pub fn new(
        service: Arc<dyn ShowService>,
        default_mode: UpdateMode,
        receiver: mpsc::Receiver<LibraryMessage>,
    ) -> Self {
        Self {
            service,
            default_mode,
            receiver,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Library actor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }

        tracing::info!("Library actor stopped");
    }

    async fn handle_message(&self, msg: LibraryMessage) {
        match msg {
            LibraryMessage::AddShow { attrs, mode, reply } => {
                let mode = mode.unwrap_or(self.default_mode);
                let result = self.service.create_show(attrs, mode).await;
                let _ = reply.send(result);
            }

            LibraryMessage::UpdateShow {
                identifier,
                default_title,
                force,
                reply,
            } => {
                let result = self
                    .service
                    .update_show(&identifier, &default_title, force)
                    .await;
                let _ = reply.send(result);
            }

            LibraryMessage::RefreshShow { identifier } => {
                match self.service.update_show(&identifier, "", false).await {
                    Ok(UpdateOutcome::Updated(_)) => {
                        tracing::debug!(identifier = %identifier, "Background refresh finished");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!(identifier = %identifier, "Background refresh failed: {}", e);
                    }
                }
            }

            LibraryMessage::QueryTitles {
                show,
                options,
                reply,
            } => {
                let _ = reply.send(self.service.query_titles(&show, options));
            }
        }
    }
}
