//! Mailbox in front of the [`ShowService`]: host events become messages,
//! request/response messages carry a oneshot reply.

mod handle;
mod messages;
mod runner;

pub use handle::LibraryHandle;
pub use messages::LibraryMessage;
pub use runner::LibraryActor;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::UpdateMode;
use crate::services::show_service::ShowService;

/// Create and start the library actor
pub fn create_library_actor(
    service: Arc<dyn ShowService>,
    default_mode: UpdateMode,
    mailbox_size: usize,
) -> LibraryHandle {
    let (sender, receiver) = mpsc::channel(mailbox_size.max(1));

    let actor = LibraryActor::new(service, default_mode, receiver);
    tokio::spawn(actor.run());

    LibraryHandle::new(sender)
}
