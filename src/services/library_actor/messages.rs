use tokio::sync::oneshot;

use crate::domain::UpdateMode;
use crate::library::titles::{QueryOptions, TitleQuery};
use crate::models::show::{ShowAttrs, ShowSnapshot};
use crate::services::show_service::{ShowError, UpdateOutcome};

pub type Reply<T> = oneshot::Sender<Result<T, ShowError>>;

/// Requests the library actor understands.
pub enum LibraryMessage {
    /// Add a show; `mode: None` falls back to the configured mode.
    AddShow {
        attrs: ShowAttrs,
        mode: Option<UpdateMode>,
        reply: Reply<ShowSnapshot>,
    },

    UpdateShow {
        identifier: String,
        default_title: String,
        force: bool,
        reply: Reply<UpdateOutcome>,
    },

    /// Refresh without waiting for the outcome (fire-and-forget)
    RefreshShow { identifier: String },

    QueryTitles {
        show: Box<ShowSnapshot>,
        options: QueryOptions,
        reply: oneshot::Sender<Option<TitleQuery>>,
    },
}
