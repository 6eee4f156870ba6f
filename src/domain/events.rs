//! Notifications the library publishes for other subsystems.
//!
//! These go out on a `tokio::sync::broadcast` channel; nobody is required to
//! listen, and a send with no subscribers is not an error.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum LibraryEvent {
    ShowAdded {
        identifier: String,
        show_type: String,
        title: Option<String>,
    },
    ShowUpdated {
        identifier: String,
        title: Option<String>,
        titles: usize,
        files: usize,
    },
    UpdateFailed {
        identifier: String,
        message: String,
    },
}
