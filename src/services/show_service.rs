//! Domain service for the show library.
//!
//! Handlers and the bus adapter talk to this trait; the concrete
//! [`LibraryReconciler`](crate::services::LibraryReconciler) wires it to the
//! injected collaborators.

use crate::domain::UpdateMode;
use crate::library::titles::{QueryOptions, TitleQuery};
use crate::models::show::{ShowAttrs, ShowSnapshot};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowError {
    #[error("Show not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Status not registered: {0}")]
    StatusMissing(String),

    #[error("Invalid show data: {0}")]
    InvalidData(String),

    #[error("Show library is unavailable")]
    Unavailable,
}

impl From<sea_orm::DbErr> for ShowError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ShowError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Result of a refresh that did not hit a hard error.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(ShowSnapshot),
    /// No usable info payload; nothing was changed.
    NoInfo,
    /// The process is shutting down; the refresh was not attempted.
    ShuttingDown,
}

impl UpdateOutcome {
    #[must_use]
    pub fn snapshot(&self) -> Option<&ShowSnapshot> {
        match self {
            Self::Updated(snapshot) => Some(snapshot),
            Self::NoInfo | Self::ShuttingDown => None,
        }
    }

    #[must_use]
    pub fn into_snapshot(self) -> Option<ShowSnapshot> {
        match self {
            Self::Updated(snapshot) => Some(snapshot),
            Self::NoInfo | Self::ShuttingDown => None,
        }
    }
}

#[async_trait::async_trait]
pub trait ShowService: Send + Sync {
    /// Finds or creates the record for `(type, identifier)`, then enriches it
    /// according to `mode`.
    ///
    /// # Errors
    ///
    /// - Returns [`ShowError::InvalidData`] if the identifier is empty
    /// - Returns [`ShowError::StatusMissing`] if `needs_update` is not registered
    /// - Returns [`ShowError::Database`] on storage failures
    async fn create_show(
        &self,
        attrs: ShowAttrs,
        mode: UpdateMode,
    ) -> Result<ShowSnapshot, ShowError>;

    /// Refreshes the record from the info source.
    ///
    /// `force` is accepted for callers that distinguish forced refreshes; the
    /// refresh itself always runs.
    ///
    /// # Errors
    ///
    /// - Returns [`ShowError::NotFound`] if info exists but no record does
    /// - Returns [`ShowError::StatusMissing`] if `done` is not registered
    /// - Returns [`ShowError::Database`] on storage failures
    async fn update_show(
        &self,
        identifier: &str,
        default_title: &str,
        force: bool,
    ) -> Result<UpdateOutcome, ShowError>;

    /// Search titles for a stored snapshot; `None` for non-show records.
    fn query_titles(&self, show: &ShowSnapshot, options: QueryOptions) -> Option<TitleQuery> {
        crate::library::titles::query(show, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_error_display() {
        let err = ShowError::NotFound("81189".to_string());
        assert_eq!(err.to_string(), "Show not found: 81189");

        let err = ShowError::StatusMissing("done".to_string());
        assert_eq!(err.to_string(), "Status not registered: done");
    }

    #[test]
    fn soft_outcomes_carry_no_snapshot() {
        assert!(UpdateOutcome::NoInfo.snapshot().is_none());
        assert!(UpdateOutcome::ShuttingDown.into_snapshot().is_none());
    }
}
