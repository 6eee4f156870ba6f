pub mod collaborators;
pub use collaborators::{
    FileDownloader, FileRegistry, Lifecycle, ShowInfoSource, ShowRepository, StatusRegistry,
};

pub mod library_actor;
pub use library_actor::{LibraryHandle, create_library_actor};

pub mod show_service;
pub use show_service::{ShowError, ShowService, UpdateOutcome};

pub mod show_service_impl;
pub use show_service_impl::{Collaborators, LibraryReconciler};
