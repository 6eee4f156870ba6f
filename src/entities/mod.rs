pub mod prelude;

pub mod files;
pub mod library_titles;
pub mod show_files;
pub mod show_library;
pub mod statuses;
