pub use super::files::Entity as Files;
pub use super::library_titles::Entity as LibraryTitles;
pub use super::show_files::Entity as ShowFiles;
pub use super::show_library::Entity as ShowLibrary;
pub use super::statuses::Entity as Statuses;
