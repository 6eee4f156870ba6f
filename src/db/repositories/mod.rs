pub mod file;
pub mod show;
pub mod status;
