pub mod info;
pub mod show;
