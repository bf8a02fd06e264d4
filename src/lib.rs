pub mod actions;
pub mod config;
pub mod extension;
pub mod host;
pub mod joplin;
pub mod logging;
pub mod query;
pub mod selection;
pub mod settings;
