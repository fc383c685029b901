pub mod actions;
pub mod cache;
pub mod commands;
pub mod config;
pub mod github;
pub mod runtime;
pub mod version;
