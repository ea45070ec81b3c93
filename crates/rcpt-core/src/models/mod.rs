//! Data models and configuration.

pub mod config;
pub mod merchant;
pub mod receipt;
