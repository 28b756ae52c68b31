//! modtoggle - A CLI manager for DISABLED-prefix skin mod folders
//!
//! A mod library is a directory tree where each child folder is one mod, and
//! a folder's enabled state lives in its name: renaming `MyMod` to
//! `DISABLED MyMod` turns it off. This crate provides:
//! - Classification and normalization of marker-prefixed folder names
//! - Enable/disable/toggle by folder rename, never touching folder contents
//! - Duplicate detection across enabled and disabled copies of a mod

pub const APP_VERSION: &str = "0.2.3";

pub mod app;
pub mod config;
pub mod library;
pub mod marker;

pub use app::App;
pub use config::Config;
