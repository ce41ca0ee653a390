#![forbid(unsafe_code)]

pub mod archive;
pub mod archive_index;
pub mod build;
pub mod cli;
pub mod config;
pub mod formats;
pub mod logging;
pub mod metadata;
pub mod page;
pub mod render;
pub mod snapshot;
pub mod template;
