//! Command-line interface module.

mod args;
pub mod avatar;
pub mod common;
pub mod images;
pub mod ingest;
pub mod profile;
pub mod seed;

pub use args::{Cli, Commands, ImagesAction, IngestFlags, ProfileAction};
