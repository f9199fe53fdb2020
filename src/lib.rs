//! profilekit - profile photo ingest and default avatars for local-first
//! signup flows.

pub mod avatar;
pub mod cli;
pub mod config;
pub mod ingest;
pub mod logger;
pub mod profile;
pub mod store;
pub mod utils;
