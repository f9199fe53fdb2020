//! Shared helpers: data URIs, MIME types and calendar dates.

pub mod data_uri;
pub mod date;
pub mod mime;
