//! Bulk avatar seeding from a users file.
//!
//! Reads a JSON array of `{ "name": "..." }` records and emits one avatar
//! per named record through an [`AvatarSink`]. Seeding never fails: an
//! unreadable or malformed file is logged and yields an empty batch, and a
//! sink error for one record does not stop the others.

use std::path::Path;

use anyhow::{Result, anyhow};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use super::generate_avatar_data_uri;
use crate::{debug, log};

/// One generated avatar, keyed by the name it was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededAvatar {
    pub name: String,
    pub data_uri: String,
}

/// Destination for seeded avatars.
pub trait AvatarSink {
    fn accept(&mut self, avatar: SeededAvatar) -> Result<()>;
}

impl<F> AvatarSink for F
where
    F: FnMut(SeededAvatar) -> Result<()>,
{
    fn accept(&mut self, avatar: SeededAvatar) -> Result<()> {
        self(avatar)
    }
}

impl AvatarSink for UnboundedSender<SeededAvatar> {
    fn accept(&mut self, avatar: SeededAvatar) -> Result<()> {
        self.send(avatar)
            .map_err(|e| anyhow!("avatar receiver dropped before `{}`", e.0.name))
    }
}

/// Outcome counters for one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Records found in the source (0 if it could not be read).
    pub records: usize,
    /// Avatars accepted by the sink.
    pub generated: usize,
    /// Records without a usable `name`.
    pub skipped: usize,
    /// Avatars the sink rejected.
    pub failed: usize,
}

/// Seed avatars for every named record in the JSON file at `source`.
pub async fn seed_avatars(source: &Path, size: u32, sink: &mut impl AvatarSink) -> SeedReport {
    let records = read_users(source).await;
    let report = seed_records(&records, size, sink);
    log!("seed"; "generated {} default avatars", report.generated);
    report
}

/// Seed avatars from already-parsed records.
pub fn seed_records(records: &[Value], size: u32, sink: &mut impl AvatarSink) -> SeedReport {
    let mut report = SeedReport {
        records: records.len(),
        ..SeedReport::default()
    };

    for record in records {
        let Some(name) = record_name(record) else {
            report.skipped += 1;
            continue;
        };

        let avatar = SeededAvatar {
            name: name.to_string(),
            data_uri: generate_avatar_data_uri(Some(name), size),
        };

        match sink.accept(avatar) {
            Ok(()) => report.generated += 1,
            Err(e) => {
                report.failed += 1;
                log!("warning"; "could not store avatar for `{}`: {:#}", name, e);
            }
        }
    }

    debug!("seed"; "{:?}", report);
    report
}

/// Records of the users file, or none (with a logged warning) when it
/// cannot be read or is not a JSON array.
pub async fn read_users(source: &Path) -> Vec<Value> {
    load_records(source).await.unwrap_or_else(|e| {
        log!("warning"; "failed to load default avatars from {}: {:#}", source.display(), e);
        Vec::new()
    })
}

/// Read and parse the users file. The top level must be an array.
async fn load_records(source: &Path) -> Result<Vec<Value>> {
    let content = tokio::fs::read_to_string(source).await?;
    match serde_json::from_str(&content)? {
        Value::Array(records) => Ok(records),
        other => Err(anyhow!("expected a JSON array, found {}", json_kind(&other))),
    }
}

fn record_name(record: &Value) -> Option<&str> {
    record
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
