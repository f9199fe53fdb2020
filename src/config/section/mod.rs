//! Configuration section definitions.
//!
//! Each module corresponds to a section in `profilekit.toml`:
//!
//! | Module   | TOML Section | Purpose                              |
//! |----------|--------------|--------------------------------------|
//! | `avatar` | `[avatar]`   | Default avatar sizes                 |
//! | `ingest` | `[ingest]`   | Photo validation, resize, encoding   |
//! | `store`  | `[store]`    | Local store location                 |

mod avatar;
mod ingest;
mod store;

pub use avatar::AvatarConfig;
pub use ingest::IngestConfig;
pub use store::StoreConfig;
