//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads. The CLI publishes the loaded
//! `profilekit.toml` once at startup; command handlers read it through
//! [`cfg`].

use crate::config::ProfileConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<ProfileConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(ProfileConfig::default()));

#[inline]
pub fn cfg() -> Arc<ProfileConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: ProfileConfig) -> Arc<ProfileConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
