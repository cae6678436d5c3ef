//! Testing utilities for pathmap workspace
//!
//! Shared test helpers, fixtures, and converters.

#![allow(missing_docs)]

pub mod converters;
pub mod stubs;

use pathmap_core::{MapperConfig, NamingPolicy, PathMapper};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
pub fn init_tracing() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Mapper configured the way most fixtures expect: camelCase members
pub fn camel_case_mapper() -> PathMapper {
    PathMapper::with_config(MapperConfig::new().with_naming(NamingPolicy::CamelCase))
}

/// Parse a fixture document
pub fn doc(json: &str) -> serde_json::Value {
    serde_json::from_str(json).unwrap()
}
