//! Shared types, error model, and configuration for handbookgen.
//!
//! This crate is the foundation depended on by all other handbookgen crates.
//! It provides:
//! - [`HandbookError`] — the unified error type
//! - Domain types ([`SummaryNode`], [`ConflictPolicy`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{HandbookError, Result};
pub use types::{ConflictPolicy, SummaryNode};
