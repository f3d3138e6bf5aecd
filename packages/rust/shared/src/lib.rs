//! Shared types, error model, and configuration for the imsakia converter.
//!
//! This crate is the foundation depended on by the other imsakia crates.
//! It provides:
//! - [`ImsakiaError`], the unified error type
//! - Domain types ([`DayRecord`], [`CellValue`])
//! - Configuration ([`AppConfig`], [`ConvertConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ConvertConfig, ConvertSection, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{ErrorKind, ImsakiaError, Result};
pub use types::{CellValue, DayRecord, TIME_FIELDS};
