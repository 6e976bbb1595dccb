//! Configuration loading and management for the Payslip Extract Engine.
//!
//! This module loads the institution metadata and the ordered deduction
//! catalog from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/st_josephs").unwrap();
//! println!("Loaded institution: {}", config.institution().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CatalogEntry, DeductionCatalog, DeductionsConfig, InstitutionMetadata};
