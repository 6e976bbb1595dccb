//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading institution
//! metadata and the deduction catalog from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{DeductionCatalog, DeductionsConfig, InstitutionMetadata};

/// Loads and provides access to payslip configuration.
///
/// # Directory Structure
///
/// ```text
/// config/st_josephs/
/// ├── institution.yaml  # Institution name and payslip heading
/// └── deductions.yaml   # Ordered deduction catalog
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/st_josephs")?;
/// println!("{} deductions", loader.catalog().len());
/// # Ok::<(), payslip_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLoader {
    institution: InstitutionMetadata,
    catalog: DeductionCatalog,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML (`ConfigParseError`)
    /// - The catalog fails validation (`InvalidCatalog`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let institution = Self::load_yaml::<InstitutionMetadata>(&path.join("institution.yaml"))?;

        let deductions = Self::load_yaml::<DeductionsConfig>(&path.join("deductions.yaml"))?;
        let catalog = DeductionCatalog::new(deductions.deductions)?;

        Ok(Self {
            institution,
            catalog,
        })
    }

    /// Builds a loader from already-constructed parts.
    pub fn from_parts(institution: InstitutionMetadata, catalog: DeductionCatalog) -> Self {
        Self {
            institution,
            catalog,
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the institution metadata.
    pub fn institution(&self) -> &InstitutionMetadata {
        &self.institution
    }

    /// Returns the deduction catalog.
    pub fn catalog(&self) -> &DeductionCatalog {
        &self.catalog
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_parts(InstitutionMetadata::default(), DeductionCatalog::standard())
    }
}
