//! Configuration types for payslip generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the institution issuing payslips.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstitutionMetadata {
    /// The institution name printed at the top of every payslip.
    pub name: String,
    /// The heading printed before the pay period (e.g., "Payslip for the month of").
    pub heading: String,
}

impl Default for InstitutionMetadata {
    fn default() -> Self {
        Self {
            name: "ST.JOSEPH'S HIGHER SECONDARY SCHOOL, CUDDALORE-1".to_string(),
            heading: "Payslip for the month of".to_string(),
        }
    }
}

/// One deduction type recognized by the institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The label shown on the payslip (e.g., "P.F").
    pub label: String,
    /// The extract column holding the amount. `None` means the deduction
    /// has no column and is always zero.
    #[serde(default)]
    pub field: Option<String>,
}

impl CatalogEntry {
    /// Creates an entry sourced from `field`.
    pub fn new(label: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field: Some(field.into()),
        }
    }

    /// Creates an entry with no source column.
    pub fn unsourced(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field: None,
        }
    }
}

/// Deductions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DeductionsConfig {
    /// The catalog entries in display order.
    pub deductions: Vec<CatalogEntry>,
}

/// The ordered list of deductions printed on every payslip.
///
/// Order is significant: breakdown lines follow it exactly, and renderers
/// lay lines out by position. A catalog is non-empty, and its labels are
/// non-blank and unique.
///
/// # Example
///
/// ```
/// use payslip_engine::config::DeductionCatalog;
///
/// let catalog = DeductionCatalog::standard();
/// assert_eq!(catalog.len(), 14);
/// assert_eq!(catalog.entries()[0].label, "P.F");
/// assert_eq!(catalog.entries()[12].field, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionCatalog {
    entries: Vec<CatalogEntry>,
}

impl DeductionCatalog {
    /// Creates a catalog, validating its entries.
    ///
    /// # Returns
    ///
    /// Returns `InvalidCatalog` if `entries` is empty, a label is blank,
    /// or two entries share a label.
    pub fn new(entries: Vec<CatalogEntry>) -> EngineResult<Self> {
        if entries.is_empty() {
            return Err(EngineError::InvalidCatalog {
                message: "catalog has no entries".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (position, entry) in entries.iter().enumerate() {
            if entry.label.trim().is_empty() {
                return Err(EngineError::InvalidCatalog {
                    message: format!("entry {} has a blank label", position + 1),
                });
            }
            if !seen.insert(entry.label.as_str()) {
                return Err(EngineError::InvalidCatalog {
                    message: format!("duplicate label '{}'", entry.label),
                });
            }
        }

        Ok(Self { entries })
    }

    /// The deduction catalog of the school's payroll extract.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new("P.F", "PF"),
                CatalogEntry::new("Teacher's Loan 1", "TEACH"),
                CatalogEntry::new("Paddy Loan", "PADDY"),
                CatalogEntry::new("Teacher's Loan 2", "TEACH2"),
                CatalogEntry::new("T.R.F", "MADURA_2"),
                CatalogEntry::new("Teacher's Loan 3", "TEACH3"),
                CatalogEntry::new("Tour", "TOUR"),
                CatalogEntry::new("Teacher's Loan 4", "TEACH4"),
                CatalogEntry::new("PMSSS", "XX"),
                CatalogEntry::new("Church Contri.", "CHURCH"),
                CatalogEntry::new("Mess Deduction", "MESS"),
                CatalogEntry::new("ESIC", "MADURA_1"),
                CatalogEntry::unsourced("OD Recovered"),
                CatalogEntry::new("Arrear", "ARREAR"),
            ],
        }
    }

    /// Returns the entries in order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DeductionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a DeductionCatalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
