//! Pay period model.
//!
//! Payroll extracts are named after the month they cover: the two digits at
//! byte positions 4..6 of the file name are the month and the two digits at
//! 6..8 are the year within the 2000s (`SAL_0525.dbf` is May 2025).

use std::fmt;
use std::path::Path;

use chrono::Month;

use crate::error::{EngineError, EngineResult};

/// The calendar month a payroll extract covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPeriod {
    /// The month of the pay period.
    pub month: Month,
    /// The four-digit year of the pay period.
    pub year: i32,
}

impl PayPeriod {
    /// Creates a pay period from a month number (1..=12) and a year.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::models::PayPeriod;
    ///
    /// let period = PayPeriod::new(5, 2025).unwrap();
    /// assert_eq!(period.to_string(), "May 2025");
    /// assert!(PayPeriod::new(13, 2025).is_err());
    /// ```
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        let month = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(EngineError::InvalidPayPeriod { month })?;
        Ok(Self { month, year })
    }

    /// Derives the pay period from an extract file name.
    ///
    /// Only the final path component is inspected. Its bytes 4..8 must be
    /// four ASCII digits `MMYY`, with `MM` a valid month.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::models::PayPeriod;
    ///
    /// let period = PayPeriod::from_extract_name("uploads/SAL_1124.DBF").unwrap();
    /// assert_eq!(period.month_number(), 11);
    /// assert_eq!(period.year, 2024);
    /// ```
    pub fn from_extract_name(name: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidExtractName {
            name: name.to_string(),
        };

        let file_name = Path::new(name)
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(invalid)?;

        let digits = file_name
            .get(4..8)
            .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(invalid)?;

        let month: u32 = digits[..2].parse().map_err(|_| invalid())?;
        let year: i32 = digits[2..].parse().map_err(|_| invalid())?;

        Self::new(month, 2000 + year).map_err(|_| invalid())
    }

    /// Returns the month number (1..=12).
    pub fn month_number(&self) -> u32 {
        self.month.number_from_month()
    }

    /// Returns the English month name (e.g., "May").
    pub fn month_name(&self) -> &'static str {
        self.month.name()
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}
