//! Per-employee payslip records produced from a whole extract.

use serde::{Deserialize, Serialize};

use super::{Breakdown, PayPeriod};
use crate::calculation::Amount;

/// A breakdown tagged with the employee number it was derived for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipRecord {
    /// The employee number from the row's `EMPNO` column.
    pub empno: Amount,
    /// The derived breakdown.
    pub breakdown: Breakdown,
}

/// The outcome of processing one payroll extract.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractSummary {
    /// The month the extract covers.
    pub pay_period: PayPeriod,
    /// Payslips for matched employees, in extract order.
    pub payslips: Vec<PayslipRecord>,
    /// Rows skipped because no known employee matched.
    pub skipped: usize,
}

impl ExtractSummary {
    /// Total number of live rows the extract contained.
    pub fn rows_seen(&self) -> usize {
        self.payslips.len() + self.skipped
    }
}
