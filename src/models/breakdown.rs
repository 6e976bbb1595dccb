//! Pay breakdown output model.
//!
//! This module contains the [`Breakdown`] type handed to renderers and
//! serializers, one per payroll row.

use serde::{Deserialize, Serialize};

/// A single labelled deduction line of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// The catalog display label (e.g., "P.F").
    pub label: String,
    /// The formatted amount, `"-"` when zero.
    pub value: String,
}

/// The derived, display-ready pay breakdown of one payroll row.
///
/// Every numeric field is already formatted: digit groups separated by `,`
/// and `"-"` standing in for zero. Field order and the order of
/// [`Breakdown::deductions`] are stable across calls; renderers position
/// fields by order, not by name.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::build_breakdown;
/// use payslip_engine::config::DeductionCatalog;
/// use payslip_engine::models::RawRow;
///
/// let row = RawRow::new().with("NAME", "A. Mary").with("GROSS", "10,000");
/// let breakdown = build_breakdown(&row, &DeductionCatalog::standard());
///
/// assert_eq!(breakdown.name, "A. Mary");
/// assert_eq!(breakdown.pay, "10,000");
/// assert_eq!(breakdown.total_deductions, "-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Employee display name, `"-"` when blank.
    pub name: String,
    /// Gross pay.
    pub pay: String,
    /// Basic pay.
    pub basic: String,
    /// Dearness allowance ("DA").
    pub da: String,
    /// Special allowance ("OA").
    pub oa: String,
    /// Attendance days.
    pub days: String,
    /// Deduction lines in catalog order.
    pub deductions: Vec<DeductionLine>,
    /// Sum of all deductions.
    pub total_deductions: String,
    /// Gross pay minus total deductions; may be negative.
    pub net_pay: String,
}
