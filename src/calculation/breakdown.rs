//! Pay breakdown derivation.
//!
//! This module turns one [`RawRow`] and a [`DeductionCatalog`] into a
//! [`Breakdown`]: the top-level pay components, one line per catalog entry,
//! total deductions and net pay, all formatted for display.

use crate::config::DeductionCatalog;
use crate::models::{Breakdown, DeductionLine, RawRow};

use super::amount::{Amount, PLACEHOLDER, format_amount, parse_amount};

/// Column holding the employee display name.
pub const NAME_FIELD: &str = "NAME";
/// Column holding gross pay.
pub const GROSS_FIELD: &str = "GROSS";
/// Column holding basic pay.
pub const BASIC_FIELD: &str = "BASIC_P";
/// Column holding the dearness allowance ("DA").
pub const DA_FIELD: &str = "DA_P";
/// Column holding the special allowance ("OA").
pub const OA_FIELD: &str = "SPPAY_P";
/// Column holding attendance days.
pub const DAYS_FIELD: &str = "DAYS";

/// The normalized, unformatted figures of one row.
///
/// `deductions` is parallel to the catalog the figures were computed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayFigures {
    /// Gross pay.
    pub gross_pay: Amount,
    /// Basic pay.
    pub basic_pay: Amount,
    /// Dearness allowance.
    pub da: Amount,
    /// Special allowance.
    pub oa: Amount,
    /// Attendance days.
    pub days: Amount,
    /// One amount per catalog entry, in catalog order.
    pub deductions: Vec<Amount>,
    /// Sum of `deductions`.
    pub total_deductions: Amount,
    /// `gross_pay - total_deductions`; negative when over-deducted.
    pub net_pay: Amount,
}

/// Normalizes a row's amounts and computes its totals.
///
/// Catalog entries without a source column contribute zero. Sums saturate at
/// the `Amount` range instead of overflowing, and net pay is never clamped
/// at zero.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::compute_pay_figures;
/// use payslip_engine::config::DeductionCatalog;
/// use payslip_engine::models::RawRow;
///
/// let row = RawRow::new().with("GROSS", 10000).with("PF", 2000).with("MESS", "1,000");
/// let figures = compute_pay_figures(&row, &DeductionCatalog::standard());
///
/// assert_eq!(figures.total_deductions, 3000);
/// assert_eq!(figures.net_pay, 7000);
/// ```
pub fn compute_pay_figures(row: &RawRow, catalog: &DeductionCatalog) -> PayFigures {
    let gross_pay = parse_amount(row.get(GROSS_FIELD));

    let deductions: Vec<Amount> = catalog
        .iter()
        .map(|entry| match &entry.field {
            Some(field) => parse_amount(row.get(field)),
            None => 0,
        })
        .collect();

    let total_deductions = deductions
        .iter()
        .fold(0, |total: Amount, amount| total.saturating_add(*amount));

    PayFigures {
        gross_pay,
        basic_pay: parse_amount(row.get(BASIC_FIELD)),
        da: parse_amount(row.get(DA_FIELD)),
        oa: parse_amount(row.get(OA_FIELD)),
        days: parse_amount(row.get(DAYS_FIELD)),
        deductions,
        total_deductions,
        net_pay: gross_pay.saturating_sub(total_deductions),
    }
}

/// Builds the display breakdown of one payroll row.
///
/// This never fails: absent or unparseable amounts count as zero and render
/// as `"-"`. The deduction lines follow `catalog` order regardless of the
/// row's own column order, and calling this twice on the same input yields
/// identical output.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::build_breakdown;
/// use payslip_engine::config::DeductionCatalog;
/// use payslip_engine::models::RawRow;
///
/// let row = RawRow::new()
///     .with("NAME", "A. Mary")
///     .with("GROSS", "10,000")
///     .with("PF", 3000);
/// let breakdown = build_breakdown(&row, &DeductionCatalog::standard());
///
/// assert_eq!(breakdown.deductions[0].label, "P.F");
/// assert_eq!(breakdown.deductions[0].value, "3,000");
/// assert_eq!(breakdown.net_pay, "7,000");
/// ```
pub fn build_breakdown(row: &RawRow, catalog: &DeductionCatalog) -> Breakdown {
    breakdown_from_figures(row, catalog, &compute_pay_figures(row, catalog))
}

/// Formats already computed figures into a breakdown.
///
/// `figures` must come from [`compute_pay_figures`] with the same `row` and
/// `catalog`; the row is consulted only for the display name.
pub fn breakdown_from_figures(
    row: &RawRow,
    catalog: &DeductionCatalog,
    figures: &PayFigures,
) -> Breakdown {
    let deductions = catalog
        .iter()
        .zip(&figures.deductions)
        .map(|(entry, amount)| DeductionLine {
            label: entry.label.clone(),
            value: format_amount(*amount),
        })
        .collect();

    Breakdown {
        name: display_name(row),
        pay: format_amount(figures.gross_pay),
        basic: format_amount(figures.basic_pay),
        da: format_amount(figures.da),
        oa: format_amount(figures.oa),
        days: format_amount(figures.days),
        deductions,
        total_deductions: format_amount(figures.total_deductions),
        net_pay: format_amount(figures.net_pay),
    }
}

fn display_name(row: &RawRow) -> String {
    row.get(NAME_FIELD)
        .and_then(|value| value.display_text())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
