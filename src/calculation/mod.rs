//! Calculation logic for the Payslip Extract Engine.
//!
//! This module contains the pure core of the engine: amount normalization
//! and formatting, and the derivation of a pay breakdown from one raw
//! payroll row and a deduction catalog.

mod amount;
mod breakdown;

pub use amount::{Amount, PLACEHOLDER, format_amount, parse_amount};
pub use breakdown::{
    BASIC_FIELD, DA_FIELD, DAYS_FIELD, GROSS_FIELD, NAME_FIELD, OA_FIELD, PayFigures,
    breakdown_from_figures, build_breakdown, compute_pay_figures,
};
