//! Core data models for the Payslip Extract Engine.
//!
//! This module contains the raw input row, the derived breakdown and the
//! per-extract records built around it.

mod breakdown;
mod pay_period;
mod payslip;
mod raw_row;

pub use breakdown::{Breakdown, DeductionLine};
pub use pay_period::PayPeriod;
pub use payslip::{ExtractSummary, PayslipRecord};
pub use raw_row::{RawRow, RawValue};
