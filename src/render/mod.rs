//! Payslip rendering.
//!
//! Renderers consume a finished [`Breakdown`](crate::models::Breakdown) and
//! never recompute amounts.

mod payslip;

pub use payslip::{PAGE_WIDTH, render_payslip};
