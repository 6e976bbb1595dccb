//! Payslip Extract Engine
//!
//! This crate turns rows of a monthly payroll extract into display-ready
//! payslip breakdowns: gross pay, its components, a fixed catalog of
//! deductions, the deduction total and net pay. Amounts are parsed leniently
//! and formatted with thousands grouping, or `-` when zero.
//!
//! The pieces are layered:
//!
//! - [`calculation`] parses and formats amounts and builds breakdowns.
//! - [`config`] loads the institution metadata and deduction catalog.
//! - [`extract`] decodes dBase extracts and processes them row by row.
//! - [`render`] lays a breakdown out as a fixed-width text payslip.
//! - [`api`] serves all of the above over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod render;
