//! Payroll extract input.
//!
//! This module decodes dBase payroll tables into [`RawRow`](crate::models::RawRow)s
//! and drives whole extracts through the breakdown builder.

mod dbf;
mod processor;

pub use dbf::{
    DbfField, DbfHeader, Extract, FieldType, read_extract, read_header, write_extract,
};
pub use processor::{
    AnyEmployee, EMPNO_FIELD, EmployeeDirectory, employee_number, process_extract,
    process_rows, process_rows_parallel,
};
