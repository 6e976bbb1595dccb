//! Whole-extract processing.
//!
//! Drives every row of a payroll extract through the breakdown builder,
//! keeping only rows whose employee number resolves to a known employee.

use std::collections::HashSet;
use std::io::Read;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::calculation::{Amount, build_breakdown, parse_amount};
use crate::config::DeductionCatalog;
use crate::error::EngineResult;
use crate::models::{ExtractSummary, PayPeriod, PayslipRecord, RawRow};

use super::dbf::read_extract;

/// Column holding the employee number.
pub const EMPNO_FIELD: &str = "EMPNO";

/// Resolves employee numbers to known employees.
///
/// The engine only asks whether an employee exists; who the employee is
/// and where their payslips are stored is the caller's concern.
pub trait EmployeeDirectory {
    /// True if `empno` identifies a known employee.
    fn contains(&self, empno: Amount) -> bool;
}

impl EmployeeDirectory for HashSet<Amount> {
    fn contains(&self, empno: Amount) -> bool {
        HashSet::contains(self, &empno)
    }
}

/// Accepts every row carrying a positive employee number.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyEmployee;

impl EmployeeDirectory for AnyEmployee {
    fn contains(&self, empno: Amount) -> bool {
        empno > 0
    }
}

/// Reads a row's employee number, zero when absent or unparseable.
pub fn employee_number(row: &RawRow) -> Amount {
    parse_amount(row.get(EMPNO_FIELD))
}

fn payslip_for<D: EmployeeDirectory + ?Sized>(
    row: &RawRow,
    catalog: &DeductionCatalog,
    directory: &D,
) -> Option<PayslipRecord> {
    let empno = employee_number(row);
    if !directory.contains(empno) {
        debug!(empno, "No employee matches row, skipping");
        return None;
    }
    Some(PayslipRecord {
        empno,
        breakdown: build_breakdown(row, catalog),
    })
}

/// Builds payslips for every matching row, one row at a time.
///
/// Returns the payslips in row order and the number of skipped rows.
pub fn process_rows<D: EmployeeDirectory + ?Sized>(
    rows: &[RawRow],
    catalog: &DeductionCatalog,
    directory: &D,
) -> (Vec<PayslipRecord>, usize) {
    let payslips: Vec<PayslipRecord> = rows
        .iter()
        .filter_map(|row| payslip_for(row, catalog, directory))
        .collect();
    let skipped = rows.len() - payslips.len();
    (payslips, skipped)
}

/// Builds payslips for every matching row across the rayon thread pool.
///
/// Rows share no state, so the result is identical to [`process_rows`],
/// row order included.
pub fn process_rows_parallel<D: EmployeeDirectory + Sync + ?Sized>(
    rows: &[RawRow],
    catalog: &DeductionCatalog,
    directory: &D,
) -> (Vec<PayslipRecord>, usize) {
    let payslips: Vec<PayslipRecord> = rows
        .par_iter()
        .filter_map(|row| payslip_for(row, catalog, directory))
        .collect();
    let skipped = rows.len() - payslips.len();
    (payslips, skipped)
}

/// Decodes a payroll extract and builds payslips for its matching rows.
///
/// The pay period comes from `file_name` (see [`PayPeriod::from_extract_name`]),
/// which is checked before any bytes are read.
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::DeductionCatalog;
/// use payslip_engine::extract::{AnyEmployee, process_extract};
///
/// let file = std::fs::File::open("SAL_0525.dbf")?;
/// let summary = process_extract("SAL_0525.dbf", file, &DeductionCatalog::standard(), &AnyEmployee)?;
/// println!("{} payslips for {}", summary.payslips.len(), summary.pay_period);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn process_extract<D: EmployeeDirectory + Sync + ?Sized>(
    file_name: &str,
    reader: impl Read,
    catalog: &DeductionCatalog,
    directory: &D,
) -> EngineResult<ExtractSummary> {
    let pay_period = PayPeriod::from_extract_name(file_name)?;
    let start_time = Instant::now();

    let extract = read_extract(reader)?;
    let (payslips, skipped) = process_rows_parallel(&extract.rows, catalog, directory);

    info!(
        file_name,
        pay_period = %pay_period,
        rows = extract.rows.len(),
        deleted = extract.deleted,
        payslips = payslips.len(),
        skipped,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Processed payroll extract"
    );

    Ok(ExtractSummary {
        pay_period,
        payslips,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::extract::{DbfField, FieldType, write_extract};

    fn rows() -> Vec<RawRow> {
        vec![
            RawRow::new()
                .with("EMPNO", 101)
                .with("NAME", "A. MARY")
                .with("GROSS", 10000)
                .with("PF", 3000),
            RawRow::new().with("EMPNO", 0).with("NAME", "NO NUMBER"),
            RawRow::new()
                .with("EMPNO", "102")
                .with("NAME", "J. PAUL")
                .with("GROSS", "25,000"),
            RawRow::new().with("EMPNO", 999).with("NAME", "LEFT SCHOOL"),
        ]
    }

    #[test]
    fn test_any_employee_skips_missing_numbers() {
        let (payslips, skipped) = process_rows(&rows(), &DeductionCatalog::standard(), &AnyEmployee);

        assert_eq!(skipped, 1);
        let empnos: Vec<Amount> = payslips.iter().map(|p| p.empno).collect();
        assert_eq!(empnos, vec![101, 102, 999]);
        assert_eq!(payslips[0].breakdown.net_pay, "7,000");
        assert_eq!(payslips[1].breakdown.pay, "25,000");
    }

    #[test]
    fn test_directory_filters_unknown_employees() {
        let known: HashSet<Amount> = [101, 102].into_iter().collect();
        let (payslips, skipped) = process_rows(&rows(), &DeductionCatalog::standard(), &known);

        assert_eq!(skipped, 2);
        assert_eq!(payslips.len(), 2);
        assert_eq!(payslips[1].breakdown.name, "J. PAUL");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let many: Vec<RawRow> = (1..=500)
            .map(|n| {
                RawRow::new()
                    .with("EMPNO", n)
                    .with("GROSS", n * 100)
                    .with("PF", n * 7)
            })
            .collect();
        let catalog = DeductionCatalog::standard();

        let sequential = process_rows(&many, &catalog, &AnyEmployee);
        let parallel = process_rows_parallel(&many, &catalog, &AnyEmployee);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_process_extract_end_to_end() {
        let fields = vec![
            DbfField::new("EMPNO", FieldType::Numeric, 5, 0),
            DbfField::new("NAME", FieldType::Character, 20, 0),
            DbfField::new("GROSS", FieldType::Numeric, 10, 2),
            DbfField::new("PF", FieldType::Numeric, 8, 0),
        ];
        let mut bytes = Vec::new();
        write_extract(&fields, &rows(), &mut bytes).unwrap();

        let summary = process_extract(
            "SAL_0525.dbf",
            bytes.as_slice(),
            &DeductionCatalog::standard(),
            &AnyEmployee,
        )
        .unwrap();

        assert_eq!(summary.pay_period.to_string(), "May 2025");
        assert_eq!(summary.payslips.len(), 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.rows_seen(), 4);
        assert_eq!(summary.payslips[0].breakdown.pay, "10,000");
        assert_eq!(summary.payslips[0].breakdown.total_deductions, "3,000");
    }

    #[test]
    fn test_process_extract_rejects_bad_name_before_reading() {
        let result = process_extract(
            "payroll.dbf",
            &b"not a dbf"[..],
            &DeductionCatalog::standard(),
            &AnyEmployee,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidExtractName { .. })
        ));
    }

    #[test]
    fn test_process_extract_propagates_decode_errors() {
        let result = process_extract(
            "SAL_0525.dbf",
            &b"short"[..],
            &DeductionCatalog::standard(),
            &AnyEmployee,
        );
        assert!(matches!(result, Err(EngineError::InvalidExtract { .. })));
    }
}
