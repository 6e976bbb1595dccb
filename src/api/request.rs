//! Request types for the Payslip Extract Engine API.

use serde::{Deserialize, Serialize};

use crate::models::RawRow;

/// Request body for the `/breakdown` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownRequest {
    /// The raw payroll row, keyed by column code.
    pub row: RawRow,
}

/// Request body for the `/breakdowns` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchBreakdownRequest {
    /// The raw payroll rows; the response keeps their order.
    pub rows: Vec<RawRow>,
}

/// Request body for the `/payslip` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The raw payroll row, keyed by column code.
    pub row: RawRow,
    /// Month number of the pay period (1..=12).
    pub month: u32,
    /// Four-digit year of the pay period.
    pub year: i32,
}

/// Query string of the `/extract` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractQuery {
    /// The uploaded extract's file name, which carries its pay period.
    pub file_name: String,
}
