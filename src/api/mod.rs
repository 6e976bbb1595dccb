//! HTTP API module for the Payslip Extract Engine.
//!
//! This module exposes breakdown derivation, payslip rendering and extract
//! upload as REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchBreakdownRequest, BreakdownRequest, ExtractQuery, PayslipRequest};
pub use response::{ApiError, BatchBreakdownResponse, ExtractResponse};
pub use state::AppState;
