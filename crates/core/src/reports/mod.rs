//! Financial report generation.
//!
//! This module provides pure business logic for generating financial reports
//! from a [`LedgerSnapshot`](crate::aggregation::LedgerSnapshot):
//! - Trial Balance (sumas y saldos)
//! - Balance Sheet
//! - Income Statement
//! - Journal Book (libro diario)

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
