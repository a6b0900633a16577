//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;
pub mod period;

pub use id::*;
pub use money::{CENT_SCALE, has_cent_scale, round_to_cents};
pub use pagination::{PageMeta, PageRequest, PageResponse};
pub use period::{PeriodError, ReportingPeriod};
