//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod declaration;
pub mod form;
pub mod journal;
pub mod report;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use declaration::{
    DeclarationDetail, DeclarationError, DeclarationFilter, DeclarationRepository, DeclarationSummary,
    StoredValue,
};
pub use form::{FormError, FormRepository, LoadedForm, SeedSummary};
pub use journal::{JournalError, JournalRepository};
pub use report::{ReportError, ReportRepository};
