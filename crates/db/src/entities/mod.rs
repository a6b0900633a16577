//! `SeaORM` entity definitions.

pub mod prelude;

pub mod accounts;
pub mod declaration_values;
pub mod declarations;
pub mod entry_details;
pub mod form_field_definitions;
pub mod form_versions;
pub mod journal_entries;
pub mod taxpayers;
