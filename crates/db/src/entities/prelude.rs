//! Entity re-exports.

pub use super::accounts::Entity as Accounts;
pub use super::declaration_values::Entity as DeclarationValues;
pub use super::declarations::Entity as Declarations;
pub use super::entry_details::Entity as EntryDetails;
pub use super::form_field_definitions::Entity as FormFieldDefinitions;
pub use super::form_versions::Entity as FormVersions;
pub use super::journal_entries::Entity as JournalEntries;
pub use super::taxpayers::Entity as Taxpayers;
