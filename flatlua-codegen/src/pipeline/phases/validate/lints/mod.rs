//! Built-in lints for schema validation.

mod deprecated_field;
mod empty_union;
mod escaped_identifier;

pub use deprecated_field::DeprecatedFieldLint;
pub use empty_union::EmptyUnionLint;
pub use escaped_identifier::EscapedIdentifierLint;
