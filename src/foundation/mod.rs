/// Shared plane and geographic types, constants and colors.
pub mod core;
/// Crate-wide error type.
pub mod error;
