//! Service layer providing the authentication business logic on top of models.
//! - Separates business rules from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod auth;
