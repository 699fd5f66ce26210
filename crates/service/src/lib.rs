//! Service layer owning the variable store.
//! - `variables`: record model, storage trait and the in-memory implementation.
//! - `errors`: error types shared with the HTTP layer.

pub mod errors;
pub mod variables;
