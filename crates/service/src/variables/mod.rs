//! Variable store: named, scoped records keyed by a system-assigned `uid`.

pub mod import;
pub mod memory;
pub mod model;
pub mod store;

pub use memory::InMemoryVariableStore;
pub use model::{Actor, DeleteOutcome, Props, UpdateOutcome, Variable, VariableParams, VariablePatch};
pub use store::VariableStore;
