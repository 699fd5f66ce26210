use async_trait::async_trait;

use super::model::{Actor, DeleteOutcome, Props, UpdateOutcome, Variable, VariableParams};

/// Trait abstraction for variable storage.
/// Implementations must serialize every operation against the whole collection.
#[async_trait]
pub trait VariableStore: Send + Sync {
    /// Full collection in insertion order.
    async fn list(&self) -> Vec<Variable>;
    async fn get(&self, uid: &str) -> Option<Variable>;
    async fn create(&self, params: VariableParams, props: Props, actor: &Actor) -> Variable;
    /// Merge a JSON payload onto every record whose `uid` matches exactly.
    async fn update(&self, uid: &str, payload: &[u8], actor: &Actor) -> UpdateOutcome;
    /// Remove every record whose trimmed `uid` matches case-insensitively.
    async fn delete(&self, uid: &str) -> DeleteOutcome;
    /// Create one record per `KEY=VALUE` line of `text`.
    async fn import(&self, text: &str, scope: Option<String>, actor: &Actor) -> Vec<Variable>;
}
