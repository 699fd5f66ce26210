use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::import::parse_entries;
use super::model::{Actor, DeleteOutcome, Props, UpdateOutcome, Variable, VariableParams, VariablePatch};
use super::store::VariableStore;

/// Process-lifetime variable store kept in a `Vec` behind one lock.
///
/// Reads share the lock, every mutation takes it exclusively for the whole scan,
/// so uid generation + append, update and delete never interleave.
#[derive(Clone)]
pub struct InMemoryVariableStore {
    inner: Arc<RwLock<Vec<Variable>>>,
    default_scope: String,
}

impl Default for InMemoryVariableStore {
    fn default() -> Self { Self::new("org") }
}

impl InMemoryVariableStore {
    pub fn new(default_scope: impl Into<String>) -> Self {
        Self { inner: Arc::new(RwLock::new(Vec::new())), default_scope: default_scope.into() }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    fn resolve_scope(&self, scope: Option<String>) -> String {
        match scope {
            Some(s) if !s.is_empty() => s,
            _ => self.default_scope.clone(),
        }
    }

    fn new_record(&self, params: VariableParams, props: Props, actor: &Actor) -> Variable {
        Variable {
            id: params.id,
            uid: Uuid::new_v4().to_string(),
            name: params.name,
            description: params.description,
            value: params.value,
            kind: params.kind,
            scope: self.resolve_scope(params.scope),
            scope_id: actor.scope_id(),
            props,
            created_by: actor.user_uid.clone(),
            created_at: Some(Utc::now()),
            updated_by: String::new(),
            updated_at: None,
        }
    }
}

fn uid_matches(stored: &str, target: &str) -> bool {
    stored.trim().to_lowercase() == target.trim().to_lowercase()
}

#[async_trait]
impl VariableStore for InMemoryVariableStore {
    async fn list(&self) -> Vec<Variable> {
        self.inner.read().await.clone()
    }

    async fn get(&self, uid: &str) -> Option<Variable> {
        let vars = self.inner.read().await;
        vars.iter().find(|v| v.uid == uid).cloned()
    }

    #[instrument(skip(self, params, props), fields(user = %actor.user_uid, org_id = actor.org_id))]
    async fn create(&self, params: VariableParams, props: Props, actor: &Actor) -> Variable {
        let mut vars = self.inner.write().await;
        let rec = self.new_record(params, props, actor);
        vars.push(rec.clone());
        info!(uid = %rec.uid, scope = %rec.scope, scope_id = %rec.scope_id, "variable_created");
        rec
    }

    #[instrument(skip(self, payload), fields(user = %actor.user_uid))]
    async fn update(&self, uid: &str, payload: &[u8], actor: &Actor) -> UpdateOutcome {
        let patch = VariablePatch::from_json(payload);
        let mut vars = self.inner.write().await;
        if !vars.iter().any(|v| v.uid == uid) {
            debug!(%uid, "update_no_match");
            return UpdateOutcome::NotFound { uid: uid.to_string() };
        }
        let patch = match patch {
            Ok(p) => p,
            Err(e) => {
                warn!(%uid, error = %e, "update_payload_undecodable");
                return UpdateOutcome::Undecodable { uid: uid.to_string(), reason: e.to_string() };
            }
        };

        let now = Utc::now();
        let mut records = Vec::new();
        for v in vars.iter_mut().filter(|v| v.uid == uid) {
            let mut next = v.clone();
            patch.clone().apply_to(&mut next);
            next.uid = uid.to_string();
            next.updated_at = Some(now);
            next.updated_by = actor.user_uid.clone();
            *v = next;
            records.push(v.clone());
        }
        info!(%uid, count = records.len(), "variable_updated");
        UpdateOutcome::Updated { uid: uid.to_string(), records }
    }

    #[instrument(skip(self))]
    async fn delete(&self, uid: &str) -> DeleteOutcome {
        let mut vars = self.inner.write().await;
        let before = vars.len();
        vars.retain(|v| !uid_matches(&v.uid, uid));
        let removed = before - vars.len();
        info!(%uid, removed, "variable_deleted");
        DeleteOutcome { uid: uid.to_string(), removed }
    }

    #[instrument(skip(self, text), fields(user = %actor.user_uid, org_id = actor.org_id))]
    async fn import(&self, text: &str, scope: Option<String>, actor: &Actor) -> Vec<Variable> {
        let entries = parse_entries(text);
        let mut vars = self.inner.write().await;
        let created: Vec<Variable> = entries
            .into_iter()
            .map(|e| {
                let params = VariableParams {
                    name: e.name,
                    value: e.value,
                    scope: scope.clone(),
                    ..Default::default()
                };
                self.new_record(params, Props::default(), actor)
            })
            .collect();
        vars.extend(created.iter().cloned());
        info!(count = created.len(), "variables_imported");
        created
    }
}
