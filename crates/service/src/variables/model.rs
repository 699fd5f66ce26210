use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Opaque payload attached to a variable.
///
/// The store never interprets it; request bodies land here byte for byte
/// (invalid UTF-8 sequences are replaced, nothing else is touched).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(String);

impl Props {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl From<String> for Props {
    fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for Props {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

/// A named, scoped variable record.
///
/// `uid` is assigned by the store and is the only handle used for update and delete;
/// `id` is caller-supplied free text with no uniqueness guarantee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    pub uid: String,
    pub name: String,
    pub description: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub scope: String,
    pub scope_id: String,
    pub props: Props,
    pub created_by: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_by: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-supplied fields for a new variable; missing keys read as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableParams {
    pub id: String,
    pub name: String,
    pub description: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub scope: Option<String>,
}

impl VariableParams {
    /// Fold decoded query pairs; the first occurrence of a key wins and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        let mut seen: Vec<String> = Vec::new();
        for (k, v) in pairs {
            let key = k.as_ref();
            if seen.iter().any(|s| s == key) {
                continue;
            }
            let slot = match key {
                "id" => &mut params.id,
                "name" => &mut params.name,
                "description" => &mut params.description,
                "value" => &mut params.value,
                "type" => &mut params.kind,
                "scope" => {
                    params.scope = Some(v.into());
                    seen.push(key.to_string());
                    continue;
                }
                _ => continue,
            };
            *slot = v.into();
            seen.push(key.to_string());
        }
        params
    }
}

/// Acting principal and the partition the request runs in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Actor {
    pub user_uid: String,
    pub org_id: i64,
}

impl Actor {
    pub fn new(user_uid: impl Into<String>, org_id: i64) -> Self {
        Self { user_uid: user_uid.into(), org_id }
    }

    pub fn scope_id(&self) -> String { self.org_id.to_string() }
}

/// Fields an update payload may replace. Absent or `null` keys keep the stored value.
///
/// `uid`, the creation stamps and the update stamps are not patchable; unknown keys
/// are ignored, so a payload naming them has no effect.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct VariablePatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub scope: Option<String>,
    pub scope_id: Option<String>,
    pub props: Option<Props>,
}

impl VariablePatch {
    /// Decode the first JSON value of the payload; anything after it is ignored.
    /// A bare `null` decodes to an empty patch, an empty payload is an error.
    pub fn from_json(payload: &[u8]) -> Result<Self, ServiceError> {
        let mut values = serde_json::Deserializer::from_slice(payload).into_iter::<Option<VariablePatch>>();
        match values.next() {
            Some(Ok(patch)) => Ok(patch.unwrap_or_default()),
            Some(Err(e)) => Err(ServiceError::Decode(e.to_string())),
            None => Err(ServiceError::Decode("empty payload".into())),
        }
    }

    pub fn apply_to(self, target: &mut Variable) {
        fn set(slot: &mut String, v: Option<String>) {
            if let Some(v) = v { *slot = v; }
        }
        set(&mut target.id, self.id);
        set(&mut target.name, self.name);
        set(&mut target.description, self.description);
        set(&mut target.value, self.value);
        set(&mut target.kind, self.kind);
        set(&mut target.scope, self.scope);
        set(&mut target.scope_id, self.scope_id);
        if let Some(p) = self.props { target.props = p; }
    }
}

/// Result of an update, before the HTTP layer collapses it to a plain acknowledgement.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateOutcome {
    Updated { uid: String, records: Vec<Variable> },
    Undecodable { uid: String, reason: String },
    NotFound { uid: String },
}

impl UpdateOutcome {
    pub fn uid(&self) -> &str {
        match self {
            Self::Updated { uid, .. } | Self::Undecodable { uid, .. } | Self::NotFound { uid } => uid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Updated { .. } => "updated",
            Self::Undecodable { .. } => "undecodable",
            Self::NotFound { .. } => "not_found",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub uid: String,
    pub removed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Variable {
        Variable {
            id: "cpu".into(),
            uid: "u-1".into(),
            name: "CPU".into(),
            description: "d".into(),
            value: "1".into(),
            kind: "constant".into(),
            scope: "org".into(),
            scope_id: "1".into(),
            props: Props::from("{}"),
            created_by: "alice".into(),
            created_at: Some(Utc::now()),
            updated_by: String::new(),
            updated_at: None,
        }
    }

    #[test]
    fn variable_serializes_with_wire_names() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["type"], "constant");
        assert_eq!(v["scope_id"], "1");
        assert_eq!(v["props"], "{}");
        assert!(v["updated_at"].is_null());
        assert!(v.get("kind").is_none());
    }

    #[test]
    fn props_keep_raw_bytes() {
        let p = Props::from_bytes(b"not json {");
        assert_eq!(p.as_str(), "not json {");
        assert!(Props::from_bytes(b"").is_empty());
    }

    #[test]
    fn patch_overwrites_present_fields_only() {
        let mut v = sample();
        let patch = VariablePatch::from_json(br#"{"name":"n2","value":null,"uid":"evil","created_by":"mallory"}"#).unwrap();
        patch.apply_to(&mut v);
        assert_eq!(v.name, "n2");
        assert_eq!(v.value, "1");
        assert_eq!(v.uid, "u-1");
        assert_eq!(v.created_by, "alice");
    }

    #[test]
    fn patch_rejects_non_objects_and_type_mismatches() {
        assert!(VariablePatch::from_json(b"").is_err());
        assert!(VariablePatch::from_json(b"[1,2]").is_err());
        assert!(VariablePatch::from_json(br#"{"name": 5}"#).is_err());
        assert!(VariablePatch::from_json(b"   ").is_err());
        assert!(VariablePatch::from_json(b"null").is_ok());
    }

    #[test]
    fn patch_reads_only_the_first_json_value() {
        let mut v = sample();
        let patch = VariablePatch::from_json(br#"{"name":"n2"}{"name":"n3"}"#).unwrap();
        patch.apply_to(&mut v);
        assert_eq!(v.name, "n2");

        let patch = VariablePatch::from_json(b"{\"value\":\"9\"}\ntrailing garbage").unwrap();
        patch.apply_to(&mut v);
        assert_eq!(v.value, "9");
    }

    #[test]
    fn params_from_pairs_keep_first_value() {
        let pairs = vec![
            ("name", "a"),
            ("id", "x"),
            ("name", "b"),
            ("type", "constant"),
            ("scope", "team"),
            ("scope", "other"),
            ("unknown", "z"),
        ];
        let p = VariableParams::from_pairs(pairs);
        assert_eq!(p.name, "a");
        assert_eq!(p.id, "x");
        assert_eq!(p.kind, "constant");
        assert_eq!(p.scope.as_deref(), Some("team"));
        assert_eq!(p.description, "");
        assert_eq!(p.value, "");
    }

    #[test]
    fn params_default_missing_keys() {
        let p: VariableParams = serde_json::from_str(r#"{"name":"x","type":"query"}"#).unwrap();
        assert_eq!(p.name, "x");
        assert_eq!(p.kind, "query");
        assert_eq!(p.id, "");
        assert!(p.scope.is_none());
    }
}
