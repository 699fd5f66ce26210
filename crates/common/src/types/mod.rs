use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Acknowledgement returned by mutating endpoints that never fail on a missing target.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusAck {
    pub status: String,
    pub uid: String,
}

impl StatusAck {
    pub fn updated(uid: impl Into<String>) -> Self {
        Self { status: "updated".into(), uid: uid.into() }
    }

    pub fn deleted(uid: impl Into<String>) -> Self {
        Self { status: "deleted".into(), uid: uid.into() }
    }
}
