//! Request context supplied by the upstream auth layer.
//!
//! The acting principal arrives in `X-User-Uid` and the organization in `X-Org-Id`.
//! A missing org falls back to `variables.default_org_id`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use service::variables::Actor;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const USER_UID_HEADER: &str = "X-User-Uid";
pub const ORG_ID_HEADER: &str = "X-Org-Id";

#[derive(Debug, Clone)]
pub struct RequestContext(pub Actor);

#[async_trait]
impl FromRequestParts<ServerState> for RequestContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
        };

        let user_uid = header(USER_UID_HEADER).unwrap_or_default();
        let org_id = match header(ORG_ID_HEADER) {
            Some(raw) if !raw.is_empty() => raw.parse::<i64>().map_err(|_| {
                tracing::warn!(org_id = %raw, "invalid X-Org-Id header");
                ApiError::BadRequest(format!("invalid {ORG_ID_HEADER}: {raw}"))
            })?,
            _ => state.settings.default_org_id,
        };

        Ok(RequestContext(Actor::new(user_uid, org_id)))
    }
}
