//! Shared building blocks for the variables service crates.
//! - `types`: small wire types shared by handlers and tests.
//! - `utils::logging`: tracing subscriber setup used by binaries and tests.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn status_ack_serializes_status_and_uid() {
        let ack = types::StatusAck::deleted("abc");
        let v = serde_json::to_value(&ack).unwrap();
        assert_eq!(v, serde_json::json!({"status": "deleted", "uid": "abc"}));

        let ack = types::StatusAck::updated("xyz");
        let v = serde_json::to_value(&ack).unwrap();
        assert_eq!(v["status"], "updated");
        assert_eq!(v["uid"], "xyz");
    }
}
