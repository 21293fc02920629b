//! Liveness and readiness response bodies.

use serde::Serialize;
use utoipa::ToSchema;

/// `GET /healthz` body: always `{"status":"alive"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LivenessResponse {
    /// Always `"alive"`.
    pub status: String,
}

impl LivenessResponse {
    /// The only liveness answer.
    #[must_use]
    pub fn alive() -> Self {
        Self {
            status: "alive".to_string(),
        }
    }
}

/// `GET /ready` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// `"ready"` or `"not_ready"`.
    pub status: String,
    /// Why the database check failed. Absent when ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReadinessResponse {
    /// Database reachable.
    #[must_use]
    pub fn ready() -> Self {
        Self {
            status: "ready".to_string(),
            error: None,
        }
    }

    /// Database check failed with `error`.
    #[must_use]
    pub fn not_ready(error: impl Into<String>) -> Self {
        Self {
            status: "not_ready".to_string(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liveness_shape() {
        let json = serde_json::to_value(LivenessResponse::alive()).ok();
        assert_eq!(json, Some(serde_json::json!({ "status": "alive" })));
    }

    #[test]
    fn ready_omits_error() {
        let json = serde_json::to_value(ReadinessResponse::ready()).ok();
        assert_eq!(json, Some(serde_json::json!({ "status": "ready" })));
    }

    #[test]
    fn not_ready_carries_error() {
        let json = serde_json::to_value(ReadinessResponse::not_ready("connection refused")).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "status": "not_ready", "error": "connection refused" }))
        );
    }
}
