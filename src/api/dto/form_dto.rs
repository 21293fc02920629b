//! Submission form payload.

use serde::Deserialize;
use utoipa::ToSchema;

/// Body of `POST /submit` (`application/x-www-form-urlencoded`).
///
/// `value` is required; any string, including the empty one, is accepted.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmitForm {
    /// Text to store.
    pub value: String,
}
