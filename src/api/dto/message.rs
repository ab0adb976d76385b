//! Success envelope for mutation endpoints.

use serde::Serialize;

/// `{message, id?}` confirmation returned by create/update/delete.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Cat added")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 7)]
    pub id: Option<i32>,
}

impl MessageResponse {
    /// Confirmation without a subject id.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    /// Confirmation carrying the affected resource id.
    pub fn with_id(message: impl Into<String>, id: i32) -> Self {
        Self {
            message: message.into(),
            id: Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_omitted_when_absent() {
        let json = serde_json::to_value(MessageResponse::new("User modified")).unwrap();
        assert_eq!(json, serde_json::json!({"message": "User modified"}));
    }

    #[test]
    fn test_id_is_carried_when_present() {
        let json = serde_json::to_value(MessageResponse::with_id("Cat added", 7)).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Cat added", "id": 7}));
    }
}
