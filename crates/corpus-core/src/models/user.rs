//! User profile as returned by `GET /auth/me`.
//!
//! The server's record shape is not fixed, so the raw JSON is normalized once
//! after fetch into a [`UserProfile`] with a single required identifier.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;

/// Keys that may carry the user's identifier, highest priority first.
pub const USER_ID_KEYS: [&str; 5] = ["uid", "id", "_id", "uuid", "user_id"];

/// Canonical, normalized user profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub user_id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Record exactly as the server sent it.
    pub raw: JsonValue,
}

impl UserProfile {
    /// Normalize a raw profile record.
    ///
    /// The first identifier key holding a truthy value wins; that value must
    /// be a string, otherwise the profile has no usable identifier.
    pub fn from_value(raw: JsonValue) -> Result<Self, AppError> {
        if !raw.is_object() {
            return Err(AppError::InvalidResponse(
                "user profile is not a JSON object".to_string(),
            ));
        }

        let user_id = USER_ID_KEYS
            .iter()
            .filter_map(|key| raw.get(*key))
            .find(|value| is_truthy(value))
            .and_then(|value| value.as_str())
            .map(str::to_string)
            .ok_or(AppError::MissingUserId)?;

        Ok(Self {
            user_id,
            name: string_field(&raw, "name"),
            phone: string_field(&raw, "phone"),
            email: string_field(&raw, "email"),
            raw,
        })
    }

    /// Name for the welcome line: name, then phone, then "User".
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.phone.as_deref())
            .unwrap_or("User")
    }
}

fn string_field(raw: &JsonValue, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uid_takes_priority() {
        let profile = UserProfile::from_value(json!({
            "uid": "u-1",
            "id": "i-1",
            "name": "Asha",
        }))
        .unwrap();
        assert_eq!(profile.user_id, "u-1");
        assert_eq!(profile.display_name(), "Asha");
    }

    #[test]
    fn falls_through_empty_and_null_keys() {
        let profile = UserProfile::from_value(json!({
            "uid": "",
            "id": null,
            "user_id": "abc",
            "phone": "9999999999",
        }))
        .unwrap();
        assert_eq!(profile.user_id, "abc");
        assert_eq!(profile.display_name(), "9999999999");
        assert_eq!(profile.email, None);
    }

    #[test]
    fn non_string_identifier_is_rejected() {
        let err = UserProfile::from_value(json!({ "id": 42, "user_id": "abc" })).unwrap_err();
        assert!(matches!(err, AppError::MissingUserId));
    }

    #[test]
    fn missing_identifier_is_rejected() {
        let err = UserProfile::from_value(json!({ "name": "Asha" })).unwrap_err();
        assert!(matches!(err, AppError::MissingUserId));
        assert_eq!(err.to_string(), "Invalid or missing user ID.");
    }

    #[test]
    fn non_object_is_invalid_response() {
        let err = UserProfile::from_value(json!(["uid"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidResponse(_)));
    }

    #[test]
    fn display_name_defaults_to_user() {
        let profile = UserProfile::from_value(json!({ "_id": "x" })).unwrap();
        assert_eq!(profile.display_name(), "User");
    }
}
