//! Request and response bodies of the MockTail API
//!
//! Field names follow the server's camelCase JSON.

use mocktail_core::{AuthorizedUser, TokenGrant};
use serde::{Deserialize, Serialize};

/// Email/password pair used by login and registration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: TokenGrant,
    pub authorized_user: AuthorizedUser,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub user_id: &'a str,
    pub refresh_token: &'a str,
}

/// Liveness report of a backend service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAvailability {
    pub service: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub key_words: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub templates: Vec<String>,
    #[serde(default)]
    pub with_mock_server: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of project create and update calls
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub title: String,
    #[serde(default)]
    pub key_words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub with_mock_server: bool,
}

/// Mock data template; `schema` is TypeScript type source
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub schema: String,
    #[serde(default)]
    pub key_words: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub related_project_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    pub name: String,
    pub schema: String,
    #[serde(default)]
    pub key_words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub related_project_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Number of records to generate
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccessTokenRequest {
    pub project_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_shape() {
        let response: LoginResponse = serde_json::from_value(json!({
            "accessToken": {"accessToken": "A", "expiresIn": 3600, "tokenType": "Bearer"},
            "authorizedUser": {"userName": "ada@example.com", "email": "ada@example.com", "id": "u-1"}
        }))
        .unwrap();

        assert_eq!(response.access_token.access_token, "A");
        assert_eq!(response.authorized_user.id, "u-1");
    }

    #[test]
    fn test_refresh_request_is_camel_case() {
        let body = serde_json::to_value(RefreshRequest {
            user_id: "u-1",
            refresh_token: "R",
        })
        .unwrap();
        assert_eq!(body, json!({"userId": "u-1", "refreshToken": "R"}));
    }
}
