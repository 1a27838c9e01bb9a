//! Project access token list state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// API token scoped to a project
///
/// `token` carries the secret value and is only present in the create
/// response; listings never include it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAccessToken {
    #[serde(alias = "id")]
    pub token_id: String,
    pub name: String,
    pub project_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

const fn active_by_default() -> bool {
    true
}

/// Ascending expiry; tokens that never expire go last
fn by_expiry(a: &ProjectAccessToken, b: &ProjectAccessToken) -> Ordering {
    match (a.expires_at, b.expires_at) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Change to the token list, applied to whatever the list holds at the time
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessTokenAction {
    Created(ProjectAccessToken),
    Acknowledged(String),
    Removed(String),
}

/// Tokens shown on the project access token page
///
/// Newly created tokens keep their secret visible until acknowledged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessTokenList {
    tokens: Vec<ProjectAccessToken>,
    newly_created: HashSet<String>,
}

impl AccessTokenList {
    /// Build the list from a server listing
    pub fn from_fetched(mut tokens: Vec<ProjectAccessToken>) -> Self {
        tokens.sort_by(by_expiry);
        Self {
            tokens,
            newly_created: HashSet::new(),
        }
    }

    /// Add a token returned by the create call and mark it as new
    pub fn insert_created(&mut self, token: ProjectAccessToken) {
        self.newly_created.insert(token.token_id.clone());
        self.tokens.push(token);
        self.tokens.sort_by(by_expiry);
    }

    /// Hide the secret of a new token
    pub fn acknowledge(&mut self, token_id: &str) {
        self.newly_created.remove(token_id);
        if let Some(token) = self.tokens.iter_mut().find(|t| t.token_id == token_id) {
            token.token = None;
        }
    }

    /// Remove a deleted token, returning it if present
    pub fn remove(&mut self, token_id: &str) -> Option<ProjectAccessToken> {
        self.newly_created.remove(token_id);
        let index = self.tokens.iter().position(|t| t.token_id == token_id)?;
        Some(self.tokens.remove(index))
    }

    pub fn apply(&mut self, action: AccessTokenAction) {
        match action {
            AccessTokenAction::Created(token) => self.insert_created(token),
            AccessTokenAction::Acknowledged(token_id) => self.acknowledge(&token_id),
            AccessTokenAction::Removed(token_id) => {
                self.remove(&token_id);
            }
        }
    }

    pub fn is_new(&self, token_id: &str) -> bool {
        self.newly_created.contains(token_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectAccessToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn token(id: &str, expires_day: Option<u32>) -> ProjectAccessToken {
        ProjectAccessToken {
            token_id: id.to_string(),
            name: format!("token {id}"),
            project_id: "p-1".to_string(),
            created_at: None,
            expires_at: expires_day.map(|day| Utc.with_ymd_and_hms(2030, 1, day, 0, 0, 0).unwrap()),
            is_active: true,
            token: None,
        }
    }

    fn ids(list: &AccessTokenList) -> Vec<&str> {
        list.iter().map(|t| t.token_id.as_str()).collect()
    }

    #[test]
    fn test_fetched_tokens_sorted_with_no_expiry_last() {
        let list = AccessTokenList::from_fetched(vec![
            token("forever", None),
            token("late", Some(20)),
            token("soon", Some(2)),
        ]);
        assert_eq!(ids(&list), vec!["soon", "late", "forever"]);
    }

    #[test]
    fn test_created_token_is_inserted_in_expiry_order() {
        let mut list = AccessTokenList::from_fetched(vec![
            token("a", Some(5)),
            token("b", Some(15)),
            token("c", None),
        ]);

        let mut created = token("new", Some(10));
        created.token = Some("secret".to_string());
        list.insert_created(created);

        assert_eq!(ids(&list), vec!["a", "new", "b", "c"]);
        assert!(list.is_new("new"));
        assert!(!list.is_new("a"));

        list.insert_created(token("unbounded", None));
        assert_eq!(ids(&list).last(), Some(&"unbounded"));
    }

    #[test]
    fn test_acknowledge_strips_secret() {
        let mut list = AccessTokenList::default();
        let mut created = token("new", Some(1));
        created.token = Some("secret".to_string());
        list.insert_created(created);

        list.acknowledge("new");

        assert!(!list.is_new("new"));
        assert!(list.iter().all(|t| t.token.is_none()));
    }

    #[test]
    fn test_remove_drops_token_and_new_marker() {
        let mut list = AccessTokenList::default();
        list.insert_created(token("new", Some(1)));

        assert!(list.remove("new").is_some());
        assert!(list.remove("new").is_none());
        assert!(list.is_empty());
        assert!(!list.is_new("new"));
    }

    #[test]
    fn test_token_created_while_delete_pending_survives() {
        let mut list = AccessTokenList::from_fetched(vec![token("old", Some(3))]);
        let mut created = token("fresh", Some(9));
        created.token = Some("secret".to_string());

        // The create response lands before the delete response
        list.apply(AccessTokenAction::Created(created));
        list.apply(AccessTokenAction::Removed("old".to_string()));

        assert_eq!(ids(&list), vec!["fresh"]);
        assert!(list.is_new("fresh"));
        assert_eq!(list.iter().next().and_then(|t| t.token.as_deref()), Some("secret"));

        list.apply(AccessTokenAction::Acknowledged("fresh".to_string()));
        assert!(list.iter().all(|t| t.token.is_none()));
    }

    #[test]
    fn test_listing_uses_id_alias() {
        let parsed: ProjectAccessToken = serde_json::from_str(
            r#"{"id":"t-1","name":"ci","projectId":"p-1","createdAt":"2030-01-01T00:00:00Z","expiresAt":null,"isActive":false}"#,
        )
        .unwrap();
        assert_eq!(parsed.token_id, "t-1");
        assert!(!parsed.is_active);
        assert!(parsed.expires_at.is_none());
    }
}
