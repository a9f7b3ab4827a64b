//! Wire types shared between the API client and the UI layers.

use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl User {
    /// Display name for greetings: the name when present, else the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// A to-do item. Owned by the API; the client only caches it.
///
/// Some deployments of the API name the identifier `_id`; both
/// spellings are accepted on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Successful response from `POST /auth/login` and `POST /auth/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Successful response from `GET /auth/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub user: User,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

/// Body of `POST /todos`.
#[derive(Debug, Serialize)]
pub struct TodoDraft<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// Body of `PUT /todos/:id`. The API expects the full item, so toggling
/// `completed` resends the current title and description.
#[derive(Debug, Serialize)]
pub struct TodoUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_accepts_mongo_style_id() {
        let todo: Todo =
            serde_json::from_str(r#"{"_id":"abc123","title":"Milk","description":"2l"}"#).unwrap();
        assert_eq!(todo.id, "abc123");
        assert!(!todo.completed);
    }

    #[test]
    fn todo_accepts_plain_id() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":"42","title":"Milk","description":"","completed":true}"#)
                .unwrap();
        assert_eq!(todo.id, "42");
        assert!(todo.completed);
    }

    #[test]
    fn signup_request_omits_missing_name() {
        let body = serde_json::to_string(&SignupRequest {
            email: "a@b.c",
            password: "pw",
            name: None,
        })
        .unwrap();
        assert!(!body.contains("name"));
    }

    #[test]
    fn user_display_name_prefers_name() {
        let user = User {
            email: "a@b.c".into(),
            name: Some("Ada".into()),
        };
        assert_eq!(user.display_name(), "Ada");

        let anon = User {
            email: "a@b.c".into(),
            name: None,
        };
        assert_eq!(anon.display_name(), "a@b.c");
    }
}
