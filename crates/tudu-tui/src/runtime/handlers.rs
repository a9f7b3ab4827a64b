//! Effect handler implementations.
//!
//! Handlers are pure async functions: they take what they need by
//! value, perform one API call, and return the `UiEvent` carrying the
//! result. The runtime owns spawning and delivery.

use std::sync::Arc;

use tudu_core::api::ApiClient;
use tudu_core::session::Session;

use crate::events::UiEvent;
use crate::features::auth::AuthMode;

/// Validates a persisted token by fetching the current user.
pub async fn restore_session(client: Arc<ApiClient>, token: String) -> UiEvent {
    let result = client.current_user(&token).await.map_err(|e| e.to_string());
    UiEvent::SessionRestored(result)
}

/// Logs in or signs up, building the session from the response.
pub async fn authenticate(
    client: Arc<ApiClient>,
    mode: AuthMode,
    email: String,
    password: String,
    name: Option<String>,
) -> UiEvent {
    let result = match mode {
        AuthMode::Login => client.login(&email, &password).await,
        AuthMode::Signup => client.signup(&email, &password, name.as_deref()).await,
    };

    UiEvent::AuthFinished {
        mode,
        result: result
            .map(|auth| Session::new(auth.user, auth.token))
            .map_err(|e| e.to_string()),
    }
}

pub async fn fetch_todos(client: Arc<ApiClient>, token: String) -> UiEvent {
    let result = client.list_todos(&token).await.map_err(|e| e.to_string());
    UiEvent::TodosFetched(result)
}

pub async fn create_todo(
    client: Arc<ApiClient>,
    token: String,
    title: String,
    description: String,
) -> UiEvent {
    let result = client
        .create_todo(&token, &title, &description)
        .await
        .map_err(|e| e.to_string());
    UiEvent::TodoCreated(result)
}

pub async fn update_todo(
    client: Arc<ApiClient>,
    token: String,
    id: String,
    title: String,
    description: String,
    completed: bool,
) -> UiEvent {
    let result = client
        .update_todo(&token, &id, &title, &description, completed)
        .await
        .map_err(|e| e.to_string());
    UiEvent::TodoUpdated(result)
}

/// Deletes a todo; the success payload is the deleted id so the
/// reducer can reconcile the list.
pub async fn delete_todo(client: Arc<ApiClient>, token: String, id: String) -> UiEvent {
    let result = client
        .delete_todo(&token, &id)
        .await
        .map(|()| id)
        .map_err(|e| e.to_string());
    UiEvent::TodoDeleted(result)
}
