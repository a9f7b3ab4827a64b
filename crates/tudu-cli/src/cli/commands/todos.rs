//! Todo command handlers.

use anyhow::{Context, Result, anyhow};
use tudu_core::api::ApiClient;
use tudu_core::config::Config;
use tudu_core::session::{Session, SessionStore};
use tudu_core::types::Todo;

fn require_session(store: &SessionStore) -> Result<Session> {
    store
        .load()?
        .ok_or_else(|| anyhow!("Not logged in. Run `tudu login --email <EMAIL> --password <PASSWORD>` first."))
}

fn print_todo(todo: &Todo) {
    let check = if todo.completed { "x" } else { " " };
    if todo.description.is_empty() {
        println!("[{check}] {}  {}", todo.id, todo.title);
    } else {
        println!("[{check}] {}  {} — {}", todo.id, todo.title, todo.description);
    }
}

pub async fn list(config: &Config, store: &SessionStore) -> Result<()> {
    let session = require_session(store)?;
    let todos = ApiClient::from_config(config)
        .list_todos(&session.token)
        .await?;

    if todos.is_empty() {
        println!("No todos.");
        return Ok(());
    }
    for todo in &todos {
        print_todo(todo);
    }
    Ok(())
}

pub async fn add(
    config: &Config,
    store: &SessionStore,
    title: &str,
    description: &str,
) -> Result<()> {
    let session = require_session(store)?;
    let todo = ApiClient::from_config(config)
        .create_todo(&session.token, title, description)
        .await?;

    println!("Added {} ({})", todo.title, todo.id);
    Ok(())
}

/// Fetches the current item so the PUT carries its title/description
/// unchanged; the API expects the full body.
async fn find_todo(client: &ApiClient, token: &str, id: &str) -> Result<Todo> {
    let todos = client.list_todos(token).await?;
    todos
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow!("No todo with id {id}"))
}

pub async fn set_completed(
    config: &Config,
    store: &SessionStore,
    id: &str,
    completed: bool,
) -> Result<()> {
    let session = require_session(store)?;
    let client = ApiClient::from_config(config);

    let todo = find_todo(&client, &session.token, id).await?;
    let updated = client
        .update_todo(
            &session.token,
            id,
            &todo.title,
            &todo.description,
            completed,
        )
        .await
        .context("update todo")?;

    if completed {
        println!("Completed {}", updated.title);
    } else {
        println!("Reopened {}", updated.title);
    }
    Ok(())
}

pub async fn edit(
    config: &Config,
    store: &SessionStore,
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    if title.is_none() && description.is_none() {
        anyhow::bail!("Nothing to change: pass --title and/or --description");
    }

    let session = require_session(store)?;
    let client = ApiClient::from_config(config);

    let todo = find_todo(&client, &session.token, id).await?;
    let updated = client
        .update_todo(
            &session.token,
            id,
            title.unwrap_or(&todo.title),
            description.unwrap_or(&todo.description),
            todo.completed,
        )
        .await
        .context("update todo")?;

    print_todo(&updated);
    Ok(())
}

pub async fn rm(config: &Config, store: &SessionStore, id: &str) -> Result<()> {
    let session = require_session(store)?;
    ApiClient::from_config(config)
        .delete_todo(&session.token, id)
        .await?;

    println!("Deleted {id}");
    Ok(())
}
