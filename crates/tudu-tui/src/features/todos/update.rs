//! Dashboard reducer.

use crossterm::event::{KeyCode, KeyEvent};
use tudu_core::types::Todo;

use super::state::{TodoForm, append_todo, remove_todo, replace_todo};
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::state::AppState;

/// Handles a key press on the dashboard.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if app.todos.form.is_some() {
        handle_form_key(app, key)
    } else {
        handle_list_key(app, key)
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // The form freezes while its request is outstanding.
    if app.tasks.todo_create.is_running() || app.tasks.todo_update.is_running() {
        return vec![];
    }

    match key.code {
        KeyCode::Esc => {
            app.todos.form = None;
            vec![]
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            if let Some(form) = &mut app.todos.form {
                form.toggle_focus();
            }
            vec![]
        }
        KeyCode::Enter => submit_form(app),
        _ => {
            if let Some(form) = &mut app.todos.form {
                form.focused_mut().handle_key(key);
            }
            vec![]
        }
    }
}

fn submit_form(app: &mut AppState) -> Vec<UiEffect> {
    let (editing, title, description) = {
        let Some(form) = &app.todos.form else {
            return vec![];
        };
        (
            form.editing.clone(),
            form.title.value().trim().to_string(),
            form.description.value().trim().to_string(),
        )
    };

    if title.is_empty() {
        app.todos.error = Some("Title is required".to_string());
        return vec![];
    }

    app.todos.error = None;
    let effect = match editing {
        Some((id, completed)) => {
            let task = app.spawn(TaskKind::TodoUpdate);
            UiEffect::UpdateTodo {
                task,
                id,
                title,
                description,
                completed,
            }
        }
        None => {
            let task = app.spawn(TaskKind::TodoCreate);
            UiEffect::CreateTodo {
                task,
                title,
                description,
            }
        }
    };

    app.todos.form = None;
    vec![effect]
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Char('j') | KeyCode::Down => {
            app.todos.select_next();
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.todos.select_prev();
            vec![]
        }
        KeyCode::Char('n') => {
            app.todos.form = Some(TodoForm::create());
            vec![]
        }
        KeyCode::Char('e') => {
            if let Some(todo) = app.todos.selected_todo() {
                app.todos.form = Some(TodoForm::edit(todo));
            }
            vec![]
        }
        KeyCode::Char(' ') => toggle_selected(app),
        KeyCode::Char('d') => delete_selected(app),
        KeyCode::Char('r') => crate::update::fetch_todos(app),
        _ => vec![],
    }
}

/// Flips the selected todo's completed flag, resending its current
/// title and description (the API expects a full PUT).
fn toggle_selected(app: &mut AppState) -> Vec<UiEffect> {
    if app.tasks.todo_update.is_running() {
        return vec![];
    }
    let Some(todo) = app.todos.selected_todo() else {
        return vec![];
    };

    let (id, title, description, completed) = (
        todo.id.clone(),
        todo.title.clone(),
        todo.description.clone(),
        !todo.completed,
    );
    let task = app.spawn(TaskKind::TodoUpdate);
    vec![UiEffect::UpdateTodo {
        task,
        id,
        title,
        description,
        completed,
    }]
}

fn delete_selected(app: &mut AppState) -> Vec<UiEffect> {
    if app.tasks.todo_delete.is_running() {
        return vec![];
    }
    let Some(todo) = app.todos.selected_todo() else {
        return vec![];
    };

    let id = todo.id.clone();
    let task = app.spawn(TaskKind::TodoDelete);
    vec![UiEffect::DeleteTodo { task, id }]
}

/// Reconciles an API result into list state.
pub fn handle_result(app: &mut AppState, result: TodosResult) -> Vec<UiEffect> {
    match result {
        TodosResult::Fetched(Ok(items)) => {
            app.todos.items = items;
            app.todos.error = None;
            app.todos.clamp_selection();
        }
        TodosResult::Created(Ok(todo)) => {
            append_todo(&mut app.todos.items, todo);
            app.todos.error = None;
        }
        TodosResult::Updated(Ok(todo)) => {
            replace_todo(&mut app.todos.items, &todo);
            app.todos.error = None;
        }
        TodosResult::Deleted(Ok(id)) => {
            remove_todo(&mut app.todos.items, &id);
            app.todos.clamp_selection();
            app.todos.error = None;
        }
        TodosResult::Fetched(Err(message))
        | TodosResult::Created(Err(message))
        | TodosResult::Updated(Err(message))
        | TodosResult::Deleted(Err(message)) => {
            app.todos.error = Some(message);
        }
    }
    vec![]
}

/// The four list-mutating outcomes, unified for [`handle_result`].
#[derive(Debug)]
pub enum TodosResult {
    Fetched(Result<Vec<Todo>, String>),
    Created(Result<Todo, String>),
    Updated(Result<Todo, String>),
    Deleted(Result<String, String>),
}
