//! To-do list state and reconciliation.
//!
//! The API owns the data; this is a transient cached copy. Each
//! mutation round-trips through the API and the response reconciles
//! the cache: create appends, update replaces the matching id, delete
//! removes it. Nothing else is touched.

use tudu_core::types::Todo;

use crate::common::TextField;

/// Form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoFormField {
    Title,
    Description,
}

/// The create/edit form, shown as an overlay over the list.
#[derive(Debug)]
pub struct TodoForm {
    /// `Some((id, completed))` when editing an existing todo.
    pub editing: Option<(String, bool)>,
    pub title: TextField,
    pub description: TextField,
    pub focus: TodoFormField,
}

impl TodoForm {
    /// Blank form for creating a todo.
    pub fn create() -> Self {
        Self {
            editing: None,
            title: TextField::new(),
            description: TextField::new(),
            focus: TodoFormField::Title,
        }
    }

    /// Form pre-filled from an existing todo.
    pub fn edit(todo: &Todo) -> Self {
        let mut title = TextField::new();
        title.set_value(&todo.title);
        let mut description = TextField::new();
        description.set_value(&todo.description);
        Self {
            editing: Some((todo.id.clone(), todo.completed)),
            title,
            description,
            focus: TodoFormField::Title,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            TodoFormField::Title => &mut self.title,
            TodoFormField::Description => &mut self.description,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            TodoFormField::Title => TodoFormField::Description,
            TodoFormField::Description => TodoFormField::Title,
        };
    }
}

/// Dashboard state.
#[derive(Debug, Default)]
pub struct TodosState {
    pub items: Vec<Todo>,
    pub selected: usize,
    /// Inline error shown under the list.
    pub error: Option<String>,
    pub form: Option<TodoForm>,
}

impl TodosState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops everything (logout, failed session restore).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the selection inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        if self.items.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.items.len() - 1);
        }
    }
}

/// Appends a freshly created todo.
pub fn append_todo(items: &mut Vec<Todo>, todo: Todo) {
    items.push(todo);
}

/// Replaces the entry matching the updated todo's id; every other
/// entry is left untouched. An unknown id is a no-op.
pub fn replace_todo(items: &mut [Todo], updated: &Todo) {
    if let Some(slot) = items.iter_mut().find(|t| t.id == updated.id) {
        *slot = updated.clone();
    }
}

/// Removes the entry with the matching id and no other.
pub fn remove_todo(items: &mut Vec<Todo>, id: &str) {
    items.retain(|t| t.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, title: &str, completed: bool) -> Todo {
        Todo {
            id: id.into(),
            title: title.into(),
            description: format!("{title} description"),
            completed,
        }
    }

    #[test]
    fn append_adds_exactly_one_entry() {
        let mut items = vec![todo("a", "Milk", false)];
        append_todo(&mut items, todo("b", "Eggs", false));

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "b");
        assert!(!items[1].completed);
    }

    #[test]
    fn replace_changes_only_the_matching_id() {
        let mut items = vec![
            todo("a", "Milk", false),
            todo("b", "Eggs", false),
            todo("c", "Bread", true),
        ];
        let before_a = items[0].clone();
        let before_c = items[2].clone();

        replace_todo(&mut items, &todo("b", "Eggs", true));

        assert!(items[1].completed);
        assert_eq!(items[0], before_a);
        assert_eq!(items[2], before_c);
    }

    #[test]
    fn replace_with_unknown_id_is_a_noop() {
        let mut items = vec![todo("a", "Milk", false)];
        let before = items.clone();
        replace_todo(&mut items, &todo("zzz", "Ghost", true));
        assert_eq!(items, before);
    }

    #[test]
    fn remove_deletes_exactly_the_matching_entry() {
        let mut items = vec![
            todo("a", "Milk", false),
            todo("b", "Eggs", false),
            todo("c", "Bread", true),
        ];
        remove_todo(&mut items, "b");

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|t| t.id != "b"));
        assert_eq!(items[0].id, "a");
        assert_eq!(items[1].id, "c");
    }

    #[test]
    fn selection_clamps_after_shrink() {
        let mut state = TodosState::new();
        state.items = vec![todo("a", "Milk", false), todo("b", "Eggs", false)];
        state.selected = 1;

        remove_todo(&mut state.items, "b");
        state.clamp_selection();
        assert_eq!(state.selected, 0);

        remove_todo(&mut state.items, "a");
        state.clamp_selection();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn edit_form_is_prefilled() {
        let t = todo("a", "Milk", true);
        let form = TodoForm::edit(&t);
        assert_eq!(form.title.value(), "Milk");
        assert_eq!(form.description.value(), "Milk description");
        assert_eq!(form.editing, Some(("a".to_string(), true)));
    }
}
