//! Async task lifecycle tracking.
//!
//! Each API-backed operation gets a task id when spawned. The reducer
//! records the active id per operation kind and drops completions whose
//! id is no longer active (stale results from an operation the user has
//! since superseded).

use crate::events::UiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Restore,
    Auth,
    TodosFetch,
    TodoCreate,
    TodoUpdate,
    TodoDelete,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted {
    pub id: TaskId,
    pub result: Box<UiEvent>,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub restore: TaskState,
    pub auth: TaskState,
    pub todos_fetch: TaskState,
    pub todo_create: TaskState,
    pub todo_update: TaskState,
    pub todo_delete: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Restore => &mut self.restore,
            TaskKind::Auth => &mut self.auth,
            TaskKind::TodosFetch => &mut self.todos_fetch,
            TaskKind::TodoCreate => &mut self.todo_create,
            TaskKind::TodoUpdate => &mut self.todo_update,
            TaskKind::TodoDelete => &mut self.todo_delete,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.restore.is_running()
            || self.auth.is_running()
            || self.todos_fetch.is_running()
            || self.todo_create.is_running()
            || self.todo_update.is_running()
            || self.todo_delete.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_completion_is_rejected() {
        let mut state = TaskState::default();
        state.on_started(&TaskStarted { id: TaskId(1) });

        assert!(!state.finish_if_active(TaskId(0)));
        assert!(state.is_running());

        assert!(state.finish_if_active(TaskId(1)));
        assert!(!state.is_running());
    }

    #[test]
    fn task_seq_is_monotonic() {
        let mut seq = TaskSeq::default();
        let a = seq.next_id();
        let b = seq.next_id();
        assert_ne!(a, b);
    }
}
