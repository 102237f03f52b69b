use crate::domain::store::TodoStore;
use crate::domain::todo::{Todo, TodoId};

/// Snapshot of an existing todo taken when the user starts editing.
/// Mutating it has no remote effect until `submit` confirms the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub id: TodoId,
    pub title: String,
}

/// Display state. Mutually exclusive; derived with the precedence
/// loading > error > editing > idle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Editing(EditTarget),
    Error(String),
}

/// Mediates between user gestures and the store. The displayed list is
/// only ever replaced by a successful fetch; mutations are followed by a
/// full re-fetch rather than patched in locally, so the display cannot
/// diverge from the store.
pub struct TodoViewModel<S> {
    store: S,
    todos: Vec<Todo>,
    draft: String,
    edit: Option<EditTarget>,
    loading: bool,
    error: Option<String>,
    busy: bool,
}

impl<S: TodoStore> TodoViewModel<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            todos: Vec::new(),
            draft: String::new(),
            edit: None,
            loading: false,
            error: None,
            busy: false,
        }
    }

    pub fn state(&self) -> ViewState {
        if self.loading {
            ViewState::Loading
        } else if let Some(message) = &self.error {
            ViewState::Error(message.clone())
        } else if let Some(edit) = &self.edit {
            ViewState::Editing(edit.clone())
        } else {
            ViewState::Idle
        }
    }

    /// Last successfully fetched list.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Content of the primary input: the edit snapshot's title while
    /// editing, the draft otherwise.
    pub fn input(&self) -> &str {
        match &self.edit {
            Some(edit) => &edit.title,
            None => &self.draft,
        }
    }

    /// The Create/Update control is enabled exactly when the active
    /// input is non-empty.
    pub fn can_submit(&self) -> bool {
        !self.input().is_empty()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Mount / forced refresh. Also the recovery path out of `Error`.
    pub async fn refresh(&mut self) {
        if self.busy {
            tracing::debug!("refresh ignored, operation in flight");
            return;
        }
        self.busy = true;
        self.fetch_list().await;
        self.busy = false;
    }

    /// Keystroke: replace the active input's content.
    pub fn set_input(&mut self, text: impl Into<String>) {
        let text = text.into();
        match &mut self.edit {
            Some(edit) => edit.title = text,
            None => self.draft = text,
        }
    }

    pub fn push_input(&mut self, c: char) {
        match &mut self.edit {
            Some(edit) => edit.title.push(c),
            None => self.draft.push(c),
        }
    }

    pub fn pop_input(&mut self) {
        match &mut self.edit {
            Some(edit) => {
                edit.title.pop();
            }
            None => {
                self.draft.pop();
            }
        }
    }

    /// Start editing todo `id`. Only honored from `Idle`.
    pub fn begin_edit(&mut self, id: TodoId) {
        if self.state() != ViewState::Idle {
            tracing::debug!(%id, "edit ignored outside idle");
            return;
        }
        if let Some(todo) = self.todos.iter().find(|t| t.id == id) {
            self.edit = Some(EditTarget { id: todo.id, title: todo.title.clone() });
        }
    }

    /// Discard the edit snapshot. No remote effect.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Confirm the active input: update the edited todo, or create a new
    /// one from the draft. Ignored while another operation is in flight
    /// or when the active input is empty.
    pub async fn submit(&mut self) {
        if self.busy {
            tracing::debug!("submit ignored, operation in flight");
            return;
        }
        if !self.can_submit() {
            return;
        }
        self.busy = true;
        let result = match self.edit.clone() {
            Some(target) => {
                let result = self.store.update(target.id, &target.title).await;
                if result.is_ok() {
                    self.edit = None;
                }
                result
            }
            None => {
                let result = self.store.create(&self.draft).await;
                if result.is_ok() {
                    self.draft.clear();
                }
                result
            }
        };
        match result {
            Ok(()) => self.fetch_list().await,
            Err(err) => {
                tracing::warn!(%err, "submit failed");
                self.error = Some(err.to_string());
            }
        }
        self.busy = false;
    }

    /// Delete todo `id` and re-fetch. Honored from any state.
    pub async fn remove(&mut self, id: TodoId) {
        if self.busy {
            tracing::debug!(%id, "remove ignored, operation in flight");
            return;
        }
        self.busy = true;
        match self.store.delete(id).await {
            Ok(()) => self.fetch_list().await,
            Err(err) => {
                tracing::warn!(%err, "remove failed");
                self.error = Some(err.to_string());
            }
        }
        self.busy = false;
    }

    async fn fetch_list(&mut self) {
        self.loading = true;
        match self.store.list().await {
            Ok(todos) => {
                self.todos = todos;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(%err, "list failed");
                // The stale list stays in memory but the error replaces
                // the display until the next user-initiated operation.
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }
}
