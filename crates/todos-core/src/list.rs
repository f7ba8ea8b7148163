//! The todo list controller.
//!
//! Owns the in-memory collection and the dialog state, and writes the full
//! collection back to the store after every mutation so the two never drift.

use crate::dialog::DialogState;
use crate::error::{Error, Result};
use crate::models::{Todo, TodoDraft};
use crate::store::{StorageBackend, TodoStore};

/// In-memory todo collection kept in sync with a [`TodoStore`].
#[derive(Debug)]
pub struct TodoList<B> {
    store: TodoStore<B>,
    todos: Vec<Todo>,
    dialog: DialogState,
}

impl<B: StorageBackend> TodoList<B> {
    /// Seed the store if it has no snapshot, then load it.
    pub fn initialize(mut store: TodoStore<B>) -> Result<Self> {
        store.ensure_seeded()?;
        let todos = store.load_all()?;
        tracing::info!("Loaded {} todos", todos.len());

        Ok(Self {
            store,
            todos,
            dialog: DialogState::Closed,
        })
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn store(&self) -> &TodoStore<B> {
        &self.store
    }

    /// The record targeted by an edit dialog, if one is open.
    pub fn editing(&self) -> Option<&Todo> {
        self.dialog.target().and_then(|id| self.get(id))
    }

    pub fn open_create(&mut self) {
        self.dialog = DialogState::Creating;
    }

    /// Open the dialog on an existing record.
    ///
    /// Leaves the dialog untouched if `id` is unknown.
    pub fn open_edit(&mut self, id: &str) -> Result<&Todo> {
        let Some(index) = self.position(id) else {
            tracing::warn!("Cannot edit unknown todo {}", id);
            return Err(Error::NotFound(id.to_string()));
        };
        self.dialog = DialogState::Editing { id: id.to_string() };
        Ok(&self.todos[index])
    }

    pub fn close_dialog(&mut self) {
        self.dialog = DialogState::Closed;
    }

    /// Remove the record with `id`, if present, and persist.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let previous = self.todos.clone();
        self.todos.retain(|todo| todo.id != id);
        if let Err(e) = self.persist() {
            self.todos = previous;
            return Err(e);
        }
        tracing::debug!("Deleted todo {}", id);
        Ok(())
    }

    /// Append a new record built from `draft` and close the dialog.
    pub fn submit_create(&mut self, draft: TodoDraft) -> Result<Todo> {
        let todo = Todo::from_draft(draft);
        self.todos.push(todo.clone());
        if let Err(e) = self.persist() {
            self.todos.pop();
            return Err(e);
        }
        self.dialog = DialogState::Closed;
        tracing::debug!("Created todo {}", todo.id);
        Ok(todo)
    }

    /// Replace name and description of the record being edited.
    ///
    /// Nothing is written unless the dialog is editing a record that still
    /// exists.
    pub fn submit_update(&mut self, draft: TodoDraft) -> Result<Todo> {
        let id = self.dialog.target().ok_or(Error::NotEditing)?.to_string();
        let index = self
            .position(&id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        let previous = self.todos[index].clone();
        self.todos[index].apply(draft);
        if let Err(e) = self.persist() {
            self.todos[index] = previous;
            return Err(e);
        }
        self.dialog = DialogState::Closed;
        tracing::debug!("Updated todo {}", id);
        Ok(self.todos[index].clone())
    }

    /// Create or update depending on the dialog mode.
    pub fn submit(&mut self, draft: TodoDraft) -> Result<Todo> {
        match self.dialog {
            DialogState::Closed => Err(Error::DialogClosed),
            DialogState::Creating => self.submit_create(draft),
            DialogState::Editing { .. } => self.submit_update(draft),
        }
    }

    /// Flip the completion flag of `id` and persist. Returns the new value.
    pub fn toggle_completed(&mut self, id: &str) -> Result<bool> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let todo = &mut self.todos[index];
        todo.completed = !todo.completed;
        let completed = todo.completed;
        if let Err(e) = self.persist() {
            self.todos[index].completed = !completed;
            return Err(e);
        }
        tracing::debug!("Todo {} completed={}", id, completed);
        Ok(completed)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save_all(&self.todos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_todos;
    use crate::store::{MemoryBackend, DEFAULT_KEY};
    use std::io;

    fn seeded() -> TodoList<MemoryBackend> {
        TodoList::initialize(TodoStore::new(MemoryBackend::new())).unwrap()
    }

    fn with_todos(todos: &[Todo]) -> TodoList<MemoryBackend> {
        let raw = serde_json::to_string(todos).unwrap();
        TodoList::initialize(TodoStore::new(MemoryBackend::with_entry(DEFAULT_KEY, raw)))
            .unwrap()
    }

    fn persisted(list: &TodoList<MemoryBackend>) -> Vec<Todo> {
        list.store().load_all().unwrap()
    }

    fn todo(id: &str, name: &str, description: &str, completed: bool) -> Todo {
        Todo {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            completed,
        }
    }

    /// Backend whose writes always fail.
    #[derive(Default)]
    struct ReadOnly(MemoryBackend);

    impl StorageBackend for ReadOnly {
        fn get(&self, key: &str) -> io::Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn initialize_seeds_empty_store() {
        let list = seeded();
        assert_eq!(list.todos(), default_todos().as_slice());
        assert_eq!(persisted(&list), default_todos());
        assert_eq!(list.dialog(), &DialogState::Closed);
    }

    #[test]
    fn initialize_keeps_existing_snapshot() {
        let existing = vec![todo("a", "Alpha", "First", false)];
        let list = with_todos(&existing);
        assert_eq!(list.todos(), existing.as_slice());
    }

    #[test]
    fn initialize_keeps_empty_snapshot_unseeded() {
        let list = with_todos(&[]);
        assert!(list.is_empty());
    }

    #[test]
    fn create_appends_and_persists() {
        let mut list = seeded();
        let before = list.len();
        list.open_create();

        let created = list.submit_create(TodoDraft::new("A", "AB")).unwrap();

        assert_eq!(list.len(), before + 1);
        let last = list.todos().last().unwrap();
        assert_eq!(last, &created);
        assert_eq!(last.name, "A");
        assert_eq!(last.description, "AB");
        assert!(!last.completed);
        assert!(default_todos().iter().all(|t| t.id != last.id));
        assert_eq!(persisted(&list), list.todos());
        assert_eq!(list.dialog(), &DialogState::Closed);
    }

    #[test]
    fn update_preserves_identity_and_neighbours() {
        let mut list = with_todos(&[
            todo("a", "Alpha", "First", false),
            todo("x", "old", "old desc", true),
            todo("b", "Beta", "Second", false),
        ]);
        list.open_edit("x").unwrap();

        let updated = list.submit_update(TodoDraft::new("new", "new desc")).unwrap();

        assert_eq!(updated, todo("x", "new", "new desc", true));
        assert_eq!(
            list.todos(),
            &[
                todo("a", "Alpha", "First", false),
                todo("x", "new", "new desc", true),
                todo("b", "Beta", "Second", false),
            ]
        );
        assert_eq!(persisted(&list), list.todos());
        assert_eq!(list.dialog(), &DialogState::Closed);
    }

    #[test]
    fn delete_missing_id_is_noop_but_persists() {
        let mut list = seeded();
        let before = list.todos().to_vec();

        list.delete("nope").unwrap();

        assert_eq!(list.todos(), before.as_slice());
        assert_eq!(persisted(&list), before);
    }

    #[test]
    fn delete_removes_only_matching_record() {
        let mut list = seeded();
        list.delete("todo1").unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list.todos()[0].id, "todo2");
        assert_eq!(persisted(&list), list.todos());
    }

    #[test]
    fn open_edit_unknown_id_fails_without_opening() {
        let mut list = seeded();
        let err = list.open_edit("missing").unwrap_err();

        assert!(matches!(err, Error::NotFound(id) if id == "missing"));
        assert_eq!(list.dialog(), &DialogState::Closed);
    }

    #[test]
    fn update_of_vanished_record_writes_nothing() {
        let mut list = seeded();
        list.open_edit("todo1").unwrap();
        list.todos.retain(|t| t.id != "todo1");

        let err = list.submit_update(TodoDraft::new("new", "new desc")).unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(persisted(&list), default_todos());
    }

    #[test]
    fn update_without_edit_dialog_is_rejected() {
        let mut list = seeded();
        list.open_create();

        let err = list.submit_update(TodoDraft::new("new", "new desc")).unwrap_err();
        assert!(matches!(err, Error::NotEditing));
        assert_eq!(list.todos(), default_todos().as_slice());
    }

    #[test]
    fn submit_dispatches_on_dialog_mode() {
        let mut list = seeded();
        assert!(matches!(
            list.submit(TodoDraft::new("aa", "bb")),
            Err(Error::DialogClosed)
        ));

        list.open_create();
        list.submit(TodoDraft::new("aa", "bb")).unwrap();
        assert_eq!(list.len(), 3);

        list.open_edit("todo2").unwrap();
        list.submit(TodoDraft::new("cc", "dd")).unwrap();
        assert_eq!(list.get("todo2").unwrap().name, "cc");
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn editing_returns_target_record() {
        let mut list = seeded();
        assert!(list.editing().is_none());
        list.open_edit("todo2").unwrap();
        assert_eq!(list.editing().unwrap().name, "Todo 2");
        list.close_dialog();
        assert!(list.editing().is_none());
    }

    #[test]
    fn toggle_completed_flips_and_persists() {
        let mut list = seeded();
        assert!(list.toggle_completed("todo1").unwrap());
        assert!(list.get("todo1").unwrap().completed);
        assert_eq!(persisted(&list), list.todos());

        assert!(!list.toggle_completed("todo1").unwrap());
        assert!(matches!(
            list.toggle_completed("missing"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn failed_write_rolls_back_memory() {
        let raw = serde_json::to_string(&default_todos()).unwrap();
        let backend = ReadOnly(MemoryBackend::with_entry(DEFAULT_KEY, raw));
        let mut list = TodoList::initialize(TodoStore::new(backend)).unwrap();

        list.open_create();
        let err = list.submit_create(TodoDraft::new("aa", "bb")).unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
        assert_eq!(list.todos(), default_todos().as_slice());
        assert!(list.dialog().is_open());

        assert!(list.toggle_completed("todo1").is_err());
        assert!(!list.get("todo1").unwrap().completed);

        assert!(list.delete("todo1").is_err());
        assert_eq!(list.len(), 2);
    }
}
