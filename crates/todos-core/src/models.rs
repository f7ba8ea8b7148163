//! Shared data types for the application.

use serde::{Deserialize, Serialize};

/// Number of trailing UUID characters kept for a todo id.
const ID_LEN: usize = 12;

/// A single todo record, as persisted in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub completed: bool,
}

/// Validated name/description payload produced by the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoDraft {
    pub name: String,
    pub description: String,
}

impl Todo {
    /// Build a fresh, uncompleted todo from a draft with a newly generated id.
    pub fn from_draft(draft: TodoDraft) -> Self {
        Self {
            id: new_id(),
            name: draft.name,
            description: draft.description,
            completed: false,
        }
    }

    /// Overwrite name and description, keeping id and completion state.
    pub fn apply(&mut self, draft: TodoDraft) {
        self.name = draft.name;
        self.description = draft.description;
    }
}

impl TodoDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Generate a short random identifier.
///
/// Collisions are possible in principle and are not checked for.
pub fn new_id() -> String {
    let uuid = uuid::Uuid::new_v4().to_string();
    uuid[uuid.len() - ID_LEN..].to_string()
}

/// The records written on first start when no snapshot exists.
pub fn default_todos() -> Vec<Todo> {
    vec![
        Todo {
            id: "todo1".to_string(),
            name: "Todo 1".to_string(),
            description: "Todo 1 description".to_string(),
            completed: false,
        },
        Todo {
            id: "todo2".to_string(),
            name: "Todo 2".to_string(),
            description: "Todo 2 description".to_string(),
            completed: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_short_hex_suffix() {
        let id = new_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_id());
    }

    #[test]
    fn apply_keeps_identity_and_completion() {
        let mut todo = Todo {
            id: "x".to_string(),
            name: "old".to_string(),
            description: "old desc".to_string(),
            completed: true,
        };
        todo.apply(TodoDraft::new("new", "new desc"));

        assert_eq!(todo.id, "x");
        assert!(todo.completed);
        assert_eq!(todo.name, "new");
        assert_eq!(todo.description, "new desc");
    }

    #[test]
    fn snapshot_field_names_match_layout() {
        let json = serde_json::to_value(&default_todos()[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "todo2",
                "name": "Todo 2",
                "description": "Todo 2 description",
                "completed": true,
            })
        );
    }
}
