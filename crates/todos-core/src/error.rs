//! Error type for store and controller operations.

use std::io;

/// Errors returned by [`crate::TodoStore`] and [`crate::TodoList`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No todo with the given id exists in the list.
    #[error("todo {0} not found")]
    NotFound(String),

    /// An update was submitted while the dialog was not editing a record.
    #[error("no todo is being edited")]
    NotEditing,

    /// A submit arrived with no dialog open.
    #[error("the todo dialog is not open")]
    DialogClosed,

    /// The backend failed to read or write a key.
    #[error("storage error for key {key:?}: {source}")]
    Storage {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The snapshot could not be encoded.
    #[error("failed to serialize todos: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
