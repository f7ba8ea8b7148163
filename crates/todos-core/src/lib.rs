//! Core models, snapshot store and controllers for the todos app.
//!
//! This crate is UI-agnostic: frontends drive a [`TodoList`] and a
//! [`TodoForm`] and render whatever state they expose.

pub mod dialog;
pub mod error;
pub mod form;
pub mod list;
pub mod models;
pub mod store;

pub use dialog::{DialogState, FormMode};
pub use error::{Error, Result};
pub use form::{Field, FieldError, FormErrors, TodoForm};
pub use list::TodoList;
pub use models::{default_todos, Todo, TodoDraft};
pub use store::{FileBackend, MemoryBackend, StorageBackend, TodoStore, DEFAULT_KEY};
