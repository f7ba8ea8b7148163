//! Two-field todo form with length validation.

use crate::error::Result;
use crate::list::TodoList;
use crate::models::{Todo, TodoDraft};
use crate::store::StorageBackend;
use std::fmt;

/// Minimum accepted field length, in characters.
pub const MIN_LEN: usize = 2;
/// Maximum accepted field length, in characters.
pub const MAX_LEN: usize = 50;

/// A form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Name, Field::Description];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "ex. Deni",
            Self::Description => "ex. working",
        }
    }

    /// The other field; the form only has two.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Description,
            Self::Description => Self::Name,
        }
    }
}

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    TooShort { min: usize },
    TooLong { max: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "String must contain at least {min} character(s)"),
            Self::TooLong { max } => write!(f, "String must contain at most {max} character(s)"),
        }
    }
}

/// Per-field validation outcome of a rejected submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<FieldError>,
    pub description: Option<FieldError>,
}

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Description => self.description.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Check a single value against the length bounds.
pub fn validate_field(value: &str) -> std::result::Result<(), FieldError> {
    let len = value.chars().count();
    if len < MIN_LEN {
        Err(FieldError::TooShort { min: MIN_LEN })
    } else if len > MAX_LEN {
        Err(FieldError::TooLong { max: MAX_LEN })
    } else {
        Ok(())
    }
}

/// Draft values and the errors from the last submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    name: String,
    description: String,
    errors: FormErrors,
}

impl TodoForm {
    /// Blank form for creating a todo.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing record.
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            name: todo.name.clone(),
            description: todo.description.clone(),
            errors: FormErrors::default(),
        }
    }

    /// Form matching the list's current dialog: pre-filled when editing.
    pub fn for_dialog<B: StorageBackend>(list: &TodoList<B>) -> Self {
        list.editing().map(Self::from_todo).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Description => &self.description,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Description => &mut self.description,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Error from the last submit attempt for `field`.
    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Validate both fields without touching the form.
    pub fn validate(&self) -> std::result::Result<TodoDraft, FormErrors> {
        let errors = FormErrors {
            name: validate_field(&self.name).err(),
            description: validate_field(&self.description).err(),
        };
        if errors.is_empty() {
            Ok(TodoDraft::new(self.name.clone(), self.description.clone()))
        } else {
            Err(errors)
        }
    }

    /// Validate and hand the draft to `list`.
    ///
    /// Returns `Ok(None)` when validation fails; the errors are kept on the
    /// form and the list is not touched. On success the form is cleared and
    /// the created or updated record is returned.
    pub fn submit<B: StorageBackend>(&mut self, list: &mut TodoList<B>) -> Result<Option<Todo>> {
        let draft = match self.validate() {
            Ok(draft) => draft,
            Err(errors) => {
                self.errors = errors;
                return Ok(None);
            }
        };

        let todo = list.submit(draft)?;
        self.reset();
        Ok(Some(todo))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
