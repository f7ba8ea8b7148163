//! State of the create/edit dialog.

/// Whether the todo dialog is open, and for which record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    /// Adding a new todo.
    Creating,
    /// Editing the todo with this id.
    Editing { id: String },
}

/// The mode of an open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self {
            Self::Closed => None,
            Self::Creating => Some(FormMode::Create),
            Self::Editing { .. } => Some(FormMode::Edit),
        }
    }

    /// Id of the record being edited, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Editing { id } => Some(id),
            _ => None,
        }
    }
}

impl FormMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Create => "Create Todo",
            Self::Edit => "Edit Todo",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Submit",
            Self::Edit => "Update",
        }
    }
}
