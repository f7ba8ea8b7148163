//! Application state management.

use todos_core::{Field, StorageBackend, Todo, TodoForm, TodoList};

/// Application state.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Showing the list.
    Running,
    /// Application should quit.
    Quit,
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    /// List navigation.
    Normal,
    /// Typing into the create/edit dialog.
    Form,
}

/// Main application model.
pub struct App<B> {
    /// Current application state.
    pub state: AppState,
    /// The todo list and its dialog state.
    pub list: TodoList<B>,
    /// Draft for the open dialog.
    pub form: TodoForm,
    /// Field receiving keystrokes in the dialog.
    pub focused_field: Field,
    /// Index of the highlighted row.
    pub selected_index: usize,
    /// Message for the status line (last error or confirmation).
    pub status: Option<String>,
}

impl<B: StorageBackend> App<B> {
    /// Create a new application instance.
    pub fn new(list: TodoList<B>) -> Self {
        Self {
            state: AppState::Running,
            list,
            form: TodoForm::empty(),
            focused_field: Field::Name,
            selected_index: 0,
            status: None,
        }
    }

    /// Keystrokes go to the form whenever the dialog is open.
    pub fn input_mode(&self) -> InputMode {
        if self.list.dialog().is_open() {
            InputMode::Form
        } else {
            InputMode::Normal
        }
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.list.todos().get(self.selected_index)
    }

    /// Move selection up in the list.
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down in the list.
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.list.len() {
            self.selected_index += 1;
        }
    }

    pub fn open_create(&mut self) {
        self.list.open_create();
        self.open_form();
    }

    /// Open the edit dialog on the highlighted todo.
    pub fn open_edit_selected(&mut self) {
        let Some(id) = self.selected_todo().map(|todo| todo.id.clone()) else {
            return;
        };
        match self.list.open_edit(&id) {
            Ok(_) => self.open_form(),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(todo) = self.selected_todo().cloned() else {
            return;
        };
        match self.list.delete(&todo.id) {
            Ok(()) => {
                self.status = Some(format!("Deleted \"{}\"", todo.name));
                self.clamp_selection();
            }
            Err(e) => self.status = Some(format!("Failed to delete: {e}")),
        }
    }

    /// Flip the checkbox of the highlighted todo.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_todo().map(|todo| todo.id.clone()) else {
            return;
        };
        if let Err(e) = self.list.toggle_completed(&id) {
            self.status = Some(format!("Failed to update: {e}"));
        }
    }

    /// Validate the dialog and hand it to the list.
    ///
    /// Validation errors stay on the form and keep the dialog open.
    pub fn submit_form(&mut self) {
        match self.form.submit(&mut self.list) {
            Ok(Some(todo)) => {
                if let Some(index) = self.list.todos().iter().position(|t| t.id == todo.id) {
                    self.selected_index = index;
                }
                self.status = Some(format!("Saved \"{}\"", todo.name));
            }
            Ok(None) => {
                if let Some(field) = Field::ALL.into_iter().find(|f| self.form.error(*f).is_some()) {
                    self.focused_field = field;
                }
            }
            Err(e) => {
                tracing::warn!("Submit failed: {}", e);
                self.status = Some(format!("Failed to save: {e}"));
                if !self.list.dialog().is_open() {
                    self.form.reset();
                }
            }
        }
    }

    /// Close the dialog and drop the draft.
    pub fn cancel_form(&mut self) {
        self.list.close_dialog();
        self.form.reset();
    }

    pub fn push_char(&mut self, c: char) {
        self.form.field_mut(self.focused_field).push(c);
    }

    pub fn pop_char(&mut self) {
        self.form.field_mut(self.focused_field).pop();
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    fn open_form(&mut self) {
        self.form = TodoForm::for_dialog(&self.list);
        self.focused_field = Field::Name;
        self.status = None;
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.list.len().saturating_sub(1));
    }
}
