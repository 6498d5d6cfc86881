//! Tabbed forms backing the settings screens.
//!
//! A [`Form`] is a list of tabs holding [`Field`]s addressed by id. The
//! settings and quick-settings screens each build one and map it to and from
//! their own settings type.

pub mod field;
pub mod settings_form;

use thiserror::Error;

pub use field::{Field, FieldKind};
pub use settings_form::{build_settings_form, collect_settings, populate_settings};

use crate::validation::parse_int_prefix;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown form field: {0}")]
    UnknownField(&'static str),
}

#[derive(Debug, Clone)]
pub struct FormTab {
    pub title: &'static str,
    pub fields: Vec<Field>,
}

impl FormTab {
    pub fn new(title: &'static str, fields: Vec<Field>) -> Self {
        Self { title, fields }
    }
}

#[derive(Debug, Clone)]
pub struct Form {
    pub tabs: Vec<FormTab>,
    pub active_tab: usize,
    pub selected_field: usize,
    pub editing: bool,
}

impl Form {
    pub fn new(tabs: Vec<FormTab>) -> Self {
        Self {
            tabs,
            active_tab: 0,
            selected_field: 0,
            editing: false,
        }
    }

    // Field access by id

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.tabs
            .iter()
            .flat_map(|tab| tab.fields.iter())
            .find(|field| field.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.tabs
            .iter_mut()
            .flat_map(|tab| tab.fields.iter_mut())
            .find(|field| field.id == id)
    }

    pub fn checkbox(&self, id: &str) -> bool {
        self.field(id).map(|f| f.checked).unwrap_or(false)
    }

    pub fn set_checkbox(&mut self, id: &str, checked: bool) {
        if let Some(field) = self.field_mut(id) {
            field.checked = checked;
        }
    }

    pub fn text(&self, id: &str) -> &str {
        self.field(id).map(|f| f.text.as_str()).unwrap_or("")
    }

    /// Overwrite a field's text. Clears any validation flag, since the value
    /// no longer comes from user input.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        if let Some(field) = self.field_mut(id) {
            field.text = text.into();
            field.invalid = false;
        }
    }

    /// Leading integer of a number field. Text without one reads as `None`,
    /// which is sent as `null` rather than holding the save back.
    pub fn number(&self, id: &'static str) -> Result<Option<i64>, FormError> {
        let field = self.field(id).ok_or(FormError::UnknownField(id))?;
        Ok(parse_int_prefix(&field.text))
    }

    pub fn set_number(&mut self, id: &str, value: Option<i64>) {
        self.set_text(id, value.map(|n| n.to_string()).unwrap_or_default());
    }

    /// Lines of a multi-line field, minus the blank ones. Kept lines are not
    /// trimmed.
    pub fn lines(&self, id: &str) -> Vec<String> {
        self.text(id)
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn invalid_fields(&self) -> Vec<&'static str> {
        self.tabs
            .iter()
            .flat_map(|tab| tab.fields.iter())
            .filter(|field| field.invalid)
            .map(|field| field.id)
            .collect()
    }

    // Navigation

    pub fn active(&self) -> Option<&FormTab> {
        self.tabs.get(self.active_tab)
    }

    pub fn selected(&self) -> Option<&Field> {
        self.active()?.fields.get(self.selected_field)
    }

    pub fn selected_mut(&mut self) -> Option<&mut Field> {
        self.tabs
            .get_mut(self.active_tab)?
            .fields
            .get_mut(self.selected_field)
    }

    pub fn select_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active_tab = index;
            self.selected_field = 0;
            self.editing = false;
        }
    }

    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.select_tab((self.active_tab + 1) % self.tabs.len());
        }
    }

    pub fn previous_tab(&mut self) {
        if !self.tabs.is_empty() {
            let len = self.tabs.len();
            self.select_tab((self.active_tab + len - 1) % len);
        }
    }

    pub fn next_field(&mut self) {
        let len = self.active().map(|t| t.fields.len()).unwrap_or(0);
        if len > 0 {
            self.selected_field = (self.selected_field + 1) % len;
        }
    }

    pub fn previous_field(&mut self) {
        let len = self.active().map(|t| t.fields.len()).unwrap_or(0);
        if len > 0 {
            self.selected_field = (self.selected_field + len - 1) % len;
        }
    }

    // Editing

    /// Enter edit mode on the selected field. Returns false when the field
    /// does not take text input.
    pub fn begin_edit(&mut self) -> bool {
        let editable = self.selected().map(Field::is_text_editable).unwrap_or(false);
        self.editing = editable;
        editable
    }

    /// Leave edit mode and run the selected field's blur checks, returning
    /// any invalid addresses found.
    pub fn finish_edit(&mut self) -> Vec<String> {
        self.editing = false;
        self.selected_mut()
            .map(Field::check_on_blur)
            .unwrap_or_default()
    }
}
