use crate::validation::{invalid_addresses, NumericRange};

pub const LOG_LEVELS: &[&str] = &["debug", "info", "warning", "error"];
pub const QUALITY_LEVELS: &[&str] = &["low", "balanced", "high"];
pub const ADAPTERS: &[&str] = &["all", "ethernet", "wifi"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Checkbox,
    Select(&'static [&'static str]),
    Number(NumericRange),
    Text,
    /// Free text spanning several lines.
    Multiline,
    /// One address per line, checked when editing finishes.
    IpList,
}

/// A single form control. Every kind stores its value as text except
/// checkboxes, which only use `checked`.
#[derive(Debug, Clone)]
pub struct Field {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub checked: bool,
    pub text: String,
    pub invalid: bool,
}

impl Field {
    pub fn new(id: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            label,
            kind,
            checked: false,
            text: String::new(),
            invalid: false,
        }
    }

    pub fn checkbox(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, FieldKind::Checkbox)
    }

    pub fn select(id: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self::new(id, label, FieldKind::Select(options))
    }

    pub fn number(id: &'static str, label: &'static str, range: NumericRange) -> Self {
        Self::new(id, label, FieldKind::Number(range))
    }

    pub fn is_text_editable(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Number(_) | FieldKind::Text | FieldKind::Multiline | FieldKind::IpList
        )
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Multiline | FieldKind::IpList)
    }

    pub fn toggle(&mut self) {
        if self.kind == FieldKind::Checkbox {
            self.checked = !self.checked;
        }
    }

    /// Step a select to the next or previous option. A value that is not one
    /// of the options moves to the first option.
    pub fn cycle(&mut self, forward: bool) {
        let FieldKind::Select(options) = self.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }

        let next = match options.iter().position(|o| *o == self.text) {
            Some(index) if forward => (index + 1) % options.len(),
            Some(index) => (index + options.len() - 1) % options.len(),
            None => 0,
        };
        self.text = options[next].to_string();
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_text_editable() {
            self.text.push(c);
            self.check_range();
        }
    }

    pub fn pop_char(&mut self) {
        if self.is_text_editable() {
            self.text.pop();
            self.check_range();
        }
    }

    /// Re-evaluate the range flag of a number field. Runs on every edit.
    pub fn check_range(&mut self) {
        if let FieldKind::Number(range) = self.kind {
            self.invalid = range.is_out_of_range(&self.text);
        }
    }

    /// Checks that run when editing finishes. Returns the offending addresses
    /// of an IP list, empty for every other kind.
    pub fn check_on_blur(&mut self) -> Vec<String> {
        match self.kind {
            FieldKind::IpList => {
                let invalid = invalid_addresses(&self.text);
                self.invalid = !invalid.is_empty();
                invalid
            }
            FieldKind::Number(_) => {
                self.check_range();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Value as shown in a single table cell.
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Checkbox => {
                if self.checked {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            FieldKind::Select(_) => format!("< {} >", self.text),
            FieldKind::Multiline | FieldKind::IpList => {
                let lines = self.text.lines().filter(|l| !l.trim().is_empty()).count();
                match self.text.lines().next() {
                    Some(first) if lines > 1 => format!("{} (+{} more)", first, lines - 1),
                    Some(first) => first.to_string(),
                    None => String::new(),
                }
            }
            _ => self.text.clone(),
        }
    }
}
