//! Login, signup and submit forms.

use hns_core::NewStory;

use crate::app::PendingAction;

/// Which form is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Signup,
    Submit,
}

/// One single-line text field.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    /// Render as asterisks.
    pub secret: bool,
    value: String,
    cursor_position: usize,
}

impl FormField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            secret: false,
            value: String::new(),
            cursor_position: 0,
        }
    }

    fn secret(label: &'static str) -> Self {
        Self {
            secret: true,
            ..Self::new(label)
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Insert a character at the cursor (unicode-safe)
    fn type_char(&mut self, c: char) {
        let byte_pos = self
            .value
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len());
        self.value.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.remove_at_cursor();
        }
    }

    fn delete(&mut self) {
        if self.cursor_position < self.value.chars().count() {
            self.remove_at_cursor();
        }
    }

    fn remove_at_cursor(&mut self) {
        if let Some((byte_pos, ch)) = self.value.char_indices().nth(self.cursor_position) {
            self.value
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    fn cursor_right(&mut self) {
        let char_count = self.value.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    fn cursor_end(&mut self) {
        self.cursor_position = self.value.chars().count();
    }
}

/// A form overlay: a list of fields with one focused.
#[derive(Debug, Clone)]
pub struct Form {
    kind: FormKind,
    fields: Vec<FormField>,
    focused: usize,
}

impl Form {
    pub fn login() -> Self {
        Self::with_fields(
            FormKind::Login,
            vec![FormField::new("Username"), FormField::secret("Password")],
        )
    }

    pub fn signup() -> Self {
        Self::with_fields(
            FormKind::Signup,
            vec![
                FormField::new("Name"),
                FormField::new("Username"),
                FormField::secret("Password"),
            ],
        )
    }

    pub fn submit_story() -> Self {
        Self::with_fields(
            FormKind::Submit,
            vec![
                FormField::new("Author"),
                FormField::new("Title"),
                FormField::new("URL"),
            ],
        )
    }

    fn with_fields(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            focused: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Login => " Log in ",
            FormKind::Signup => " Create account ",
            FormKind::Submit => " Submit a story ",
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    pub fn type_char(&mut self, c: char) {
        self.field_mut().type_char(c);
    }

    pub fn backspace(&mut self) {
        self.field_mut().backspace();
    }

    pub fn delete(&mut self) {
        self.field_mut().delete();
    }

    pub fn cursor_left(&mut self) {
        self.field_mut().cursor_left();
    }

    pub fn cursor_right(&mut self) {
        self.field_mut().cursor_right();
    }

    pub fn cursor_home(&mut self) {
        self.field_mut().cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.field_mut().cursor_end();
    }

    /// Turn the filled-in form into the action it requests.
    ///
    /// Every field is required. Passwords are taken verbatim, everything
    /// else is trimmed.
    pub fn submit(&self) -> Result<PendingAction, String> {
        let values = self
            .fields
            .iter()
            .map(|field| {
                let value = if field.secret {
                    field.value.as_str()
                } else {
                    field.value.trim()
                };
                if value.is_empty() {
                    Err(format!("{} is required", field.label))
                } else {
                    Ok(value.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let action = match (self.kind, values.as_slice()) {
            (FormKind::Login, [username, password]) => PendingAction::Login {
                username: username.clone(),
                password: password.clone(),
            },
            (FormKind::Signup, [name, username, password]) => PendingAction::Signup {
                username: username.clone(),
                password: password.clone(),
                name: name.clone(),
            },
            (FormKind::Submit, [author, title, url]) => {
                PendingAction::Submit(NewStory::new(author.as_str(), title.as_str(), url.as_str()))
            }
            _ => return Err("Form is incomplete".to_string()),
        };
        Ok(action)
    }

    fn field_mut(&mut self) -> &mut FormField {
        // `fields` is never empty and `focused` always wraps within it
        &mut self.fields[self.focused]
    }
}
