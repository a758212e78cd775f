use bookdeck_core::Book;

/// Popup dialog types. The detail modal is not listed here: it renders
/// straight from the controller's `Detail` view state.
#[derive(Debug)]
pub enum Popup {
    /// Edit the selected book — form over the controller's draft.
    EditBook(EditBookForm),
    /// Confirm deletion of a book.
    DeleteConfirm { title: String, id: i64 },
    /// Key binding help.
    Help,
}

/// A single form field with label and text input.
#[derive(Debug)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub cursor: usize,
}

impl FormField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn with_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self {
            label: label.into(),
            value,
            cursor,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.value.len());
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Form for editing a book's fields. The values are copied into the
/// controller's draft on submit; until then only the form changes.
#[derive(Debug)]
pub struct EditBookForm {
    pub fields: Vec<FormField>,
    pub active_field: usize,
}

impl EditBookForm {
    pub const TITLE: usize = 0;
    pub const AUTHOR: usize = 1;
    pub const YEAR: usize = 2;
    pub const DESCRIPTION: usize = 3;

    pub fn for_book(book: &Book) -> Self {
        Self {
            fields: vec![
                FormField::with_value("Title", book.title.clone()),
                FormField::with_value("Author", book.author.clone()),
                FormField::with_value("Year", book.publication_year.to_string()),
                FormField::with_value("Description", book.description.clone()),
            ],
            active_field: 0,
        }
    }

    pub fn active_field_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.active_field]
    }

    pub fn next_field(&mut self) {
        if self.active_field < self.fields.len() - 1 {
            self.active_field += 1;
        }
    }

    pub fn prev_field(&mut self) {
        if self.active_field > 0 {
            self.active_field -= 1;
        }
    }
}
