use std::cell::{Cell, RefCell};

/// Indenting text buffer used while rendering Go source.
///
/// Go indents with tabs; blank lines carry no indentation.
pub struct CodeWriter {
    buffer: RefCell<String>,
    indent_level: Cell<usize>,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self {
            buffer: RefCell::new(String::new()),
            indent_level: Cell::new(0),
        }
    }

    pub fn add(&self, text: &str) {
        self.buffer.borrow_mut().push_str(text);
    }

    pub fn add_line(&self, text: &str) {
        if text.is_empty() {
            self.blank_line();
            return;
        }
        self.add_indented(text);
        self.add("\n");
    }

    pub fn add_indented(&self, text: &str) {
        let indent = "\t".repeat(self.indent_level.get());
        let mut buffer = self.buffer.borrow_mut();
        buffer.push_str(&indent);
        buffer.push_str(text);
    }

    pub fn blank_line(&self) {
        self.add("\n");
    }

    pub fn indent(&self) {
        self.indent_level.set(self.indent_level.get() + 1);
    }

    pub fn dedent(&self) {
        let level = self.indent_level.get();
        if level > 0 {
            self.indent_level.set(level - 1);
        }
    }

    /// Writes `rows` as two columns, padding the first so the second lines up.
    pub fn add_aligned(&self, rows: &[(String, String)], separator: &str, terminator: &str) {
        let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
        for (left, right) in rows {
            let padding = " ".repeat(width - left.len());
            self.add_line(&format!("{left}{separator}{padding}{right}{terminator}"));
        }
    }

    pub fn get_output(&self) -> String {
        self.buffer.borrow().clone()
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
