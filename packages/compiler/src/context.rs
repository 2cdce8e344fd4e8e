use loaderkit_model::Framework;
use std::cell::RefCell;

/// Where generated code is headed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Bare component expression, evaluated by the preview sandbox
    #[default]
    Preview,
    /// Component preceded by the import of its loader library
    Export,
}

/// Output buffer and indentation shared by the printer while it walks a document
pub struct CompilerContext {
    buffer: RefCell<String>,
    indent_level: RefCell<usize>,
    pub dialect: Framework,
}

impl CompilerContext {
    pub fn new(dialect: Framework) -> Self {
        Self {
            buffer: RefCell::new(String::new()),
            indent_level: RefCell::new(0),
            dialect,
        }
    }

    pub fn add(&self, text: &str) {
        self.buffer.borrow_mut().push_str(text);
    }

    pub fn add_line(&self, text: &str) {
        let indent = "  ".repeat(*self.indent_level.borrow());
        let mut buffer = self.buffer.borrow_mut();
        buffer.push_str(&indent);
        buffer.push_str(text);
        buffer.push('\n');
    }

    pub fn indent(&self) {
        *self.indent_level.borrow_mut() += 1;
    }

    pub fn dedent(&self) {
        let mut level = self.indent_level.borrow_mut();
        if *level > 0 {
            *level -= 1;
        }
    }

    pub fn into_output(self) -> String {
        self.buffer.into_inner()
    }
}
