use crate::error::CompileError;
use std::cell::{Cell, RefCell};

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for template source generation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Strip trailing whitespace from every generated line. Off by default,
    /// which keeps the trailing space each element call ends with.
    pub trim_trailing_whitespace: bool,
    /// Element nesting beyond this depth is reported instead of rendered
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            trim_trailing_whitespace: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compilation context shared by every handler during one generation pass
pub struct CompilerContext {
    diagnostics: RefCell<Vec<CompileError>>,
    depth: Cell<usize>,
    pub options: CompileOptions,
}

impl CompilerContext {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            depth: Cell::new(0),
            options,
        }
    }

    pub fn report(&self, error: CompileError) {
        self.diagnostics.borrow_mut().push(error);
    }

    pub fn diagnostics(&self) -> Vec<CompileError> {
        self.diagnostics.borrow().clone()
    }

    pub fn into_diagnostics(self) -> Vec<CompileError> {
        self.diagnostics.into_inner()
    }

    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    pub fn enter(&self) {
        self.depth.set(self.depth.get() + 1);
    }

    pub fn leave(&self) {
        let depth = self.depth.get();
        if depth > 0 {
            self.depth.set(depth - 1);
        }
    }
}

impl Default for CompilerContext {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}
