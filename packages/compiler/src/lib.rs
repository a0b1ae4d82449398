//! # Protypo Compiler
//!
//! Turns a Protypo tree into template source. Each node is dispatched to its
//! [`TagHandler`] through the registry in [`handlers`]; the resulting calls
//! are joined with newlines.
//!
//! ```rust,ignore
//! use protypo_compiler::generate;
//!
//! let nodes = protypo_tree::parse(r#"[{"tag":"p","children":[{"tag":"text","text":"Hi"}]}]"#)?;
//! assert_eq!(generate(&nodes), "P(Class: , Body: Hi) ");
//! ```

mod attributes;
mod compiler;
mod context;
mod error;
pub mod handlers;

pub use compiler::{generate, generate_with_diagnostics, render_children, render_node, CompileOutput};
pub use context::{CompileOptions, CompilerContext, DEFAULT_MAX_DEPTH};
pub use error::{CompileError, CompileResult};
pub use handlers::{resolve, TagHandler, ALL_HANDLERS};
