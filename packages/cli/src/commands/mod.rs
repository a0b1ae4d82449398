pub mod compile;
pub mod init;
pub mod template;
pub mod tree;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use template::{template, TemplateArgs};
pub use tree::{tree, TreeArgs};
