use crate::context::{CompileOptions, CompilerContext};
use crate::error::CompileError;
use crate::handlers::resolve;
use protypo_tree::ProtypoNode;
use tracing::{debug, warn};

/// Generated template source plus every isolated per-node failure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileOutput {
    pub source: String,
    pub diagnostics: Vec<CompileError>,
}

impl CompileOutput {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Compile a Protypo tree to template source with default options
pub fn generate(nodes: &[ProtypoNode]) -> String {
    generate_with_diagnostics(nodes, CompileOptions::default()).source
}

/// Compile a Protypo tree to template source, collecting diagnostics.
///
/// Never fails as a whole: unknown tags render empty and malformed nodes are
/// reported and skipped while their siblings still render.
pub fn generate_with_diagnostics(nodes: &[ProtypoNode], options: CompileOptions) -> CompileOutput {
    let ctx = CompilerContext::new(options);
    let mut source = render_nodes(nodes, &ctx);

    if ctx.options.trim_trailing_whitespace {
        source = source
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");
    }

    CompileOutput {
        source,
        diagnostics: ctx.into_diagnostics(),
    }
}

/// Render a node's children, joined by newlines; empty when it has none
pub fn render_children(node: &ProtypoNode, ctx: &CompilerContext) -> String {
    render_nodes(node.children(), ctx)
}

fn render_nodes(nodes: &[ProtypoNode], ctx: &CompilerContext) -> String {
    nodes
        .iter()
        .map(|node| render_node(node, ctx))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one node. Text renders literally, known tags through their
/// handler, anything else as empty. Failures are recorded on `ctx`.
pub fn render_node(node: &ProtypoNode, ctx: &CompilerContext) -> String {
    if node.is_text() {
        return node.text_content().to_string();
    }

    let Some(handler) = resolve(&node.tag) else {
        debug!("No handler for tag '{}', rendering empty", node.tag);
        return String::new();
    };

    if ctx.depth() >= ctx.options.max_depth {
        let error = CompileError::MaxDepthExceeded {
            tag: node.tag.clone(),
            node_id: node.id().unwrap_or("<no id>").to_string(),
            max_depth: ctx.options.max_depth,
        };
        warn!("{}", error);
        ctx.report(error);
        return String::new();
    }

    ctx.enter();
    let rendered = handler.render_code(node, ctx);
    ctx.leave();

    match rendered {
        Ok(code) => code,
        Err(error) => {
            warn!("Skipping node: {}", error);
            ctx.report(error);
            String::new()
        }
    }
}
