use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use protypo_editor::{to_visual_tree, VisualTreeNode};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Page tree JSON file
    pub file: String,

    /// Id of the tag to mark as selected
    #[arg(short, long)]
    pub selected: Option<String>,

    /// Print the visual tree as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn tree(args: TreeArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.file);
    let source = fs::read_to_string(&path).with_context(|| format!("cannot read {}", path.display()))?;
    let mut nodes = protypo_tree::parse(&source)?;
    protypo_tree::assign_ids(&mut nodes, false);

    let visual = to_visual_tree(&nodes, args.selected.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visual)?);
    } else {
        let mut out = String::new();
        render_outline(&visual, 0, &mut out);
        print!("{}", out);
    }

    Ok(())
}

fn render_outline(nodes: &[VisualTreeNode], depth: usize, out: &mut String) {
    for node in nodes {
        let title = if node.selected {
            node.title.bold().to_string()
        } else {
            node.title.clone()
        };
        out.push_str(&format!(
            "{}{} {}\n",
            "  ".repeat(depth),
            title,
            format!("#{}", node.id).dimmed()
        ));
        render_outline(&node.children, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protypo_tree::ProtypoNode;

    #[test]
    fn test_outline_indents_children() {
        colored::control::set_override(false);
        let nodes = vec![ProtypoNode::new("div")
            .with_id("d")
            .with_child(ProtypoNode::text_node("Panel").with_id("t"))
            .with_child(ProtypoNode::new("input").with_id("i"))];

        let mut out = String::new();
        render_outline(&to_visual_tree(&nodes, None), 0, &mut out);
        assert_eq!(out, "div: Panel #d\n  input #i\n");
    }
}
