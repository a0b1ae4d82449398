use anyhow::Result;
use clap::Args;
use colored::Colorize;
use protypo_editor::StarterTemplate;
use protypo_tree::SequentialIds;

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Template name (formWithHeader, tableWithHeader, searchForm, radioPanel)
    #[arg(required_unless_present = "list")]
    pub name: Option<String>,

    /// List available templates
    #[arg(short, long)]
    pub list: bool,

    /// Number ids sequentially instead of randomly, for reproducible output
    #[arg(long)]
    pub sequential_ids: bool,
}

pub fn template(args: TemplateArgs, _cwd: &str) -> Result<()> {
    if args.list {
        println!("{}", "Starter templates:".bright_blue().bold());
        for template in StarterTemplate::ALL {
            println!("  {}", template.name());
        }
        return Ok(());
    }

    let name = args.name.unwrap_or_default();
    let template = StarterTemplate::from_name(&name)?;
    let root = if args.sequential_ids {
        template.instantiate_with(&mut SequentialIds::new())
    } else {
        template.instantiate()
    };

    println!("{}", protypo_tree::to_json(&[root])?);
    Ok(())
}
