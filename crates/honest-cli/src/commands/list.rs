//! Implementation of the `honestjs list` command.

use std::collections::BTreeMap;

use honest_core::domain::{TemplateDescriptor, TemplateFilter, TemplateRegistry};
use tracing::{debug, instrument};

use crate::{
    cli::ListArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(category = ?args.category, tag = ?args.tag))]
pub fn execute(args: ListArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = super::template_service(config);
    let registry = service.registry()?;

    let filter = TemplateFilter {
        category: args.category,
        tag: args.tag,
    };
    let templates = filter.apply(&registry.templates);
    debug!(matched = templates.len(), total = registry.templates.len(), "Filtered templates");

    if args.json {
        // Straight to stdout so the JSON stays parseable in pipes.
        let json = serde_json::to_string_pretty(&templates).map_err(|e| CliError::IoError {
            message: "Failed to serialise templates".into(),
            source: e.into(),
        })?;
        println!("{json}");
        return Ok(());
    }

    if templates.is_empty() {
        output.warning("No templates found matching your criteria.")?;
        return Ok(());
    }

    output.print("")?;
    output.header("Available Templates:")?;
    output.print("")?;

    for (category, members) in group_by_category(&templates) {
        output.header(&format!("{}:", category.to_uppercase()))?;
        for (index, template) in members.iter().enumerate() {
            output.print(&format!("  {}. {}", index + 1, template.name))?;
            if !template.description.is_empty() {
                output.print(&format!("     {}", template.description))?;
            }
            if let Some(version) = &template.version {
                output.field("     Version", version)?;
            }
            if let Some(author) = &template.author {
                output.field("     Author", author)?;
            }
            if !template.tags.is_empty() {
                output.field("     Tags", &template.tags.join(", "))?;
            }
            output.field("     Template", &template_location(config, template))?;
            output.print("")?;
        }
    }

    print_catalogue(&registry, output)?;

    output.header("Usage:")?;
    output.command("honestjs new <project-name> --template <template-name>")?;
    output.command("honestjs new <project-name>   (interactive mode)")?;
    output.command("honestjs list --category <category>")?;
    output.command("honestjs list --tag <tag>")?;
    output.print("")?;
    output.header("All templates support:")?;
    output.print("  • TypeScript, ESLint, Prettier, Docker, Git")?;
    output.print("  • Package manager selection (Bun, npm, yarn, pnpm)")?;
    output.print("  • Automatic dependency installation")?;
    Ok(())
}

/// Templates grouped by category, `Other` for uncategorised ones.
fn group_by_category<'a>(
    templates: &[&'a TemplateDescriptor],
) -> BTreeMap<&'a str, Vec<&'a TemplateDescriptor>> {
    let mut groups: BTreeMap<&str, Vec<&TemplateDescriptor>> = BTreeMap::new();
    for template in templates {
        groups
            .entry(template.category_or_other())
            .or_default()
            .push(template);
    }
    groups
}

/// Known categories (with descriptions when the registry has them) and tags
/// across the whole registry, not only the filtered templates.
fn print_catalogue(registry: &TemplateRegistry, output: &OutputManager) -> CliResult<()> {
    let mut categories: Vec<&str> = registry
        .templates
        .iter()
        .filter_map(|t| t.category.as_deref())
        .collect();
    categories.sort_unstable();
    categories.dedup();

    if !categories.is_empty() {
        output.header("Categories:")?;
        for category in categories {
            match registry.categories.get(category) {
                Some(description) => output.print(&format!("  • {category} - {description}"))?,
                None => output.print(&format!("  • {category}"))?,
            }
        }
        output.print("")?;
    }

    let tags = registry.tags();
    if !tags.is_empty() {
        output.header("Tags:")?;
        for tag in tags {
            output.print(&format!("  • {tag}"))?;
        }
        output.print("")?;
    }
    Ok(())
}

fn template_location(config: &AppConfig, template: &TemplateDescriptor) -> String {
    match config.local_templates() {
        Some(root) => template.resolve_dir(root).display().to_string(),
        None => format!("{}/{}", config.templates.repository, template.path),
    }
}
