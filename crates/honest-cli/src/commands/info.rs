//! `honestjs info`: CLI version, template source and environment.

use tracing::instrument;

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

const LINKS: [(&str, &str); 4] = [
    ("Documentation", "https://honestjs.dev"),
    ("GitHub", "https://github.com/honestjs/honestjs"),
    ("Templates", "https://github.com/honestjs/templates"),
    ("Issues", "https://github.com/honestjs/honestjs/issues"),
];

#[instrument(skip_all)]
pub fn execute(config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let templates = super::template_service(config).list()?;

    output.print("")?;
    output.header("honestjs CLI Information")?;
    output.print("")?;
    output.field("CLI Version", env!("CARGO_PKG_VERSION"))?;
    output.field("Templates Repository", &config.templates.source())?;
    if config.local_templates().is_none() {
        output.field("Templates Reference", &config.templates.reference)?;
    }
    output.print("")?;

    output.field("Available Templates", &templates.len().to_string())?;
    for template in &templates {
        output.print(&format!("  • {}: {}", template.name, template.description))?;
    }
    output.print("  (All templates support the same CLI-level configuration options)")?;
    output.print("")?;

    output.field("Platform", std::env::consts::OS)?;
    output.field("Architecture", std::env::consts::ARCH)?;
    output.field("Config File", &AppConfig::config_path().display().to_string())?;
    output.print("")?;

    output.header("Useful Links:")?;
    for (label, url) in LINKS {
        output.field(label, url)?;
    }
    Ok(())
}
