//! Implementation of the `honestjs new` command.
//!
//! Responsibility: collect a [`ProjectConfig`] from flags, configuration and
//! (unless `--yes`) interactive prompts, then hand it to the core
//! `ScaffoldService` and display the report.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use honest_core::{
    application::{ApplicationError, TemplateService},
    domain::{PackageManager, ProjectConfig, ProjectOptions, Warning, validate_project_name},
    error::HonestError,
};

use crate::{
    cli::NewArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Name and template picked for the new project.
#[derive(Debug)]
struct Selection {
    name: Option<String>,
    template: Option<String>,
}

/// Execute the `honestjs new` command.
///
/// 1. Seed options from flags and configured defaults
/// 2. Fill the gaps interactively unless `--yes`
/// 3. Validate name, destination and template
/// 4. Scaffold behind a spinner
/// 5. Print warnings and next steps
#[instrument(skip_all, fields(project = ?args.name))]
pub fn execute(args: NewArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let templates = super::template_service(config);
    let default_pm = configured_package_manager(config)?;
    let mut options = seed_options(&args);
    let mut warnings: Vec<Warning> = Vec::new();

    let selection = if args.yes {
        options.package_manager.get_or_insert(default_pm);
        Selection {
            name: args.name.clone(),
            template: args.template.clone(),
        }
    } else {
        prompt(&args, config, &templates, default_pm, &mut options, &mut warnings)?
    };

    let name = selection
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| CliError::InvalidInput {
            message: "Project name is required".into(),
        })?;
    validate_project_name(&name).map_err(HonestError::from)?;

    let destination = PathBuf::from(&name);
    if destination.exists() {
        let exists = ApplicationError::ProjectExists { path: destination };
        return Err(HonestError::from(exists).into());
    }

    let template = selection
        .template
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| config.defaults.template.clone());
    let registry = templates.registry()?;
    if registry.find(&template).is_none() {
        return Err(CliError::TemplateNotFound {
            name: template,
            available: registry
                .templates
                .iter()
                .map(|t| format!("{}: {}", t.name, t.description))
                .collect(),
        });
    }

    let project = options.resolve(&name, &template);
    debug!(?project, "Project configuration resolved");

    let scaffold = super::scaffold_service(templates);
    let spinner = output.spinner("Creating project...");
    let result = scaffold.create(&template, &destination, &project);
    spinner.finish_and_clear();
    let report = result?;
    info!(path = %report.project_path.display(), "Project created");

    output.success("Project created successfully!")?;
    warnings.extend(report.warnings);
    for warning in &warnings {
        output.warning(&warning.to_string())?;
    }

    output.print("")?;
    output.header("Next steps:")?;
    for step in next_steps(&project) {
        output.command(&step)?;
    }
    output.print("")?;
    output.print("Happy coding!")?;
    Ok(())
}

/// Options taken straight from `--x` / `--no-x` and `--package-manager`.
fn seed_options(args: &NewArgs) -> ProjectOptions {
    let mut options = ProjectOptions {
        package_manager: args.package_manager.map(Into::into),
        ..ProjectOptions::default()
    };
    for (key, _) in honest_core::domain::FEATURES {
        if let Some(slot) = options.feature_mut(key) {
            *slot = args.feature(key);
        }
    }
    options
}

fn configured_package_manager(config: &AppConfig) -> CliResult<PackageManager> {
    config
        .defaults
        .package_manager
        .parse::<PackageManager>()
        .map_err(|e| CliError::ConfigError {
            message: format!("defaults.package_manager: {e}"),
        })
}

fn next_steps(project: &ProjectConfig) -> Vec<String> {
    let pm = project.package_manager;
    let mut steps = vec![format!("cd {}", project.name)];
    if !project.install {
        steps.push(format!("{pm} install"));
    }
    steps.push(format!("{pm} run dev"));
    steps
}

#[cfg(not(feature = "interactive"))]
fn prompt(
    _args: &NewArgs,
    _config: &AppConfig,
    _templates: &TemplateService,
    _default_pm: PackageManager,
    _options: &mut ProjectOptions,
    _warnings: &mut Vec<Warning>,
) -> CliResult<Selection> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

#[cfg(feature = "interactive")]
fn prompt(
    args: &NewArgs,
    config: &AppConfig,
    templates: &TemplateService,
    default_pm: PackageManager,
    options: &mut ProjectOptions,
    warnings: &mut Vec<Warning>,
) -> CliResult<Selection> {
    interactive::collect(args, config, templates, default_pm, options, warnings)
}

#[cfg(feature = "interactive")]
mod interactive {
    use console::Term;
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
    use serde_json::Value;

    use honest_core::domain::{FEATURES, PromptDefinition, PromptKind};

    use super::*;

    pub(super) fn collect(
        args: &NewArgs,
        config: &AppConfig,
        templates: &TemplateService,
        default_pm: PackageManager,
        options: &mut ProjectOptions,
        warnings: &mut Vec<Warning>,
    ) -> CliResult<Selection> {
        if !Term::stdout().is_term() {
            return Err(CliError::InvalidInput {
                message: "interactive prompts need a terminal, pass --yes to use defaults".into(),
            });
        }
        let theme = ColorfulTheme::default();

        let name = match &args.name {
            Some(name) => name.clone(),
            None => Input::<String>::with_theme(&theme)
                .with_prompt("What is the name of your project?")
                .validate_with(|input: &String| {
                    validate_project_name(input.trim()).map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_error)?
                .trim()
                .to_string(),
        };

        let template = match &args.template {
            Some(template) => template.clone(),
            None => {
                let registry = templates.registry()?;
                let labels: Vec<String> = registry
                    .templates
                    .iter()
                    .map(|t| format!("{}: {}", t.name, t.description))
                    .collect();
                let default = registry
                    .templates
                    .iter()
                    .position(|t| t.name == config.defaults.template)
                    .unwrap_or(0);
                let index =
                    select(&theme, "Which template would you like to use?", &labels, default)?;
                registry
                    .templates
                    .get(index)
                    .map(|t| t.name.clone())
                    .unwrap_or_default()
            }
        };

        let prompts = templates.prompts_for(&template)?.drain_into(warnings);
        if let Some(prompts) = prompts.filter(|p| !p.is_empty()) {
            println!();
            println!("Configuring {template} template...");
            for definition in &prompts {
                let answer = ask(&theme, definition)?;
                options.extra.insert(definition.name.clone(), answer);
            }
        }

        if options.package_manager.is_none() {
            let labels: Vec<String> = PackageManager::ALL
                .iter()
                .map(|pm| match pm {
                    PackageManager::Bun => "Bun (recommended)".to_string(),
                    other => other.to_string(),
                })
                .collect();
            let default = PackageManager::ALL
                .iter()
                .position(|pm| *pm == default_pm)
                .unwrap_or(0);
            let message = "Which package manager would you like to use?";
            let index = select(&theme, message, &labels, default)?;
            options.package_manager = PackageManager::ALL.get(index).copied();
        }

        for (key, message) in FEATURES {
            let Some(slot) = options.feature_mut(key) else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(confirm(&theme, message, true)?);
            }
        }

        Ok(Selection {
            name: Some(name),
            template: Some(template),
        })
    }

    /// One template-specific question.
    fn ask(theme: &ColorfulTheme, definition: &PromptDefinition) -> CliResult<Value> {
        Ok(match definition.kind {
            PromptKind::Confirm => Value::Bool(confirm(
                theme,
                &definition.message,
                definition.default_bool(),
            )?),
            PromptKind::Select => {
                let labels: Vec<&str> = definition.choices.iter().map(|c| c.label()).collect();
                let default = definition.default_choice();
                let index = select(theme, &definition.message, &labels, default)?;
                definition
                    .choices
                    .get(index)
                    .map(|c| c.value())
                    .unwrap_or(Value::Null)
            }
            PromptKind::Input => {
                let mut input = Input::<String>::with_theme(theme)
                    .with_prompt(&definition.message)
                    .allow_empty(true);
                if let Some(default) = definition.default_text() {
                    input = input.default(default);
                }
                Value::String(input.interact_text().map_err(prompt_error)?)
            }
        })
    }

    fn select(
        theme: &ColorfulTheme,
        message: &str,
        labels: &[impl ToString],
        default: usize,
    ) -> CliResult<usize> {
        let mut select = Select::with_theme(theme).with_prompt(message).default(default);
        for label in labels {
            select = select.item(label.to_string());
        }
        select.interact().map_err(prompt_error)
    }

    fn confirm(theme: &ColorfulTheme, message: &str, default: bool) -> CliResult<bool> {
        Confirm::with_theme(theme)
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn prompt_error(e: dialoguer::Error) -> CliError {
        let source = std::io::Error::from(e);
        if source.kind() == std::io::ErrorKind::Interrupted {
            CliError::Cancelled
        } else {
            CliError::IoError {
                message: "Prompt failed".into(),
                source,
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn new_args(argv: &[&str]) -> NewArgs {
        let argv = ["honestjs", "new"].iter().chain(argv).copied();
        match Cli::parse_from(argv).command {
            Commands::New(args) => args,
            other => panic!("expected New, got {other:?}"),
        }
    }

    #[test]
    fn flags_seed_the_options() {
        let options = seed_options(&new_args(&["x", "-p", "pnpm", "--no-docker", "--git"]));
        assert_eq!(options.package_manager, Some(PackageManager::Pnpm));
        assert_eq!(options.docker, Some(false));
        assert_eq!(options.git, Some(true));
        assert_eq!(options.eslint, None);
        assert!(options.extra.is_empty());
    }

    #[test]
    fn unset_flags_resolve_to_defaults() {
        let project = seed_options(&new_args(&["x"])).resolve("x", "barebone");
        assert_eq!(project, ProjectConfig::new("x", "barebone"));
    }

    #[test]
    fn configured_package_manager_is_validated() {
        let mut config = AppConfig::default();
        assert_eq!(configured_package_manager(&config).unwrap(), PackageManager::Bun);

        config.defaults.package_manager = "yarn".into();
        assert_eq!(configured_package_manager(&config).unwrap(), PackageManager::Yarn);

        config.defaults.package_manager = "cargo".into();
        let err = configured_package_manager(&config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn next_steps_mention_install_only_when_skipped() {
        let mut project = ProjectConfig::new("blog", "barebone");
        project.package_manager = PackageManager::Npm;
        assert_eq!(next_steps(&project), ["cd blog", "npm run dev"]);

        project.install = false;
        assert_eq!(
            next_steps(&project),
            ["cd blog", "npm install", "npm run dev"]
        );
    }
}
