//! `honestjs generate <schematic> <name>`: one artifact in the current project.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use honest_adapters::LocalFilesystem;
use honest_core::{
    application::{GenerateResult, GenerateService},
    domain::{GenerateOptions, SchematicKind},
    error::HonestError,
};
use tracing::instrument;

use crate::{
    cli::GenerateArgs,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(schematic = %args.schematic, name = %args.name))]
pub fn execute(args: GenerateArgs, output: &OutputManager) -> CliResult<()> {
    let root = std::env::current_dir().with_cli_context(|| "Failed to read the current directory")?;
    let service = GenerateService::new(Arc::new(LocalFilesystem::new()));

    let spinner = output.spinner("Generating files...");
    let result = run(&service, &root, args);
    spinner.finish_and_clear();
    let (kind, generated) = result?;

    output.success(&format!("Generated {kind} successfully!"))?;
    report(&root, &generated, output)
}

fn run(
    service: &GenerateService,
    root: &Path,
    args: GenerateArgs,
) -> CliResult<(SchematicKind, GenerateResult)> {
    let kind = SchematicKind::from_str(&args.schematic).map_err(HonestError::from)?;
    let options = GenerateOptions {
        path: args.path,
        flat: args.flat,
        skip_import: args.skip_import,
        export: args.export,
        ..GenerateOptions::new(args.name)
    };
    let result = service.generate(kind, root, &options)?;
    Ok((kind, result))
}

fn report(root: &Path, generated: &GenerateResult, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.header("Created files:")?;
    for file in &generated.files {
        let shown = file.strip_prefix(root).unwrap_or(file);
        output.print(&format!("  {}", shown.display()))?;
    }

    if !generated.imports.is_empty() {
        output.print("")?;
        output.header("Add to your module:")?;
        for import in &generated.imports {
            output.command(import)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use honest_adapters::MemoryFilesystem;

    fn generate_args(argv: &[&str]) -> GenerateArgs {
        let argv = ["honestjs", "g"].iter().chain(argv).copied();
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            other => panic!("expected Generate, got {other:?}"),
        }
    }

    #[test]
    fn aliases_resolve_and_files_land_under_the_root() {
        let fs = MemoryFilesystem::new();
        let service = GenerateService::new(Arc::new(fs.clone()));

        let (kind, result) =
            run(&service, Path::new("/app"), generate_args(&["c", "user"])).unwrap();

        assert_eq!(kind, SchematicKind::Controller);
        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].starts_with("/app/src"));
        assert!(fs.read_file(&result.files[0]).is_some());
        assert_eq!(result.imports.len(), 1);
    }

    #[test]
    fn skip_import_leaves_no_import_lines() {
        let service = GenerateService::new(Arc::new(MemoryFilesystem::new()));
        let (_, result) = run(
            &service,
            Path::new("/app"),
            generate_args(&["guard", "auth", "--skip-import"]),
        )
        .unwrap();
        assert!(result.imports.is_empty());
    }

    #[test]
    fn unknown_schematic_is_a_user_error() {
        let service = GenerateService::new(Arc::new(MemoryFilesystem::new()));
        let err = run(&service, Path::new("/app"), generate_args(&["widget", "x"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("widget"));
    }
}
