//! Generate Service - writes a single schematic artifact.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{GenerateOptions, Naming, SchematicKind},
    error::HonestResult,
};

/// Files written and import lines to splice into the caller's entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResult {
    pub files: Vec<PathBuf>,
    pub imports: Vec<String>,
}

pub struct GenerateService {
    filesystem: Arc<dyn Filesystem>,
}

impl GenerateService {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Generate one artifact of `kind` under `project_root`.
    ///
    /// Existing files are overwritten.
    #[instrument(skip_all, fields(kind = %kind, name = %options.name))]
    pub fn generate(
        &self,
        kind: SchematicKind,
        project_root: &Path,
        options: &GenerateOptions,
    ) -> HonestResult<GenerateResult> {
        let schematic = kind.schematic();
        let naming = Naming::new(options.name.as_str());

        let dir = schematic.target_dir(project_root, options, &naming);
        self.filesystem.create_dir_all(&dir)?;

        let file = dir.join(schematic.file_name(&naming));
        self.filesystem.write_file(&file, &schematic.render(&naming))?;
        info!(file = %file.display(), "Generated {}", kind);

        let imports = if options.skip_import {
            Vec::new()
        } else {
            vec![schematic.import_statement(options, &naming)]
        };

        Ok(GenerateResult {
            files: vec![file],
            imports,
        })
    }
}
