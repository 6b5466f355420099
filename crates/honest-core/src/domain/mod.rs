//! Core domain layer for honestjs.
//!
//! Pure logic only: naming, schematic descriptors, the template registry
//! model, project configuration, declarative transforms and `package.json`
//! patching. All I/O goes through the ports in `crate::application::ports`.
//!
//! - **No I/O**: No filesystem, network, or process calls
//! - **Values**: Every type here is `Clone + PartialEq`

pub mod error;
pub mod naming;
pub mod outcome;
pub mod package_manifest;
pub mod project_config;
pub mod prompt;
pub mod render;
pub mod schematic;
pub mod template;
pub mod transform;

pub use error::DomainError;
pub use naming::{Naming, pluralize, singularize};
pub use outcome::{Outcome, Warning, WarningStage};
pub use package_manifest::PackageManifest;
pub use project_config::{
    FEATURES, PackageManager, ProjectConfig, ProjectOptions, validate_project_name,
};
pub use prompt::{PromptChoice, PromptDefinition, PromptKind};
pub use render::RenderContext;
pub use schematic::{BaseDir, GenerateOptions, SCHEMATICS, Schematic, SchematicKind};
pub use template::{
    PROMPTS_FILE, REGISTRY_FILE, TEMPLATE_CONFIG_FILE, TEMPLATE_FILES_DIR, TRANSFORMS_FILE,
    TemplateConfig, TemplateDescriptor, TemplateFilter, TemplateRegistry,
};
pub use transform::{FileAction, TransformAction, TransformRule, TransformSet};

pub use crate::error::ErrorCategory;
