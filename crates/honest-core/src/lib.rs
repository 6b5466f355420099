//! honest-core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the honestjs
//! CLI, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            honest-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, GenerateService,     │
//! │   TemplateService, TemplateCache)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, TemplateFetcher, Command)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    honest-adapters (Infrastructure)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use honest_core::prelude::*;
//!
//! # fn run(fs: Arc<dyn Filesystem>) -> HonestResult<()> {
//! let service = GenerateService::new(fs);
//! let result = service.generate(
//!     SchematicKind::Controller,
//!     Path::new("."),
//!     &GenerateOptions::new("user"),
//! )?;
//! println!("{:?}", result.imports);
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateResult, GenerateService, ScaffoldReport, ScaffoldService, TemplateCache,
        TemplateService,
        ports::{CommandRunner, Filesystem, TemplateFetcher},
    };
    pub use crate::domain::{
        GenerateOptions, Naming, PackageManager, ProjectConfig, ProjectOptions, PromptDefinition,
        SchematicKind, TemplateDescriptor, TemplateFilter, TemplateRegistry, Warning,
    };
    pub use crate::error::{HonestError, HonestResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
