//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "generate a controller".

pub mod generate_service;
pub mod pipeline;
pub mod scaffold_service;
pub mod template_cache;
pub mod template_service;

pub use generate_service::{GenerateResult, GenerateService};
pub use pipeline::TransformPipeline;
pub use scaffold_service::{ScaffoldReport, ScaffoldService};
pub use template_cache::TemplateCache;
pub use template_service::TemplateService;
