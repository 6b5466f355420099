//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `honest-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateFetcher`: Obtaining the template repository
//!   - `CommandRunner`: `git init`, `<pm> install`

pub mod output;

pub use output::{CommandRunner, Filesystem, TemplateFetcher};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem, MockTemplateFetcher};
