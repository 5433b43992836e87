//! Core data model for configure declarations.

pub mod declaration;
pub mod dependency;
pub mod project;
pub mod schema;
pub mod target;

pub use declaration::Declaration;
pub use dependency::{DependencyRequest, LookupMode};
pub use project::{CxxStandard, Language, Project};
pub use schema::SchemaVersion;
pub use target::{BuildTarget, LinkHandle, TargetKind};
