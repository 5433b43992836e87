//! Capstan - a configure-declaration front end for CMake-style build scripts
//!
//! This crate provides the core library functionality for Capstan,
//! including declaration parsing, validation, manifest re-expression,
//! and configure-time dependency lookups.

pub mod core;
pub mod index;
pub mod manifest;
pub mod ops;
pub mod parse;
pub mod util;

pub use crate::core::{
    declaration::Declaration, dependency::DependencyRequest, project::Project,
    schema::SchemaVersion, target::BuildTarget, target::LinkHandle,
};

pub use crate::index::PackageIndex;
pub use crate::util::context::GlobalContext;
