//! Declaration content fingerprinting.
//!
//! Configure runs record a fingerprint of the declaration they processed.
//! The hash is taken over a normalized entity set rather than the raw file,
//! so whitespace and comment changes do not force lookups to run again,
//! while any semantic change does.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::core::Declaration;

/// Compute the fingerprint of a declaration's entity set.
pub fn fingerprint(declaration: &Declaration) -> Result<String> {
    let normalized = declaration.normalized();
    let bytes = serde_json::to_vec(&normalized)
        .context("failed to serialize declaration for fingerprinting")?;
    let hash = Sha256::digest(&bytes);
    Ok(hex::encode(hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuildTarget, DependencyRequest, Project};

    fn sample() -> Declaration {
        Declaration {
            schema_floor: Some("3.24".parse().unwrap()),
            project: Some(Project::new("MyApp")),
            dependencies: vec![
                DependencyRequest::required("hello"),
                DependencyRequest::required("bye"),
            ],
            targets: vec![BuildTarget::executable("app").with_sources(["main.cpp"])],
            variables: Default::default(),
        }
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = fingerprint(&sample()).unwrap();
        let b = fingerprint(&sample()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_ignores_declaration_order() {
        let mut reordered = sample();
        reordered.dependencies.reverse();
        assert_eq!(
            fingerprint(&sample()).unwrap(),
            fingerprint(&reordered).unwrap()
        );
    }

    #[test]
    fn test_fingerprint_tracks_semantic_changes() {
        let mut changed = sample();
        changed.dependencies[0].required = false;
        assert_ne!(
            fingerprint(&sample()).unwrap(),
            fingerprint(&changed).unwrap()
        );
    }
}
