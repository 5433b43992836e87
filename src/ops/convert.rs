//! Re-expression between the script and manifest syntaxes.

use std::path::Path;

use anyhow::Result;

use crate::manifest::to_manifest_string;
use crate::ops::check::{is_manifest, load_declaration};
use crate::parse::emit_script;

/// Output syntax for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertTarget {
    /// The declaration script syntax
    Script,
    /// The native manifest syntax
    Manifest,
}

impl ConvertTarget {
    /// The opposite syntax of the given input file.
    pub fn opposite_of(input: &Path) -> ConvertTarget {
        if is_manifest(input) {
            ConvertTarget::Script
        } else {
            ConvertTarget::Manifest
        }
    }
}

/// Convert a declaration file to the requested syntax.
pub fn convert(input: &Path, to: ConvertTarget) -> Result<String> {
    let declaration = load_declaration(input)?;
    match to {
        ConvertTarget::Script => Ok(emit_script(&declaration)),
        ConvertTarget::Manifest => to_manifest_string(&declaration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FIXTURE: &str = "\
cmake_minimum_required(VERSION 3.24)
project(MyApp CXX)
set(CMAKE_CXX_STANDARD 17)
find_package(hello REQUIRED)
find_package(bye REQUIRED)
add_executable(app main.cpp)
target_link_libraries(app hello::hello bye::bye)
";

    #[test]
    fn test_convert_is_lossless_both_ways() {
        let tmp = TempDir::new().unwrap();
        let script_path = tmp.path().join("CMakeLists.txt");
        std::fs::write(&script_path, FIXTURE).unwrap();

        let manifest = convert(&script_path, ConvertTarget::Manifest).unwrap();
        let manifest_path = tmp.path().join("Capstan.toml");
        std::fs::write(&manifest_path, &manifest).unwrap();

        let script = convert(&manifest_path, ConvertTarget::Script).unwrap();

        let original = load_declaration(&script_path).unwrap();
        let round_tripped =
            crate::parse::parse_script(&script, "round-tripped").unwrap();
        assert_eq!(original, round_tripped);
    }

    #[test]
    fn test_opposite_of() {
        assert_eq!(
            ConvertTarget::opposite_of(Path::new("CMakeLists.txt")),
            ConvertTarget::Manifest
        );
        assert_eq!(
            ConvertTarget::opposite_of(Path::new("Capstan.toml")),
            ConvertTarget::Script
        );
    }
}
