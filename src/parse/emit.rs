//! Declaration script emission.
//!
//! The inverse of parsing: serializes an entity set back to script text.
//! Re-parsing emitted text reproduces an identical entity set.

use crate::core::dependency::LookupMode;
use crate::core::project::Language;
use crate::core::target::TargetKind;
use crate::core::Declaration;

/// Serialize a declaration to script text.
pub fn emit_script(decl: &Declaration) -> String {
    let mut out = String::new();

    if let Some(floor) = &decl.schema_floor {
        out.push_str(&format!("cmake_minimum_required(VERSION {})\n", floor));
    }

    if let Some(project) = &decl.project {
        if project.languages == vec![Language::C, Language::Cxx] {
            out.push_str(&format!("project({})\n", quote(&project.name)));
        } else {
            let langs = project
                .languages
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&format!("project({} {})\n", quote(&project.name), langs));
        }
        if let Some(std) = project.cxx_std {
            out.push_str(&format!("set(CMAKE_CXX_STANDARD {})\n", std.as_value()));
        }
    }

    for (var, value) in &decl.variables {
        let values = value
            .split(';')
            .map(quote)
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("set({} {})\n", quote(var), values));
    }

    for dep in &decl.dependencies {
        out.push_str("find_package(");
        out.push_str(&quote(&dep.name));
        if dep.mode == LookupMode::Module {
            out.push_str(" MODULE");
        }
        if dep.required {
            out.push_str(" REQUIRED");
        }
        out.push_str(")\n");
    }

    for target in &decl.targets {
        match target.kind {
            TargetKind::Executable => {
                out.push_str(&format!("add_executable({}", quote(&target.name)));
            }
            TargetKind::StaticLib => {
                out.push_str(&format!("add_library({} STATIC", quote(&target.name)));
            }
            TargetKind::SharedLib => {
                out.push_str(&format!("add_library({} SHARED", quote(&target.name)));
            }
        }
        for source in &target.sources {
            out.push(' ');
            out.push_str(&quote(source));
        }
        out.push_str(")\n");
    }

    for target in &decl.targets {
        if target.links.is_empty() {
            continue;
        }
        out.push_str(&format!("target_link_libraries({}", quote(&target.name)));
        for link in &target.links {
            out.push(' ');
            out.push_str(&quote(link.as_str()));
        }
        out.push_str(")\n");
    }

    out
}

/// Quote a word if it needs quoting in the script syntax.
fn quote(word: &str) -> String {
    let needs_quoting = word.is_empty()
        || word
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '#'));
    if !needs_quoting {
        return word.to_string();
    }

    let mut quoted = String::from("\"");
    for c in word.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
