//! Parser from script tokens to the typed declaration.

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::core::dependency::{DependencyRequest, LookupMode};
use crate::core::project::{Language, Project};
use crate::core::target::{BuildTarget, LinkHandle, TargetKind};
use crate::core::Declaration;
use crate::parse::lexer::{tokenize, Token, TokenKind};

/// A script parse or interpretation error, anchored to its source span.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("{kind}")]
#[diagnostic(code(capstan::parse::script))]
pub struct ScriptError {
    pub kind: ScriptErrorKind,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,
}

/// The specific failure behind a [`ScriptError`].
#[derive(Debug, Error)]
pub enum ScriptErrorKind {
    #[error("unterminated quoted argument")]
    UnterminatedString,

    #[error("expected a command name, found `{found}`")]
    ExpectedCommand { found: String },

    #[error("expected `(` after command `{command}`")]
    ExpectedOpenParen { command: String },

    #[error("call to `{command}` is not closed before end of file")]
    UnterminatedCall { command: String },

    #[error("nested parenthesis inside call to `{command}`")]
    NestedParen { command: String },

    #[error("unknown command `{name}`")]
    UnknownCommand { name: String },

    #[error("`{command}`: {reason}")]
    BadArguments { command: String, reason: String },

    #[error("minimum schema version is declared more than once")]
    DuplicateSchemaFloor,

    #[error("project is declared more than once")]
    DuplicateProject,

    #[error("unsupported language `{token}`")]
    UnknownLanguage { token: String },

    #[error("invalid schema version `{value}`")]
    InvalidSchemaVersion { value: String },

    #[error("invalid C++ standard `{value}`")]
    InvalidCxxStandard { value: String },

    #[error("unknown `find_package` argument `{arg}` for `{package}`")]
    UnknownFindPackageArg { package: String, arg: String },

    #[error("link declaration names unknown target `{target}`")]
    UnknownLinkTarget { target: String },
}

/// One `command(args...)` call with source positions.
struct CommandCall {
    name: String,
    name_span: (usize, usize),
    args: Vec<Arg>,
}

struct Arg {
    text: String,
    span: (usize, usize),
}

/// Parse a declaration script into its entity set.
///
/// `name` labels the source in error reports (usually the file path).
pub fn parse_script(src: &str, name: impl AsRef<str>) -> Result<Declaration, ScriptError> {
    let named = || NamedSource::new(name.as_ref(), src.to_string());
    let err = |kind: ScriptErrorKind, span: (usize, usize)| ScriptError {
        kind,
        src: named(),
        span: span.into(),
    };

    let tokens = tokenize(src)
        .map_err(|e| err(ScriptErrorKind::UnterminatedString, (e.offset, 1)))?;

    let calls = group_calls(tokens).map_err(|(kind, span)| err(kind, span))?;

    let mut decl = Declaration::new();
    for call in calls {
        interpret(&mut decl, &call).map_err(|(kind, span)| err(kind, span))?;
    }

    Ok(decl)
}

/// Group the flat token stream into command calls.
fn group_calls(tokens: Vec<Token>) -> Result<Vec<CommandCall>, (ScriptErrorKind, (usize, usize))> {
    let mut calls = Vec::new();
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        let (name, name_span) = match token.kind {
            TokenKind::Word { text, quoted: false } => (text, (token.offset, token.len)),
            TokenKind::Word { text, .. } => {
                return Err((
                    ScriptErrorKind::ExpectedCommand { found: text },
                    (token.offset, token.len),
                ));
            }
            TokenKind::OpenParen | TokenKind::CloseParen => {
                return Err((
                    ScriptErrorKind::ExpectedCommand {
                        found: "parenthesis".to_string(),
                    },
                    (token.offset, token.len),
                ));
            }
        };

        match iter.next() {
            Some(Token {
                kind: TokenKind::OpenParen,
                ..
            }) => {}
            _ => {
                return Err((
                    ScriptErrorKind::ExpectedOpenParen {
                        command: name.clone(),
                    },
                    name_span,
                ));
            }
        }

        let mut args = Vec::new();
        loop {
            match iter.next() {
                Some(Token {
                    kind: TokenKind::CloseParen,
                    ..
                }) => break,
                Some(Token {
                    kind: TokenKind::Word { text, .. },
                    offset,
                    len,
                }) => args.push(Arg {
                    text,
                    span: (offset, len),
                }),
                Some(Token {
                    kind: TokenKind::OpenParen,
                    offset,
                    len,
                }) => {
                    return Err((
                        ScriptErrorKind::NestedParen {
                            command: name.clone(),
                        },
                        (offset, len),
                    ));
                }
                None => {
                    return Err((
                        ScriptErrorKind::UnterminatedCall {
                            command: name.clone(),
                        },
                        name_span,
                    ));
                }
            }
        }

        calls.push(CommandCall {
            name,
            name_span,
            args,
        });
    }

    Ok(calls)
}

type InterpretResult = Result<(), (ScriptErrorKind, (usize, usize))>;

fn interpret(decl: &mut Declaration, call: &CommandCall) -> InterpretResult {
    match call.name.as_str() {
        "cmake_minimum_required" => interpret_minimum_required(decl, call),
        "project" => interpret_project(decl, call),
        "set" => interpret_set(decl, call),
        "find_package" => interpret_find_package(decl, call),
        "add_executable" => interpret_add_target(decl, call, TargetKind::Executable),
        "add_library" => interpret_add_library(decl, call),
        "target_link_libraries" => interpret_link(decl, call),
        _ => Err((
            ScriptErrorKind::UnknownCommand {
                name: call.name.clone(),
            },
            call.name_span,
        )),
    }
}

fn bad_args(call: &CommandCall, reason: impl Into<String>) -> (ScriptErrorKind, (usize, usize)) {
    (
        ScriptErrorKind::BadArguments {
            command: call.name.clone(),
            reason: reason.into(),
        },
        call.name_span,
    )
}

fn interpret_minimum_required(decl: &mut Declaration, call: &CommandCall) -> InterpretResult {
    if decl.schema_floor.is_some() {
        return Err((ScriptErrorKind::DuplicateSchemaFloor, call.name_span));
    }
    let [keyword, value] = call.args.as_slice() else {
        return Err(bad_args(call, "expected `VERSION <version>`"));
    };
    if keyword.text != "VERSION" {
        return Err(bad_args(call, "expected `VERSION <version>`"));
    }
    let version = value.text.parse().map_err(|_| {
        (
            ScriptErrorKind::InvalidSchemaVersion {
                value: value.text.clone(),
            },
            value.span,
        )
    })?;
    decl.schema_floor = Some(version);
    Ok(())
}

fn interpret_project(decl: &mut Declaration, call: &CommandCall) -> InterpretResult {
    if decl.project.is_some() {
        return Err((ScriptErrorKind::DuplicateProject, call.name_span));
    }
    let Some((name, rest)) = call.args.split_first() else {
        return Err(bad_args(call, "expected a project name"));
    };

    let mut languages = Vec::new();
    for arg in rest {
        if arg.text == "LANGUAGES" {
            continue;
        }
        match Language::from_token(&arg.text) {
            Some(lang) => {
                if !languages.contains(&lang) {
                    languages.push(lang);
                }
            }
            None => {
                return Err((
                    ScriptErrorKind::UnknownLanguage {
                        token: arg.text.clone(),
                    },
                    arg.span,
                ));
            }
        }
    }

    decl.project = Some(if languages.is_empty() {
        Project::new(name.text.clone())
    } else {
        Project::with_languages(name.text.clone(), languages)
    });
    Ok(())
}

/// The variable that carries the project's language-standard attribute.
const CXX_STANDARD_VAR: &str = "CMAKE_CXX_STANDARD";

fn interpret_set(decl: &mut Declaration, call: &CommandCall) -> InterpretResult {
    let Some((var, values)) = call.args.split_first() else {
        return Err(bad_args(call, "expected a variable name"));
    };

    if var.text == CXX_STANDARD_VAR {
        let [value] = values else {
            return Err(bad_args(call, "expected exactly one standard value"));
        };
        let std = value.text.parse().map_err(|_| {
            (
                ScriptErrorKind::InvalidCxxStandard {
                    value: value.text.clone(),
                },
                value.span,
            )
        })?;
        match &mut decl.project {
            Some(project) => project.cxx_std = Some(std),
            None => {
                return Err(bad_args(
                    call,
                    format!("`{}` set before any project is declared", CXX_STANDARD_VAR),
                ));
            }
        }
        return Ok(());
    }

    // Other variables are retained verbatim; multiple values form a
    // `;`-separated list.
    let joined = values
        .iter()
        .map(|a| a.text.as_str())
        .collect::<Vec<_>>()
        .join(";");
    decl.variables.insert(var.text.clone(), joined);
    Ok(())
}

fn interpret_find_package(decl: &mut Declaration, call: &CommandCall) -> InterpretResult {
    let Some((name, rest)) = call.args.split_first() else {
        return Err(bad_args(call, "expected a package name"));
    };

    let mut request = DependencyRequest::optional(name.text.clone());
    for arg in rest {
        match arg.text.as_str() {
            "REQUIRED" => request.required = true,
            "QUIET" => {}
            "MODULE" => request.mode = LookupMode::Module,
            "CONFIG" | "NO_MODULE" => request.mode = LookupMode::Config,
            other => {
                return Err((
                    ScriptErrorKind::UnknownFindPackageArg {
                        package: name.text.clone(),
                        arg: other.to_string(),
                    },
                    arg.span,
                ));
            }
        }
    }

    decl.dependencies.push(request);
    Ok(())
}

fn interpret_add_target(
    decl: &mut Declaration,
    call: &CommandCall,
    kind: TargetKind,
) -> InterpretResult {
    let Some((name, sources)) = call.args.split_first() else {
        return Err(bad_args(call, "expected a target name"));
    };

    let target = BuildTarget::new(name.text.clone(), kind)
        .with_sources(sources.iter().map(|a| a.text.clone()));
    decl.targets.push(target);
    Ok(())
}

fn interpret_add_library(decl: &mut Declaration, call: &CommandCall) -> InterpretResult {
    let Some((name, rest)) = call.args.split_first() else {
        return Err(bad_args(call, "expected a target name"));
    };

    let (kind, sources) = match rest.split_first() {
        Some((first, tail)) if first.text == "STATIC" => (TargetKind::StaticLib, tail),
        Some((first, tail)) if first.text == "SHARED" => (TargetKind::SharedLib, tail),
        _ => (TargetKind::StaticLib, rest),
    };

    let target = BuildTarget::new(name.text.clone(), kind)
        .with_sources(sources.iter().map(|a| a.text.clone()));
    decl.targets.push(target);
    Ok(())
}

fn interpret_link(decl: &mut Declaration, call: &CommandCall) -> InterpretResult {
    let Some((target_name, handles)) = call.args.split_first() else {
        return Err(bad_args(call, "expected a target name"));
    };

    let Some(target) = decl
        .targets
        .iter_mut()
        .find(|t| t.name == target_name.text)
    else {
        return Err((
            ScriptErrorKind::UnknownLinkTarget {
                target: target_name.text.clone(),
            },
            target_name.span,
        ));
    };

    for handle in handles {
        // Visibility keywords are legal in the source syntax but carry no
        // meaning in the entity set.
        if matches!(handle.text.as_str(), "PUBLIC" | "PRIVATE" | "INTERFACE") {
            continue;
        }
        target.links.push(LinkHandle::new(handle.text.clone()));
    }
    Ok(())
}
