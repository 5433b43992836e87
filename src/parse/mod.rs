//! Declaration script parsing and emission.
//!
//! The script syntax is the declarative command-call form the external
//! build orchestrator consumes: one `command(arg arg ...)` per statement,
//! `#` line comments, quoted arguments. Parsing produces the typed
//! [`Declaration`](crate::core::Declaration) entity set; emission is the
//! inverse and round-trips losslessly over that set.

pub mod emit;
pub mod lexer;
pub mod script;

pub use emit::emit_script;
pub use script::{parse_script, ScriptError, ScriptErrorKind};
