//! Build targets and link handles.

use serde::{Deserialize, Serialize};

/// The kind of artifact a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Executable binary
    #[serde(alias = "exe", alias = "bin")]
    Executable,

    /// Static library
    #[serde(alias = "static")]
    StaticLib,

    /// Shared library
    #[serde(alias = "shared")]
    SharedLib,
}

impl Default for TargetKind {
    fn default() -> Self {
        TargetKind::Executable
    }
}

impl TargetKind {
    /// Check if this is a library kind.
    pub fn is_library(&self) -> bool {
        matches!(self, TargetKind::StaticLib | TargetKind::SharedLib)
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TargetKind::Executable => "executable",
            TargetKind::StaticLib => "static library",
            TargetKind::SharedLib => "shared library",
        };
        write!(f, "{}", s)
    }
}

/// A dependency's exported link identifier, e.g. `hello::hello`.
///
/// The namespace (the part before `::`) names the dependency that exports
/// the handle. A handle without `::` refers to another target in the same
/// declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkHandle(String);

impl LinkHandle {
    /// Create a link handle from its textual form.
    pub fn new(raw: impl Into<String>) -> Self {
        LinkHandle(raw.into())
    }

    /// Get the raw handle text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace portion of the handle.
    ///
    /// For `hello::hello` this is `hello`; for a bare name it is the
    /// whole name.
    pub fn namespace(&self) -> &str {
        match self.0.split_once("::") {
            Some((ns, _)) => ns,
            None => &self.0,
        }
    }

    /// Check if the handle is namespace-qualified.
    pub fn is_namespaced(&self) -> bool {
        self.0.contains("::")
    }
}

impl std::fmt::Display for LinkHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LinkHandle {
    fn from(s: &str) -> Self {
        LinkHandle::new(s)
    }
}

/// A named output artifact plus its inputs and link dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTarget {
    /// Target name
    pub name: String,

    /// What kind of artifact to produce
    #[serde(default)]
    pub kind: TargetKind,

    /// Source files, in declaration order
    #[serde(default)]
    pub sources: Vec<String>,

    /// Link edges attached via the link-step declaration
    #[serde(default)]
    pub links: Vec<LinkHandle>,
}

impl BuildTarget {
    /// Create a new target with the given name and kind.
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        BuildTarget {
            name: name.into(),
            kind,
            sources: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Create a new executable target.
    pub fn executable(name: impl Into<String>) -> Self {
        Self::new(name, TargetKind::Executable)
    }

    /// Create a new static library target.
    pub fn staticlib(name: impl Into<String>) -> Self {
        Self::new(name, TargetKind::StaticLib)
    }

    /// Add source files.
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sources = sources.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Add link edges.
    pub fn with_links(
        mut self,
        links: impl IntoIterator<Item = impl Into<LinkHandle>>,
    ) -> Self {
        self.links = links.into_iter().map(|l| l.into()).collect();
        self
    }
}
