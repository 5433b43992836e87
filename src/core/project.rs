//! Project declaration and language standards.
//!
//! A project is declared once per file and is immutable afterwards: a name,
//! the enabled source languages, and an optional C++ standard attribute set
//! through `set(CMAKE_CXX_STANDARD N)`.

use serde::{Deserialize, Serialize};

/// Source language enabled for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C language
    C,
    /// C++ language
    #[serde(alias = "cpp", alias = "c++")]
    Cxx,
}

impl Language {
    /// Get the language name as it appears in a declaration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cxx => "CXX",
        }
    }

    /// Parse a declaration-side language token (`C`, `CXX`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "C" => Some(Language::C),
            "CXX" => Some(Language::Cxx),
            _ => None,
        }
    }
}

/// C++ standard version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CxxStandard {
    /// C++11
    #[serde(rename = "11", alias = "c++11", alias = "cpp11")]
    Cxx11,
    /// C++14
    #[serde(rename = "14", alias = "c++14", alias = "cpp14")]
    Cxx14,
    /// C++17
    #[serde(rename = "17", alias = "c++17", alias = "cpp17")]
    Cxx17,
    /// C++20
    #[serde(rename = "20", alias = "c++20", alias = "cpp20")]
    Cxx20,
    /// C++23
    #[serde(rename = "23", alias = "c++23", alias = "cpp23")]
    Cxx23,
}

impl CxxStandard {
    /// Get the standard as the bare value used in declarations (e.g. "17").
    pub fn as_value(&self) -> &'static str {
        match self {
            CxxStandard::Cxx11 => "11",
            CxxStandard::Cxx14 => "14",
            CxxStandard::Cxx17 => "17",
            CxxStandard::Cxx20 => "20",
            CxxStandard::Cxx23 => "23",
        }
    }
}

impl std::str::FromStr for CxxStandard {
    type Err = CxxStandardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "11" | "c++11" | "cpp11" => Ok(CxxStandard::Cxx11),
            "14" | "c++14" | "cpp14" => Ok(CxxStandard::Cxx14),
            "17" | "c++17" | "cpp17" => Ok(CxxStandard::Cxx17),
            "20" | "c++20" | "cpp20" => Ok(CxxStandard::Cxx20),
            "23" | "c++23" | "cpp23" => Ok(CxxStandard::Cxx23),
            _ => Err(CxxStandardParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid C++ standard string.
#[derive(Debug, Clone)]
pub struct CxxStandardParseError(pub String);

impl std::fmt::Display for CxxStandardParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid C++ standard '{}', valid values: 11, 14, 17, 20, 23",
            self.0
        )
    }
}

impl std::error::Error for CxxStandardParseError {}

impl std::fmt::Display for CxxStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C++{}", self.as_value())
    }
}

/// The project declared by a configure declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project name
    pub name: String,

    /// Enabled source languages, in declaration order
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,

    /// C++ language-standard attribute
    #[serde(default, rename = "cxx-std", skip_serializing_if = "Option::is_none")]
    pub cxx_std: Option<CxxStandard>,
}

/// Languages enabled when a project lists none explicitly.
fn default_languages() -> Vec<Language> {
    vec![Language::C, Language::Cxx]
}

impl Project {
    /// Create a project with the default language set.
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            name: name.into(),
            languages: default_languages(),
            cxx_std: None,
        }
    }

    /// Create a project with an explicit language list.
    pub fn with_languages(name: impl Into<String>, languages: Vec<Language>) -> Self {
        Project {
            name: name.into(),
            languages,
            cxx_std: None,
        }
    }

    /// Check whether C++ is among the enabled languages.
    pub fn enables_cxx(&self) -> bool {
        self.languages.contains(&Language::Cxx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tokens() {
        assert_eq!(Language::from_token("C"), Some(Language::C));
        assert_eq!(Language::from_token("CXX"), Some(Language::Cxx));
        assert_eq!(Language::from_token("FORTRAN"), None);
        assert_eq!(Language::Cxx.as_str(), "CXX");
    }

    #[test]
    fn test_cxx_standard_parsing() {
        assert_eq!("17".parse::<CxxStandard>().unwrap(), CxxStandard::Cxx17);
        assert_eq!("c++20".parse::<CxxStandard>().unwrap(), CxxStandard::Cxx20);
        assert!("16".parse::<CxxStandard>().is_err());
    }

    #[test]
    fn test_default_languages() {
        let project = Project::new("MyApp");
        assert_eq!(project.languages, vec![Language::C, Language::Cxx]);
        assert!(project.enables_cxx());
    }

    #[test]
    fn test_explicit_languages() {
        let project = Project::with_languages("MyApp", vec![Language::Cxx]);
        assert!(project.enables_cxx());

        let c_only = Project::with_languages("clib", vec![Language::C]);
        assert!(!c_only.enables_cxx());
    }
}
