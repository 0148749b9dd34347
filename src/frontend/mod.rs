mod c;
mod java;
mod python;

pub use c::CProfile;
pub use java::JavaProfile;
pub use python::PythonProfile;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::Statement;

static ARRAY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

/// Pull the declared identifiers out of the tail of a declaration
/// (everything after the type keywords): initializers, pointer stars, and
/// array suffixes are discarded, one name per comma-separated declarator.
pub(crate) fn declared_names(rest: &str) -> Vec<String> {
    rest.split(',')
        .filter_map(|part| {
            let part = part.split('=').next().unwrap_or("");
            let part = part.replace('*', " ");
            let part = ARRAY_SUFFIX.replace_all(&part, "");
            part.split_whitespace().last().map(str::to_string)
        })
        .collect()
}

/// Per-syntax-family adapter in front of the shared builder/renderer.
/// A profile strips comments, extracts the block worth analyzing, and
/// recognizes the statement forms of its family; everything downstream is
/// family-independent.
pub trait SyntaxProfile {
    /// Remove comments and preprocessor-like directives.
    fn strip(&self, source: &str) -> String;

    /// Extract the entry block the diagram should describe (e.g. the body
    /// of `main`), in the braced form the shared builder consumes.
    fn entry_block(&self, source: &str) -> String;

    /// Family-specific statement recognition.
    fn classify(&self, text: &str) -> Statement;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Java,
    Python,
}

impl Language {
    pub fn profile(self) -> &'static dyn SyntaxProfile {
        match self {
            Language::C => &CProfile,
            Language::Java => &JavaProfile,
            Language::Python => &PythonProfile,
        }
    }
}
