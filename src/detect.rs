use crate::frontend::Language;

/// Guess the syntax family of a snippet from cheap substring markers.
/// Java markers are checked first so `System.out` programs containing
/// `printf`-like identifiers do not fall through to C; anything without a
/// recognized marker is treated as Python.
pub fn detect_language(code: &str) -> Language {
    if code.contains("public class") || code.contains("System.out") {
        Language::Java
    } else if code.contains("#include") || code.contains("printf") || code.contains("scanf") {
        Language::C
    } else {
        Language::Python
    }
}
