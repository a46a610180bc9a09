//! Language identifier → extractor table.
//!
//! The table is built explicitly at startup (`ExtractorRegistry::builtin`); callers look up
//! an identifier and get a fresh extractor back. Identifiers follow editor language ids.
use std::path::Path;
use indexmap::IndexMap;
use crate::error::{Error, Result};
use crate::ir::Node;
use crate::typescript::TypeScriptExtractor;
use crate::typescript::syntax::Dialect;

/// Turns one source text (or a pasted fragment of one) into root nodes.
pub trait LanguageExtractor {
    /// Every top-level declaration of a whole file, in file order.
    fn parse_source(&self, source: &str) -> Result<Vec<Node>>;

    /// Same as `parse_source`, for a fragment that may lack an enclosing declaration.
    fn parse_selection(&self, selection: &str) -> Result<Vec<Node>> {
        self.parse_source(selection)
    }
}

pub type Factory = fn() -> Box<dyn LanguageExtractor>;

pub const TYPESCRIPT: &str = "typescript";
pub const TYPESCRIPT_REACT: &str = "typescriptreact";

pub struct ExtractorRegistry {
    factories: IndexMap<&'static str, Factory>,
}

impl ExtractorRegistry {
    pub fn empty() -> Self {
        Self { factories: IndexMap::new() }
    }

    pub fn builtin() -> Self {
        Self::empty()
            .with(TYPESCRIPT, typescript)
            .with(TYPESCRIPT_REACT, typescript_react)
    }

    /// Registers (or replaces) a factory. Identifiers are stored lowercase.
    pub fn with(mut self, language: &'static str, factory: Factory) -> Self {
        debug_assert_eq!(language, language.to_ascii_lowercase());
        self.factories.insert(language, factory);
        self
    }

    pub fn languages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    pub fn create(&self, language: &str) -> Result<Box<dyn LanguageExtractor>> {
        let key = language.trim().to_ascii_lowercase();
        match self.factories.get(key.as_str()) {
            Some(factory) => Ok(factory()),
            None => Err(Error::UnsupportedLanguage(language.to_string())),
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn typescript() -> Box<dyn LanguageExtractor> {
    Box::new(TypeScriptExtractor::new(Dialect::TypeScript))
}

fn typescript_react() -> Box<dyn LanguageExtractor> {
    Box::new(TypeScriptExtractor::new(Dialect::Tsx))
}

/// Language identifier for a source path, from its extension.
pub fn detect_language(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "ts" | "mts" | "cts" => Some(TYPESCRIPT),
        "tsx" => Some(TYPESCRIPT_REACT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_languages_in_registration_order() {
        let registry = ExtractorRegistry::builtin();
        assert_eq!(registry.languages().collect::<Vec<_>>(), ["typescript", "typescriptreact"]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = ExtractorRegistry::builtin();
        let extractor = registry.create("TypeScript").unwrap();
        let roots = extractor.parse_source("interface A { x: string }").unwrap();
        assert_eq!(roots[0].name, "A");
        assert!(registry.create("TYPESCRIPTREACT").is_ok());
    }

    #[test]
    fn unknown_language_is_an_error() {
        let registry = ExtractorRegistry::builtin();
        let err = registry.create("python").err().unwrap();
        assert!(matches!(&err, Error::UnsupportedLanguage(l) if l == "python"));
        assert_eq!(err.to_string(), "unsupported language: python");
        assert!(ExtractorRegistry::empty().create("typescript").is_err());
    }

    #[test]
    fn languages_from_extensions() {
        assert_eq!(detect_language(Path::new("src/models.ts")), Some("typescript"));
        assert_eq!(detect_language(Path::new("types.d.ts")), Some("typescript"));
        assert_eq!(detect_language(Path::new("lib/index.MTS")), Some("typescript"));
        assert_eq!(detect_language(Path::new("App.tsx")), Some("typescriptreact"));
        assert_eq!(detect_language(Path::new("main.rs")), None);
        assert_eq!(detect_language(Path::new("Makefile")), None);
    }
}
