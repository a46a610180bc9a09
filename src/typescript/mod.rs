//! TypeScript / TSX front end: tree-sitter syntax, local name resolution and the
//! resolver that turns declarations into `ir::Node` roots.
pub mod checker;
pub mod jsdoc;
pub mod resolve;
pub mod syntax;

use std::collections::HashSet;
use crate::error::Result;
use crate::ir::Node;
use crate::registry::LanguageExtractor;
use checker::TypeChecker;
use resolve::Resolver;
use syntax::{Declaration, Dialect, SourceFile};

const SELECTION_WRAPPER: &str = "Selection";

#[derive(Debug, Clone, Copy)]
pub struct TypeScriptExtractor {
    dialect: Dialect,
}

impl TypeScriptExtractor {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

impl LanguageExtractor for TypeScriptExtractor {
    fn parse_source(&self, source: &str) -> Result<Vec<Node>> {
        let file = syntax::parse(source, self.dialect)?;
        Ok(extract_roots(&file))
    }

    fn parse_selection(&self, selection: &str) -> Result<Vec<Node>> {
        let roots = self.parse_source(selection)?;
        if !roots.is_empty() {
            return Ok(roots);
        }
        // bare member list, e.g. `id: string; email: string;`
        let wrapped = format!("interface {SELECTION_WRAPPER} {{\n{selection}\n}}");
        let roots = self.parse_source(&wrapped)?;
        Ok(roots.into_iter().filter(|root| !root.children().is_empty()).collect())
    }
}

/// One root per top-level interface (merged declarations once) or resolvable alias,
/// in file order. Enums only feed other declarations.
pub fn extract_roots(file: &SourceFile) -> Vec<Node> {
    let checker = TypeChecker::new(file);
    let mut resolver = Resolver::new(&checker);
    let mut seen = HashSet::new();
    let mut roots = Vec::new();
    for decl in &file.declarations {
        match decl {
            Declaration::Interface(interface) => {
                if seen.insert(interface.name.as_str()) {
                    roots.push(resolver.resolve_interface(interface));
                }
            }
            Declaration::TypeAlias(alias) => match resolver.resolve_alias(alias) {
                Some(node) => roots.push(node),
                None => tracing::debug!(alias = %alias.name, "type alias has no mock-able shape"),
            },
            Declaration::Enum(_) => {}
        }
    }
    tracing::debug!(declarations = file.declarations.len(), roots = roots.len(), "extracted");
    roots
}
