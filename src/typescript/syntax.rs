//! tree-sitter front end: one TypeScript source text in, top-level declarations out.
//!
//! Only what the resolver needs is kept: interfaces (with `extends`), type aliases,
//! enums, and a structural `TypeExpr` for every written type together with its source
//! text. Everything else in the file (functions, classes, statements) is ignored.
use tree_sitter::{Node as SyntaxNode, Parser};
use crate::error::{Error, Result};
use crate::ir::EnumValue;
use super::jsdoc;

// ------------------------------- Dialect --------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    pub fn label(self) -> &'static str {
        match self {
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "typescriptreact",
        }
    }
    fn grammar(self) -> tree_sitter::Language {
        match self {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

// -------------------------------- Model ---------------------------------- //

#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone)]
pub enum Declaration {
    Interface(InterfaceDecl),
    TypeAlias(TypeAliasDecl),
    Enum(EnumDecl),
}

#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub name: String,
    pub extends: Vec<TypeExpr>,
    pub members: Vec<PropertySig>,
    pub hint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TypeAliasDecl {
    pub name: String,
    pub value: TypeExpr,
    pub hint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: String,
    pub value: Option<EnumValue>,    // None for computed members
}

#[derive(Debug, Clone)]
pub struct PropertySig {
    pub name: String,
    pub optional: bool,              // written with `?`
    pub ty: Option<TypeExpr>,        // None when the annotation is missing
    pub hint: Option<String>,
}

/// A written type: its source text plus the structure tree-sitter gave us.
#[derive(Debug, Clone)]
pub struct TypeExpr {
    pub text: String,
    pub kind: TypeExprKind,
}

#[derive(Debug, Clone)]
pub enum TypeExprKind {
    Keyword(Keyword),
    Literal(EnumValue),
    BoolLiteral(bool),
    Reference { name: String, args: Vec<TypeExpr> },
    Array(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    Object(Vec<PropertySig>),
    Other,                           // functions, tuples, mapped/conditional types, ...
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    String,
    Number,
    BigInt,
    Boolean,
    Null,
    Undefined,
    Void,
    Any,
    Unknown,
    Never,
    Object,
    Symbol,
}

impl Keyword {
    fn from_text(text: &str) -> Option<Self> {
        Some(match text {
            "string" => Keyword::String,
            "number" => Keyword::Number,
            "bigint" => Keyword::BigInt,
            "boolean" => Keyword::Boolean,
            "null" => Keyword::Null,
            "undefined" => Keyword::Undefined,
            "void" => Keyword::Void,
            "any" => Keyword::Any,
            "unknown" => Keyword::Unknown,
            "never" => Keyword::Never,
            "object" => Keyword::Object,
            "symbol" | "unique symbol" => Keyword::Symbol,
            _ => return None,
        })
    }
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Interface(d) => &d.name,
            Declaration::TypeAlias(d) => &d.name,
            Declaration::Enum(d) => &d.name,
        }
    }
}

impl EnumDecl {
    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

// -------------------------------- Parse ---------------------------------- //

pub fn parse(source: &str, dialect: Dialect) -> Result<SourceFile> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.grammar())
        .map_err(|source| Error::Grammar { language: dialect.label(), source })?;
    let tree = parser.parse(source, None).ok_or(Error::Parse(dialect.label()))?;
    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!(dialect = dialect.label(), "source contains syntax errors; keeping what parsed");
    }

    let cx = Cx { src: source.as_bytes() };
    let mut file = SourceFile::default();
    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        cx.statement(statement, statement, &mut file.declarations);
    }
    Ok(file)
}

struct Cx<'s> {
    src: &'s [u8],
}

impl<'s> Cx<'s> {
    fn text(&self, node: SyntaxNode) -> &'s str {
        node.utf8_text(self.src).unwrap_or_default()
    }

    /// `outer` is the node a doc comment would sit in front of (the `export` wrapper
    /// when there is one).
    fn statement(&self, node: SyntaxNode, outer: SyntaxNode, out: &mut Vec<Declaration>) {
        match node.kind() {
            "export_statement" | "ambient_declaration" => {
                let inner = node.child_by_field_name("declaration").or_else(|| {
                    let mut cursor = node.walk();
                    let found = node.named_children(&mut cursor).find(|c| c.kind().ends_with("_declaration"));
                    found
                });
                if let Some(inner) = inner {
                    self.statement(inner, outer, out);
                }
            }
            "interface_declaration" => out.push(Declaration::Interface(self.interface(node, outer))),
            "type_alias_declaration" => {
                if let Some(alias) = self.type_alias(node, outer) {
                    out.push(Declaration::TypeAlias(alias));
                }
            }
            "enum_declaration" => out.push(Declaration::Enum(self.enum_decl(node))),
            _ => {}
        }
    }

    fn name_of(&self, node: SyntaxNode) -> String {
        node.child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_else(|| "Anonymous".to_string())
    }

    fn hint_before(&self, node: SyntaxNode) -> Option<String> {
        let prev = node.prev_named_sibling()?;
        if prev.kind() != "comment" {
            return None;
        }
        jsdoc::hint(self.text(prev))
    }

    fn interface(&self, node: SyntaxNode, outer: SyntaxNode) -> InterfaceDecl {
        let mut extends = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "extends_type_clause" {
                let mut inner = child.walk();
                for ty in child.named_children(&mut inner) {
                    extends.push(self.type_expr(ty));
                }
            }
        }
        InterfaceDecl {
            name: self.name_of(node),
            extends,
            members: node.child_by_field_name("body").map(|b| self.members(b)).unwrap_or_default(),
            hint: self.hint_before(outer),
        }
    }

    fn type_alias(&self, node: SyntaxNode, outer: SyntaxNode) -> Option<TypeAliasDecl> {
        let value = node.child_by_field_name("value")?;
        Some(TypeAliasDecl {
            name: self.name_of(node),
            value: self.type_expr(value),
            hint: self.hint_before(outer),
        })
    }

    fn enum_decl(&self, node: SyntaxNode) -> EnumDecl {
        let mut members = Vec::new();
        // numeric members without initializer continue from the previous value
        let mut next: Option<i64> = Some(0);
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for child in body.named_children(&mut cursor) {
                match child.kind() {
                    "comment" => continue,
                    "enum_assignment" => {
                        let value = child
                            .child_by_field_name("value")
                            .or_else(|| {
                                let mut inner = child.walk();
                                let last = child.named_children(&mut inner).last();
                                last
                            })
                            .and_then(|v| self.literal_value(v));
                        next = match &value {
                            Some(EnumValue::Number(n)) => n.as_i64().and_then(|i| i.checked_add(1)),
                            _ => None,
                        };
                        let name = child
                            .child_by_field_name("name")
                            .map(|n| self.property_name(n))
                            .unwrap_or_default();
                        members.push(EnumMember { name, value });
                    }
                    _ => {
                        let value = next.map(|i| EnumValue::Number(i.into()));
                        next = next.and_then(|i| i.checked_add(1));
                        members.push(EnumMember { name: self.property_name(child), value });
                    }
                }
            }
        }
        EnumDecl { name: self.name_of(node), members }
    }

    fn members(&self, body: SyntaxNode) -> Vec<PropertySig> {
        let mut out = Vec::new();
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            match child.kind() {
                "property_signature" => out.extend(self.property(child)),
                "comment" => {}
                other => tracing::debug!(member = other, "skipping non-property member"),
            }
        }
        out
    }

    fn property(&self, node: SyntaxNode) -> Option<PropertySig> {
        let name = self.property_name(node.child_by_field_name("name")?);
        let mut cursor = node.walk();
        let optional = node.children(&mut cursor).any(|c| c.kind() == "?");
        let ty = node
            .child_by_field_name("type")
            .and_then(|annotation| annotation.named_child(0))
            .map(|t| self.type_expr(t));
        Some(PropertySig { name, optional, ty, hint: self.hint_before(node) })
    }

    fn property_name(&self, node: SyntaxNode) -> String {
        let text = self.text(node);
        match node.kind() {
            "string" => unquote(text).to_string(),
            _ => text.to_string(),
        }
    }

    // ----------------------------- Types --------------------------------- //

    fn type_expr(&self, node: SyntaxNode) -> TypeExpr {
        let text = self.text(node).trim().to_string();
        let kind = match node.kind() {
            "predefined_type" => Keyword::from_text(&text).map_or(TypeExprKind::Other, TypeExprKind::Keyword),
            "type_identifier" | "nested_type_identifier" | "identifier" => match Keyword::from_text(&text) {
                Some(keyword) => TypeExprKind::Keyword(keyword),
                None => TypeExprKind::Reference { name: compact(&text), args: Vec::new() },
            },
            "generic_type" => {
                let name = node
                    .child_by_field_name("name")
                    .map(|n| compact(self.text(n)))
                    .unwrap_or_default();
                let mut args = Vec::new();
                if let Some(list) = node.child_by_field_name("type_arguments") {
                    let mut cursor = list.walk();
                    for arg in list.named_children(&mut cursor) {
                        args.push(self.type_expr(arg));
                    }
                }
                TypeExprKind::Reference { name, args }
            }
            "array_type" => match node.named_child(0) {
                Some(element) => TypeExprKind::Array(Box::new(self.type_expr(element))),
                None => TypeExprKind::Other,
            },
            // `readonly T[]` and `(T)` keep the inner structure but the outer text
            "readonly_type" | "parenthesized_type" => match node.named_child(0) {
                Some(inner) => self.type_expr(inner).kind,
                None => TypeExprKind::Other,
            },
            "union_type" => {
                let mut members = Vec::new();
                self.flatten(node, "union_type", &mut members);
                TypeExprKind::Union(members)
            }
            "intersection_type" => {
                let mut members = Vec::new();
                self.flatten(node, "intersection_type", &mut members);
                TypeExprKind::Intersection(members)
            }
            "literal_type" => match node.named_child(0) {
                Some(literal) => self.literal_type(literal),
                None => TypeExprKind::Other,
            },
            "object_type" => TypeExprKind::Object(self.members(node)),
            _ => TypeExprKind::Other,
        };
        TypeExpr { text, kind }
    }

    /// `A | B | C` nests as binary nodes; collect the leaves in source order.
    fn flatten(&self, node: SyntaxNode, kind: &str, out: &mut Vec<TypeExpr>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == kind {
                self.flatten(child, kind, out);
            } else if child.kind() != "comment" {
                out.push(self.type_expr(child));
            }
        }
    }

    fn literal_type(&self, node: SyntaxNode) -> TypeExprKind {
        match node.kind() {
            "true" => TypeExprKind::BoolLiteral(true),
            "false" => TypeExprKind::BoolLiteral(false),
            "null" => TypeExprKind::Keyword(Keyword::Null),
            "undefined" => TypeExprKind::Keyword(Keyword::Undefined),
            _ => self.literal_value(node).map_or(TypeExprKind::Other, TypeExprKind::Literal),
        }
    }

    fn literal_value(&self, node: SyntaxNode) -> Option<EnumValue> {
        let text = self.text(node).trim();
        match node.kind() {
            "string" => Some(EnumValue::String(unquote(text).to_string())),
            "number" | "unary_expression" => parse_number(&compact(text)).map(EnumValue::Number),
            "parenthesized_expression" => node.named_child(0).and_then(|inner| self.literal_value(inner)),
            _ => None,
        }
    }
}

// ------------------------------- Helpers --------------------------------- //

fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && matches!(bytes[0], b'"' | b'\'' | b'`') && bytes[bytes.len() - 1] == bytes[0] {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn parse_number(text: &str) -> Option<serde_json::Number> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = digits.replace('_', "");
    let radix = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .iter()
        .find_map(|(prefix, radix)| digits.strip_prefix(prefix).map(|rest| (rest.to_string(), *radix)));
    if let Some((rest, radix)) = radix {
        let value = i64::from_str_radix(&rest, radix).ok()?;
        return Some(if negative { -value } else { value }.into());
    }
    if let Ok(value) = digits.parse::<i64>() {
        return Some(if negative { -value } else { value }.into());
    }
    let value = digits.parse::<f64>().ok()?;
    serde_json::Number::from_f64(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ts(src: &str) -> SourceFile {
        parse(src, Dialect::TypeScript).unwrap()
    }

    fn interface(file: &SourceFile, index: usize) -> &InterfaceDecl {
        match &file.declarations[index] {
            Declaration::Interface(i) => i,
            other => panic!("expected interface, got {other:?}"),
        }
    }

    #[test]
    fn collects_top_level_declarations_in_order() {
        let file = parse_ts(r#"
            export interface User { id: string }
            type Role = "admin" | "user";
            enum Color { Red, Green }
            function ignored() {}
            declare interface Ambient { x: number }
        "#);
        let names: Vec<_> = file.declarations.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["User", "Role", "Color", "Ambient"]);
    }

    #[test]
    fn property_signatures_keep_name_optionality_and_text() {
        let file = parse_ts(r#"
            interface User {
                id: string;
                nickname?: string;
                "display-name": string;
                tags: Array<string>;
                untyped;
            }
        "#);
        let user = interface(&file, 0);
        let names: Vec<_> = user.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["id", "nickname", "display-name", "tags", "untyped"]);
        assert!(!user.members[0].optional);
        assert!(user.members[1].optional);
        assert_eq!(user.members[3].ty.as_ref().unwrap().text, "Array<string>");
        assert!(user.members[4].ty.is_none());
    }

    #[test]
    fn unions_are_flattened_in_source_order() {
        let file = parse_ts(r#"type Size = "s" | "m" | "l" | 42 | null;"#);
        let Declaration::TypeAlias(alias) = &file.declarations[0] else { panic!() };
        let TypeExprKind::Union(members) = &alias.value.kind else { panic!("{:?}", alias.value) };
        assert_eq!(members.len(), 5);
        assert!(matches!(&members[0].kind, TypeExprKind::Literal(EnumValue::String(s)) if s == "s"));
        assert!(matches!(&members[3].kind, TypeExprKind::Literal(EnumValue::Number(n)) if n.as_i64() == Some(42)));
        assert!(matches!(members[4].kind, TypeExprKind::Keyword(Keyword::Null)));
    }

    #[test]
    fn parenthesized_array_element_keeps_union_structure() {
        let file = parse_ts(r#"interface U { roles: ("admin" | "user")[] }"#);
        let ty = interface(&file, 0).members[0].ty.clone().unwrap();
        let TypeExprKind::Array(element) = ty.kind else { panic!() };
        assert!(matches!(element.kind, TypeExprKind::Union(ref m) if m.len() == 2));
    }

    #[test]
    fn enum_members_follow_auto_increment() {
        let file = parse_ts(r#"
            enum Level { Low, Mid = 5, High, Named = "named", Negative = -2 }
        "#);
        let Declaration::Enum(level) = &file.declarations[0] else { panic!() };
        let values: Vec<_> = level.members.iter().map(|m| m.value.clone()).collect();
        assert_eq!(values, vec![
            Some(EnumValue::Number(0.into())),
            Some(EnumValue::Number(5.into())),
            Some(EnumValue::Number(6.into())),
            Some(EnumValue::String("named".into())),
            Some(EnumValue::Number((-2).into())),
        ]);
    }

    #[test]
    fn extends_clause_and_doc_hints_are_recorded() {
        let file = parse_ts(r#"
            /** @mock account holder */
            export interface Admin extends User, Audited {
                /** Primary contact.
                 * @mock work email only
                 */
                email: string;
            }
        "#);
        let admin = interface(&file, 0);
        assert_eq!(admin.hint.as_deref(), Some("account holder"));
        let parents: Vec<_> = admin.extends.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(parents, ["User", "Audited"]);
        assert_eq!(admin.members[0].hint.as_deref(), Some("work email only"));
    }

    #[test]
    fn numbers_in_every_notation() {
        assert_eq!(parse_number("0x10").unwrap().as_i64(), Some(16));
        assert_eq!(parse_number("1_000").unwrap().as_i64(), Some(1000));
        assert_eq!(parse_number("-3").unwrap().as_i64(), Some(-3));
        assert_eq!(parse_number("2.5").unwrap().as_f64(), Some(2.5));
        assert!(parse_number("abc").is_none());
    }
}
