//! Written types → `ir::Node` trees.
//!
//! Every type is first classified into exactly one `TypeClass`; the order of the arms
//! in `classify` is the precedence between overlapping shapes (a `Date` reference that
//! is also object-like is a date, a union of literals is an enum, ...). Shapes that
//! cannot be mocked resolve to `None` and the caller leaves them out.
use crate::ir::{EnumValue, Node, Shape};
use super::checker::{Apparent, TypeChecker};
use super::syntax::{InterfaceDecl, Keyword, PropertySig, TypeAliasDecl, TypeExpr};

/// Hard nesting cap, on top of the on-path check for recursive declarations.
pub const MAX_DEPTH: usize = 32;

const ELEMENT_NAME: &str = "element";

#[derive(Debug, Clone)]
pub enum TypeClass<'a> {
    String,
    Number,
    Boolean,
    Date,
    Array(&'a TypeExpr),
    LiteralUnion(Vec<EnumValue>),
    Enum(Vec<EnumValue>),
    Object(Vec<&'a PropertySig>),
    Unsupported,
}

pub struct Resolver<'c, 'a> {
    checker: &'c TypeChecker<'a>,
    path: Vec<&'a str>,              // local declarations being expanded
}

impl<'c, 'a> Resolver<'c, 'a> {
    pub fn new(checker: &'c TypeChecker<'a>) -> Self {
        Self { checker, path: Vec::new() }
    }

    /// Interfaces always produce an object node, even without resolvable members.
    pub fn resolve_interface(&mut self, decl: &'a InterfaceDecl) -> Node {
        self.path.push(&decl.name);
        let props = self.checker.interface_members(&decl.name);
        let children = self.properties(props, 1);
        self.path.pop();
        let mut node = Node::new(&decl.name, &decl.name, Shape::Object { children });
        node.hint = decl.hint.clone();
        node
    }

    pub fn resolve_alias(&mut self, decl: &'a TypeAliasDecl) -> Option<Node> {
        self.path.push(&decl.name);
        let node = self.build(&decl.value, &decl.name, 0);
        self.path.pop();
        let mut node = node?;
        node.hint = decl.hint.clone();
        Some(node)
    }

    fn resolve_at(&mut self, ty: &'a TypeExpr, name: &str, depth: usize) -> Option<Node> {
        if depth > MAX_DEPTH {
            tracing::debug!(name, depth, "nesting limit reached");
            return None;
        }
        let entered = match self.checker.local_declaration(ty) {
            Some(decl) if self.path.contains(&decl) => {
                tracing::debug!(name, declaration = decl, "recursive reference left out");
                return None;
            }
            Some(decl) => {
                self.path.push(decl);
                true
            }
            None => false,
        };
        let node = self.build(ty, name, depth);
        if entered {
            self.path.pop();
        }
        node
    }

    fn build(&mut self, ty: &'a TypeExpr, name: &str, depth: usize) -> Option<Node> {
        let mut apparent = self.checker.apparent(ty);
        let mut nullable = false;

        // `T | null | undefined` is an optional `T`
        if let Apparent::Union(members) = &apparent {
            let (nullish, rest): (Vec<&'a TypeExpr>, Vec<&'a TypeExpr>) =
                members.iter().copied().partition(|m| self.checker.is_nullish(*m));
            nullable = !nullish.is_empty();
            if nullable {
                match rest.as_slice() {
                    [] => return None,
                    [single] => {
                        let mut node = self.resolve_at(*single, name, depth + 1)?;
                        node.is_optional = true;
                        node.original_type = ty.text.clone();
                        return Some(node);
                    }
                    _ => apparent = Apparent::Union(rest),
                }
            }
        }

        let shape = match self.classify(&ty.text, apparent, depth) {
            TypeClass::String => Shape::String,
            TypeClass::Number => Shape::Number,
            TypeClass::Boolean => Shape::Boolean,
            TypeClass::Date => Shape::Date,
            TypeClass::Array(element) => {
                let element = self.resolve_at(element, ELEMENT_NAME, depth + 1)?;
                Shape::Array { element: Box::new(element) }
            }
            TypeClass::LiteralUnion(values) | TypeClass::Enum(values) => {
                if values.is_empty() {
                    tracing::debug!(name, ty = %ty.text, "enum without literal values");
                    return None;
                }
                Shape::Enum { values }
            }
            TypeClass::Object(props) => Shape::Object { children: self.properties(props, depth + 1) },
            TypeClass::Unsupported => {
                tracing::debug!(name, ty = %ty.text, "type has no mock-able shape");
                return None;
            }
        };
        let mut node = Node::new(name, &ty.text, shape);
        node.is_optional = nullable;
        Some(node)
    }

    /// One determinate class per type; arm order is precedence.
    pub fn classify(&self, text: &str, apparent: Apparent<'a>, depth: usize) -> TypeClass<'a> {
        match apparent {
            Apparent::Keyword(Keyword::String) => TypeClass::String,
            Apparent::Keyword(Keyword::Number | Keyword::BigInt) => TypeClass::Number,
            // `true` alone still varies between instances, like `true | false`
            Apparent::Keyword(Keyword::Boolean) | Apparent::BoolLiteral(_) => TypeClass::Boolean,
            Apparent::Union(ref members) if members.iter().all(|m| self.is_bool_literal(m)) => {
                TypeClass::Boolean
            }
            _ if text.trim() == "Date" => TypeClass::Date,
            Apparent::Array(element) => TypeClass::Array(element),
            Apparent::Union(members) => match self.literal_values(&members, depth) {
                Some(values) => TypeClass::LiteralUnion(values),
                None => TypeClass::Unsupported,
            },
            // a lone literal is the one-member case of a literal union
            Apparent::Literal(value) => TypeClass::LiteralUnion(vec![value.clone()]),
            Apparent::Enum(decl) => {
                TypeClass::Enum(decl.members.iter().filter_map(|m| m.value.clone()).collect())
            }
            Apparent::EnumMember(member) => TypeClass::Enum(member.value.iter().cloned().collect()),
            Apparent::Object(props) => TypeClass::Object(props),
            Apparent::Keyword(_) | Apparent::External(_) | Apparent::Unsupported => {
                TypeClass::Unsupported
            }
        }
    }

    fn is_bool_literal(&self, ty: &'a TypeExpr) -> bool {
        matches!(self.checker.apparent(ty), Apparent::BoolLiteral(_))
    }

    /// Literal values of a union, in order; `None` as soon as one member is not a
    /// string/number literal. Nested unions (through aliases) are flattened.
    fn literal_values(&self, members: &[&'a TypeExpr], depth: usize) -> Option<Vec<EnumValue>> {
        if depth > MAX_DEPTH {
            return None;
        }
        let mut values = Vec::new();
        for member in members {
            match self.checker.apparent(member) {
                Apparent::Literal(value) => values.push(value.clone()),
                Apparent::EnumMember(member) => values.push(member.value.clone()?),
                Apparent::Union(inner) => values.extend(self.literal_values(&inner, depth + 1)?),
                _ => return None,
            }
        }
        Some(values)
    }

    fn properties(&mut self, props: Vec<&'a PropertySig>, depth: usize) -> Vec<Node> {
        let mut children: Vec<Node> = Vec::with_capacity(props.len());
        for prop in props {
            if children.iter().any(|c| c.name == prop.name) {
                continue;
            }
            if let Some(node) = self.property(prop, depth) {
                children.push(node);
            }
        }
        children
    }

    fn property(&mut self, prop: &'a PropertySig, depth: usize) -> Option<Node> {
        let Some(ty) = &prop.ty else {
            tracing::debug!(property = %prop.name, "property without type annotation");
            return None;
        };
        let mut node = self.resolve_at(ty, &prop.name, depth)?;
        node.is_optional |= prop.optional;
        node.hint = prop.hint.clone();
        Some(node)
    }
}
