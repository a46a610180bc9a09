//! Name resolution over one parsed file.
//!
//! Stands in for a full type checker: it knows the file's own interfaces, aliases and
//! enums plus the `Array<T>` / `ReadonlyArray<T>` built-ins, and reports the apparent
//! structure of a written type. Anything declared elsewhere comes back as `External`.
use std::collections::HashMap;
use crate::ir::EnumValue;
use super::syntax::{
    Declaration, EnumDecl, EnumMember, Keyword, PropertySig, SourceFile, TypeExpr, TypeExprKind,
};

/// Alias/`extends` hops followed before giving up (`type A = B; type B = A`).
const MAX_ALIAS_HOPS: usize = 16;

#[derive(Debug, Clone)]
pub enum Apparent<'a> {
    Keyword(Keyword),
    Literal(&'a EnumValue),
    BoolLiteral(bool),
    Array(&'a TypeExpr),
    Union(Vec<&'a TypeExpr>),
    Enum(&'a EnumDecl),
    EnumMember(&'a EnumMember),
    Object(Vec<&'a PropertySig>),
    External(&'a str),
    Unsupported,
}

pub struct TypeChecker<'a> {
    names: HashMap<&'a str, Vec<&'a Declaration>>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        let mut names: HashMap<&'a str, Vec<&'a Declaration>> = HashMap::new();
        for decl in &file.declarations {
            names.entry(decl.name()).or_default().push(decl);
        }
        Self { names }
    }

    pub fn apparent(&self, ty: &'a TypeExpr) -> Apparent<'a> {
        self.apparent_at(ty, 0)
    }

    /// Name of the local interface or alias a reference points at.
    pub fn local_declaration(&self, ty: &'a TypeExpr) -> Option<&'a str> {
        let TypeExprKind::Reference { name, .. } = &ty.kind else { return None };
        let decls = self.names.get(name.as_str())?;
        decls
            .iter()
            .any(|d| matches!(d, Declaration::Interface(_) | Declaration::TypeAlias(_)))
            .then_some(decls[0].name())
    }

    pub fn is_nullish(&self, ty: &'a TypeExpr) -> bool {
        matches!(self.apparent(ty), Apparent::Keyword(Keyword::Null | Keyword::Undefined))
    }

    /// Own members first, then inherited ones that are not redeclared. Declarations
    /// sharing a name merge, as they do in TypeScript.
    pub fn interface_members(&self, name: &str) -> Vec<&'a PropertySig> {
        self.interface_members_at(name, 0)
    }

    fn apparent_at(&self, ty: &'a TypeExpr, hops: usize) -> Apparent<'a> {
        match &ty.kind {
            TypeExprKind::Keyword(keyword) => Apparent::Keyword(*keyword),
            TypeExprKind::Literal(value) => Apparent::Literal(value),
            TypeExprKind::BoolLiteral(value) => Apparent::BoolLiteral(*value),
            TypeExprKind::Array(element) => Apparent::Array(element),
            TypeExprKind::Union(members) => Apparent::Union(members.iter().collect()),
            TypeExprKind::Intersection(members) => self.intersection(members, hops),
            TypeExprKind::Object(members) => Apparent::Object(members.iter().collect()),
            TypeExprKind::Reference { name, args } => self.reference(name, args, hops),
            TypeExprKind::Other => Apparent::Unsupported,
        }
    }

    fn reference(&self, name: &'a str, args: &'a [TypeExpr], hops: usize) -> Apparent<'a> {
        if hops >= MAX_ALIAS_HOPS {
            tracing::debug!(name, "alias chain too deep");
            return Apparent::Unsupported;
        }
        if let ("Array" | "ReadonlyArray", [element]) = (name, args) {
            return Apparent::Array(element);
        }
        if let Some((owner, member)) = name.split_once('.') {
            return match self.enum_named(owner).and_then(|e| e.member(member)) {
                Some(member) => Apparent::EnumMember(member),
                None => Apparent::External(name),
            };
        }
        let Some(decls) = self.names.get(name) else {
            return Apparent::External(name);
        };
        if decls.iter().any(|d| matches!(d, Declaration::Interface(_))) {
            return Apparent::Object(self.interface_members_at(name, hops));
        }
        match decls[0] {
            Declaration::TypeAlias(alias) => self.apparent_at(&alias.value, hops + 1),
            Declaration::Enum(decl) => Apparent::Enum(decl),
            Declaration::Interface(_) => Apparent::Unsupported,
        }
    }

    fn interface_members_at(&self, name: &str, hops: usize) -> Vec<&'a PropertySig> {
        let mut members: Vec<&'a PropertySig> = Vec::new();
        let interfaces = self.names.get(name).into_iter().flatten().filter_map(|d| match *d {
            Declaration::Interface(i) => Some(i),
            _ => None,
        });
        let mut parents = Vec::new();
        for interface in interfaces {
            for member in &interface.members {
                push_unique(&mut members, member);
            }
            parents.extend(interface.extends.iter());
        }
        if hops >= MAX_ALIAS_HOPS {
            tracing::debug!(name, "interface hierarchy too deep");
            return members;
        }
        for parent in parents {
            if let Apparent::Object(inherited) = self.apparent_at(parent, hops + 1) {
                for member in inherited {
                    push_unique(&mut members, member);
                }
            }
        }
        members
    }

    fn intersection(&self, parts: &'a [TypeExpr], hops: usize) -> Apparent<'a> {
        let mut members = Vec::new();
        for part in parts {
            match self.apparent_at(part, hops + 1) {
                Apparent::Object(props) => {
                    for prop in props {
                        push_unique(&mut members, prop);
                    }
                }
                _ => return Apparent::Unsupported,
            }
        }
        Apparent::Object(members)
    }

    fn enum_named(&self, name: &str) -> Option<&'a EnumDecl> {
        self.names.get(name)?.iter().find_map(|d| match *d {
            Declaration::Enum(e) => Some(e),
            _ => None,
        })
    }
}

fn push_unique<'a>(members: &mut Vec<&'a PropertySig>, member: &'a PropertySig) {
    if !members.iter().any(|m| m.name == member.name) {
        members.push(member);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typescript::syntax::{parse, Dialect};

    fn alias_value<'a>(file: &'a SourceFile, name: &str) -> &'a TypeExpr {
        file.declarations
            .iter()
            .find_map(|d| match d {
                Declaration::TypeAlias(a) if a.name == name => Some(&a.value),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn follows_alias_chains_to_the_target_shape() {
        let file = parse("type A = B; type B = string[];", Dialect::TypeScript).unwrap();
        let checker = TypeChecker::new(&file);
        assert!(matches!(checker.apparent(alias_value(&file, "A")), Apparent::Array(_)));
    }

    #[test]
    fn cyclic_aliases_stop() {
        let file = parse("type A = B; type B = A;", Dialect::TypeScript).unwrap();
        let checker = TypeChecker::new(&file);
        assert!(matches!(checker.apparent(alias_value(&file, "A")), Apparent::Unsupported));
    }

    #[test]
    fn inherited_members_follow_own_members() {
        let file = parse(
            r#"
            interface Base { id: string; name: string }
            interface User extends Base { name: string; email: string }
            "#,
            Dialect::TypeScript,
        )
        .unwrap();
        let checker = TypeChecker::new(&file);
        let names: Vec<_> = checker.interface_members("User").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["name", "email", "id"]);
    }

    #[test]
    fn merged_interface_declarations_and_intersections() {
        let file = parse(
            r#"
            interface Box { width: number }
            interface Box { height: number }
            type Tagged = Box & { tag: string };
            type Broken = Box & string;
            "#,
            Dialect::TypeScript,
        )
        .unwrap();
        let checker = TypeChecker::new(&file);
        let Apparent::Object(props) = checker.apparent(alias_value(&file, "Tagged")) else { panic!() };
        let names: Vec<_> = props.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["width", "height", "tag"]);
        assert!(matches!(checker.apparent(alias_value(&file, "Broken")), Apparent::Unsupported));
    }

    #[test]
    fn enum_members_and_external_names() {
        let file = parse(
            "enum Color { Red = 'red' } type R = Color.Red; type E = Color; type X = Moment;",
            Dialect::TypeScript,
        )
        .unwrap();
        let checker = TypeChecker::new(&file);
        assert!(matches!(checker.apparent(alias_value(&file, "R")), Apparent::EnumMember(m) if m.name == "Red"));
        assert!(matches!(checker.apparent(alias_value(&file, "E")), Apparent::Enum(e) if e.name == "Color"));
        assert!(matches!(checker.apparent(alias_value(&file, "X")), Apparent::External("Moment")));
    }
}
