use crate::graph::{BasicKind, PackageRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A derived type node.
///
/// The tree is bounded by the derivation depth limit and never refers back
/// into the type graph, so it can be freely cloned and serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeNode {
    /// Built-in scalar kind
    Primitive(BasicKind),

    /// Reference to a declared type; its definition is not expanded
    Named(NamedRef),

    Pointer(Box<TypeNode>),

    Slice(Box<TypeNode>),

    Map {
        key: Box<TypeNode>,
        value: Box<TypeNode>,
    },

    /// Anonymous struct literal
    Struct(Vec<NamedField>),

    /// Anonymous function signature
    Function(FunctionType),

    /// Interface literal, explicit methods only
    Interface(Vec<DeclaredFunction>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
    /// `None` for predeclared types such as `error`
    pub package: Option<PackageRef>,
    pub exported: bool,
}

/// A parameter, result or struct field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedField {
    pub name: String,
    pub ty: TypeNode,
    /// Whether the name came from the declaration rather than being synthesized
    pub explicit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionType {
    pub params: Vec<NamedField>,
    pub results: Vec<NamedField>,
    pub variadic: bool,
}

/// A method declared on an interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredFunction {
    pub name: String,
    pub params: Vec<NamedField>,
    pub results: Vec<NamedField>,
    pub variadic: bool,
}

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

pub fn is_keyword(ident: &str) -> bool {
    GO_KEYWORDS.contains(&ident)
}

/// Go's export rule: the identifier starts with an upper-case letter.
pub fn is_exported(ident: &str) -> bool {
    ident.chars().next().is_some_and(char::is_uppercase)
}

/// Turns an arbitrary seed into a usable identifier.
pub fn sanitize_identifier(seed: &str) -> String {
    let mut ident: String = seed
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if ident.is_empty() {
        ident.push('v');
    }
    if ident.starts_with(|c: char| c.is_numeric()) {
        ident.insert(0, '_');
    }
    if is_keyword(&ident) {
        ident.push('_');
    }
    ident
}

impl NamedRef {
    pub fn new(name: impl Into<String>, package: Option<PackageRef>) -> Self {
        let name = name.into();
        let exported = is_exported(&name);
        Self {
            name,
            package,
            exported,
        }
    }

    /// `pkg.Name`, or the bare name for predeclared types.
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(pkg) => format!("{}.{}", pkg.name, self.name),
            None => self.name.clone(),
        }
    }

    pub fn is(&self, path: &str, name: &str) -> bool {
        self.name == name && self.package.as_ref().is_some_and(|pkg| pkg.path == path)
    }
}

impl TypeNode {
    /// Identifier seed used when a declaration omits a name.
    pub fn type_name(&self) -> String {
        match self {
            TypeNode::Primitive(kind) => kind.name().to_string(),
            TypeNode::Named(named) => named.name.clone(),
            TypeNode::Pointer(inner) => format!("ptr{}", inner.type_name()),
            TypeNode::Slice(inner) => format!("slice{}", inner.type_name()),
            TypeNode::Map { .. } => "map".to_string(),
            TypeNode::Struct(_) => "strct".to_string(),
            TypeNode::Function(_) => "func".to_string(),
            TypeNode::Interface(_) => "interface".to_string(),
        }
    }

    /// Whether this node references the declared type `path.name`.
    pub fn is_named(&self, path: &str, name: &str) -> bool {
        matches!(self, TypeNode::Named(named) if named.is(path, name))
    }

    /// Packages a file must import to spell this type.
    pub fn collect_imports(&self, out: &mut BTreeSet<PackageRef>) {
        match self {
            TypeNode::Primitive(BasicKind::UnsafePointer) => {
                out.insert(PackageRef::new("unsafe", "unsafe"));
            }
            TypeNode::Primitive(_) => {}
            TypeNode::Named(named) => {
                // Unexported names from other packages cannot be spelled anyway.
                if let (Some(pkg), true) = (&named.package, named.exported) {
                    out.insert(pkg.clone());
                }
            }
            TypeNode::Pointer(inner) | TypeNode::Slice(inner) => inner.collect_imports(out),
            TypeNode::Map { key, value } => {
                key.collect_imports(out);
                value.collect_imports(out);
            }
            TypeNode::Struct(fields) => {
                for field in fields {
                    field.ty.collect_imports(out);
                }
            }
            TypeNode::Function(func) => {
                for field in func.params.iter().chain(&func.results) {
                    field.ty.collect_imports(out);
                }
            }
            TypeNode::Interface(methods) => {
                for method in methods {
                    method.collect_imports(out);
                }
            }
        }
    }

    /// Human-readable rendering used in derivation traces.
    pub fn debug_string(&self) -> String {
        match self {
            TypeNode::Primitive(kind) => kind.name().to_string(),
            TypeNode::Named(named) => match &named.package {
                Some(pkg) => format!("{}.{}", pkg.path, named.name),
                None => named.name.clone(),
            },
            TypeNode::Pointer(inner) => format!("Pointer type: {}", inner.debug_string()),
            TypeNode::Slice(inner) => format!("Slice type: {}", inner.debug_string()),
            TypeNode::Map { key, value } => {
                format!("Map type: ({}[{}])", key.debug_string(), value.debug_string())
            }
            TypeNode::Struct(fields) => {
                format!("Struct type: {{{}}}", debug_fields(fields))
            }
            TypeNode::Function(func) => format!(
                "Func type: ({}) ({})",
                debug_fields(&func.params),
                debug_fields(&func.results)
            ),
            TypeNode::Interface(methods) => {
                let mut out = String::from("Interface type: {");
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(&method.debug_string());
                }
                out.push('}');
                out
            }
        }
    }
}

fn debug_fields(fields: &[NamedField]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&field.debug_string());
    }
    out
}

impl NamedField {
    pub fn new(name: impl Into<String>, ty: TypeNode, explicit: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            explicit,
        }
    }

    /// The type this field denotes, with the naming stripped.
    pub fn underlying(&self) -> &TypeNode {
        &self.ty
    }

    pub fn debug_string(&self) -> String {
        format!("Named {}({})", self.name, self.ty.debug_string())
    }
}

impl DeclaredFunction {
    pub fn collect_imports(&self, out: &mut BTreeSet<PackageRef>) {
        for field in self.params.iter().chain(&self.results) {
            field.ty.collect_imports(out);
        }
    }

    pub fn debug_string(&self) -> String {
        format!(
            "Declared Func: {}({}) ({})",
            self.name,
            debug_fields(&self.params),
            debug_fields(&self.results)
        )
    }

    /// Whether any result carries a name from the declaration.
    pub fn has_named_results(&self) -> bool {
        self.results.iter().any(|r| r.explicit)
    }
}
