//! Resolved type graph, as handed over by the package loader.
//!
//! The graph mirrors the vocabulary of Go's type checker: basic kinds,
//! named types, composite literals, signatures and interfaces. It is plain
//! data so that any resolver able to emit the JSON form can feed the
//! interpreter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicKind {
    Invalid,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Byte,
    Rune,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedString,
    UntypedNil,
}

impl BasicKind {
    /// Name as printed by the Go type checker.
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Invalid => "invalid type",
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Byte => "byte",
            BasicKind::Rune => "rune",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::UnsafePointer => "Pointer",
            BasicKind::UntypedBool => "untyped bool",
            BasicKind::UntypedInt => "untyped int",
            BasicKind::UntypedRune => "untyped rune",
            BasicKind::UntypedFloat => "untyped float",
            BasicKind::UntypedComplex => "untyped complex",
            BasicKind::UntypedString => "untyped string",
            BasicKind::UntypedNil => "untyped nil",
        }
    }

    pub fn is_untyped(self) -> bool {
        matches!(
            self,
            BasicKind::UntypedBool
                | BasicKind::UntypedInt
                | BasicKind::UntypedRune
                | BasicKind::UntypedFloat
                | BasicKind::UntypedComplex
                | BasicKind::UntypedString
                | BasicKind::UntypedNil
        )
    }
}

/// Package identity: import path plus declared package name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageRef {
    pub path: String,
    pub name: String,
}

impl PackageRef {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A named slot: struct field, parameter or result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Var {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: GoType,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: GoType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn unnamed(ty: GoType) -> Self {
        Self::new("", ty)
    }
}

/// An explicitly declared interface method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: GoType,
}

/// A node of the resolved type graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoType {
    Basic {
        name: BasicKind,
    },
    Named {
        name: String,
        #[serde(default)]
        package: Option<PackageRef>,
        /// Definition of the named type; only present for types whose
        /// declaration was resolved.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        underlying: Option<Box<GoType>>,
    },
    Pointer {
        elem: Box<GoType>,
    },
    Slice {
        elem: Box<GoType>,
    },
    Array {
        len: u64,
        elem: Box<GoType>,
    },
    Map {
        key: Box<GoType>,
        elem: Box<GoType>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<GoType>,
    },
    Struct {
        #[serde(default)]
        fields: Vec<Var>,
    },
    Signature {
        #[serde(default)]
        params: Vec<Var>,
        #[serde(default)]
        results: Vec<Var>,
        #[serde(default)]
        variadic: bool,
    },
    Interface {
        #[serde(default)]
        methods: Vec<Method>,
        #[serde(default)]
        embedded: Vec<GoType>,
    },
    TypeParam {
        name: String,
    },
}

impl GoType {
    pub fn basic(kind: BasicKind) -> Self {
        GoType::Basic { name: kind }
    }

    /// Reference to a named type without its definition.
    pub fn named(name: impl Into<String>, package: Option<PackageRef>) -> Self {
        GoType::Named {
            name: name.into(),
            package,
            underlying: None,
        }
    }

    pub fn pointer(elem: GoType) -> Self {
        GoType::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: GoType) -> Self {
        GoType::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn map(key: GoType, elem: GoType) -> Self {
        GoType::Map {
            key: Box::new(key),
            elem: Box::new(elem),
        }
    }

    pub fn signature(params: Vec<Var>, results: Vec<Var>) -> Self {
        GoType::Signature {
            params,
            results,
            variadic: false,
        }
    }

    pub fn interface(methods: Vec<Method>) -> Self {
        GoType::Interface {
            methods,
            embedded: Vec::new(),
        }
    }

    /// The `context.Context` interface, referenced by name.
    pub fn context() -> Self {
        GoType::named("Context", Some(PackageRef::new("context", "context")))
    }

    /// Strips one level of naming, like `types.Type.Underlying`.
    pub fn underlying(&self) -> &GoType {
        match self {
            GoType::Named {
                underlying: Some(inner),
                ..
            } => inner,
            other => other,
        }
    }

    /// Short kind label used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            GoType::Basic { .. } => "basic",
            GoType::Named { .. } => "named",
            GoType::Pointer { .. } => "pointer",
            GoType::Slice { .. } => "slice",
            GoType::Array { .. } => "array",
            GoType::Map { .. } => "map",
            GoType::Chan { .. } => "chan",
            GoType::Struct { .. } => "struct",
            GoType::Signature { .. } => "signature",
            GoType::Interface { .. } => "interface",
            GoType::TypeParam { .. } => "type parameter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    TypeName,
    Var,
    Const,
    Func,
}

/// A package-scope declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub kind: ObjectKind,
    #[serde(rename = "type")]
    pub ty: GoType,
}

/// A type-checked package with its package-level scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub scope: BTreeMap<String, Object>,
}

impl Package {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            scope: BTreeMap::new(),
        }
    }

    /// Declares a named type in scope, wiring the package reference into it.
    pub fn declare_type(&mut self, name: &str, underlying: GoType) -> &mut Self {
        let ty = GoType::Named {
            name: name.to_string(),
            package: Some(self.package_ref()),
            underlying: Some(Box::new(underlying)),
        };
        self.scope.insert(
            name.to_string(),
            Object {
                kind: ObjectKind::TypeName,
                ty,
            },
        );
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&Object> {
        self.scope.get(name)
    }

    pub fn package_ref(&self) -> PackageRef {
        PackageRef::new(self.path.clone(), self.name.clone())
    }
}

/// Serialized form of a loader result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub packages: Vec<Package>,
}
