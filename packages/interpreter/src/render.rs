//! Rendering of derived types back into Go source fragments.
//!
//! Every rendering is a pure function of the node and the file's
//! [`ImportTable`]; a parameter declaration and a return type for the same
//! node always spell the type identically.

use crate::graph::BasicKind;
use crate::imports::ImportTable;
use crate::types::{DeclaredFunction, FunctionType, NamedField, TypeNode};

/// Which parameter names a rendered signature carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamNames {
    /// Every parameter is named, synthesized names included.
    Always,
    /// Only names that came from the declaration.
    Explicit,
}

impl BasicKind {
    /// How the kind is spelled in a declaration. Untyped kinds use their
    /// default type.
    fn spelling(self) -> &'static str {
        match self {
            BasicKind::UntypedBool => "bool",
            BasicKind::UntypedInt => "int",
            BasicKind::UntypedRune => "rune",
            BasicKind::UntypedFloat => "float64",
            BasicKind::UntypedComplex => "complex128",
            BasicKind::UntypedString => "string",
            BasicKind::UntypedNil => "interface{}",
            other => other.name(),
        }
    }
}

impl TypeNode {
    /// The type as it appears in a result list or any type position.
    pub fn type_expr(&self, imports: &ImportTable) -> String {
        match self {
            TypeNode::Primitive(BasicKind::UnsafePointer) => imports.qualify("unsafe", "Pointer"),
            TypeNode::Primitive(kind) => kind.spelling().to_string(),
            TypeNode::Named(named) => match &named.package {
                Some(pkg) if named.exported => imports.qualify(&pkg.path, &named.name),
                _ => named.name.clone(),
            },
            TypeNode::Pointer(inner) => format!("*{}", inner.type_expr(imports)),
            TypeNode::Slice(inner) => format!("[]{}", inner.type_expr(imports)),
            TypeNode::Map { key, value } => {
                format!("map[{}]{}", key.type_expr(imports), value.type_expr(imports))
            }
            TypeNode::Struct(fields) => {
                if fields.is_empty() {
                    return "struct{}".to_string();
                }
                let fields: Vec<String> = fields.iter().map(|f| f.param_decl(imports)).collect();
                format!("struct{{ {} }}", fields.join("; "))
            }
            TypeNode::Function(func) => format!("func{}", func.signature(imports)),
            TypeNode::Interface(methods) => {
                if methods.is_empty() {
                    return "interface{}".to_string();
                }
                let methods: Vec<String> = methods.iter().map(|m| m.method_spec(imports)).collect();
                format!("interface{{ {} }}", methods.join("; "))
            }
        }
    }

    /// `name T`
    pub fn param_decl(&self, name: &str, imports: &ImportTable) -> String {
        format!("{} {}", name, self.type_expr(imports))
    }

    /// A Go expression that formats `var` as a string.
    pub fn stringer(&self, var: &str) -> String {
        match self {
            TypeNode::Primitive(kind) => match kind {
                BasicKind::Invalid => "\"undefined\"".to_string(),
                BasicKind::String | BasicKind::UntypedString => var.to_string(),
                BasicKind::UntypedRune => format!("fmt.Sprintf(\"%c\", {})", var),
                _ => format!("fmt.Sprintf(\"%v\", {})", var),
            },
            _ => format!("fmt.Sprintf(\"%v\", {})", var),
        }
    }
}

impl NamedField {
    pub fn param_decl(&self, imports: &ImportTable) -> String {
        self.ty.param_decl(&self.name, imports)
    }
}

impl FunctionType {
    /// `(params) results` without the `func` keyword.
    pub fn signature(&self, imports: &ImportTable) -> String {
        let params = render_params(&self.params, self.variadic, ParamNames::Explicit, imports);
        let results = render_results(&self.results, imports);
        join_signature(&params, &results)
    }
}

impl DeclaredFunction {
    /// `Name(params) results`, as written inside an interface literal.
    pub fn method_spec(&self, imports: &ImportTable) -> String {
        format!(
            "{}{}",
            self.name,
            join_signature(
                &render_params(&self.params, self.variadic, ParamNames::Explicit, imports),
                &render_results(&self.results, imports)
            )
        )
    }

    /// Parameter list with every parameter named, as needed to forward calls.
    pub fn params_decl(&self, imports: &ImportTable) -> String {
        render_params(&self.params, self.variadic, ParamNames::Always, imports)
    }

    /// The result list, or an empty string for methods without results.
    pub fn results_decl(&self, imports: &ImportTable) -> String {
        render_results(&self.results, imports)
    }

    /// Argument list forwarding every parameter, spreading a variadic tail.
    pub fn forward_args(&self) -> String {
        let last = self.params.len().saturating_sub(1);
        let args: Vec<String> = self
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if self.variadic && i == last {
                    format!("{}...", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect();
        args.join(", ")
    }
}

fn join_signature(params: &str, results: &str) -> String {
    if results.is_empty() {
        params.to_string()
    } else {
        format!("{} {}", params, results)
    }
}

fn render_params(
    params: &[NamedField],
    variadic: bool,
    names: ParamNames,
    imports: &ImportTable,
) -> String {
    // Go requires all parameters to be named or none of them.
    let named = match names {
        ParamNames::Always => true,
        ParamNames::Explicit => params.iter().any(|p| p.explicit),
    };
    let last = params.len().saturating_sub(1);
    let rendered: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let ty = match (&p.ty, variadic && i == last) {
                (TypeNode::Slice(inner), true) => format!("...{}", inner.type_expr(imports)),
                (ty, _) => ty.type_expr(imports),
            };
            if named {
                format!("{} {}", p.name, ty)
            } else {
                ty
            }
        })
        .collect();
    format!("({})", rendered.join(", "))
}

/// Result lists only carry names the declaration gave them. A single
/// unnamed result goes without parentheses.
fn render_results(results: &[NamedField], imports: &ImportTable) -> String {
    let named = results.iter().any(|r| r.explicit);
    match results {
        [] => String::new(),
        [only] if !named => only.ty.type_expr(imports),
        _ => {
            let rendered: Vec<String> = results
                .iter()
                .map(|r| {
                    if named {
                        r.param_decl(imports)
                    } else {
                        r.ty.type_expr(imports)
                    }
                })
                .collect();
            format!("({})", rendered.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PackageRef;
    use crate::types::NamedRef;

    fn string() -> TypeNode {
        TypeNode::Primitive(BasicKind::String)
    }

    fn int() -> TypeNode {
        TypeNode::Primitive(BasicKind::Int)
    }

    fn domain_foo() -> TypeNode {
        TypeNode::Named(NamedRef::new(
            "Foo",
            Some(PackageRef::new("example/domain", "domain")),
        ))
    }

    fn imports() -> ImportTable {
        let mut table = ImportTable::new("example");
        table.require(&PackageRef::new("example/domain", "domain"));
        table
    }

    #[test]
    fn test_map_of_slice_renders_the_same_in_both_positions() {
        let ty = TypeNode::Map {
            key: Box::new(string()),
            value: Box::new(TypeNode::Slice(Box::new(int()))),
        };
        let table = imports();

        assert_eq!(ty.type_expr(&table), "map[string][]int");
        assert_eq!(ty.param_decl("mp", &table), "mp map[string][]int");
    }

    #[test]
    fn test_named_types_qualify_through_imports() {
        let table = imports();
        assert_eq!(domain_foo().type_expr(&table), "domain.Foo");

        let local = TypeNode::Named(NamedRef::new("Pill", Some(PackageRef::new("example", "example"))));
        assert_eq!(local.type_expr(&table), "Pill");

        let unexported = TypeNode::Named(NamedRef::new(
            "unexported",
            Some(PackageRef::new("example", "example")),
        ));
        assert_eq!(unexported.type_expr(&table), "unexported");
    }

    #[test]
    fn test_struct_and_interface_literals() {
        let table = imports();
        let st = TypeNode::Struct(vec![NamedField::new("name", string(), true)]);
        assert_eq!(st.type_expr(&table), "struct{ name string }");
        assert_eq!(TypeNode::Struct(vec![]).type_expr(&table), "struct{}");
        assert_eq!(TypeNode::Interface(vec![]).type_expr(&table), "interface{}");

        let iface = TypeNode::Interface(vec![DeclaredFunction {
            name: "aFunc".to_string(),
            params: vec![NamedField::new("inner", int(), true)],
            results: vec![],
            variadic: false,
        }]);
        assert_eq!(iface.type_expr(&table), "interface{ aFunc(inner int) }");
    }

    #[test]
    fn test_function_literal_keeps_unnamed_params_unnamed() {
        let table = imports();
        let func = TypeNode::Function(FunctionType {
            params: vec![NamedField::new("string", string(), false)],
            results: vec![
                NamedField::new("string", string(), false),
                NamedField::new("error1", TypeNode::Named(NamedRef::new("error", None)), false),
            ],
            variadic: false,
        });
        assert_eq!(func.type_expr(&table), "func(string) (string, error)");
    }

    #[test]
    fn test_results_follow_explicit_naming() {
        let table = imports();
        let mut method = DeclaredFunction {
            name: "Find".to_string(),
            params: vec![NamedField::new("id", string(), true)],
            results: vec![NamedField::new("Foo", domain_foo(), false)],
            variadic: false,
        };
        assert_eq!(method.results_decl(&table), "domain.Foo");

        method.results = vec![NamedField::new("found", domain_foo(), true)];
        assert_eq!(method.results_decl(&table), "(found domain.Foo)");

        method.results = vec![
            NamedField::new("ptrFoo", TypeNode::Pointer(Box::new(domain_foo())), false),
            NamedField::new("error1", TypeNode::Named(NamedRef::new("error", None)), false),
        ];
        assert_eq!(method.results_decl(&table), "(*domain.Foo, error)");

        method.results.clear();
        assert_eq!(method.results_decl(&table), "");
    }

    #[test]
    fn test_variadic_params_and_forwarding() {
        let table = imports();
        let method = DeclaredFunction {
            name: "Log".to_string(),
            params: vec![
                NamedField::new("format", string(), true),
                NamedField::new("args", TypeNode::Slice(Box::new(TypeNode::Interface(vec![]))), true),
            ],
            results: vec![],
            variadic: true,
        };
        assert_eq!(method.params_decl(&table), "(format string, args ...interface{})");
        assert_eq!(method.forward_args(), "format, args...");
        assert_eq!(method.method_spec(&table), "Log(format string, args ...interface{})");
    }

    #[test]
    fn test_stringer() {
        assert_eq!(string().stringer("bar"), "bar");
        assert_eq!(int().stringer("n"), "fmt.Sprintf(\"%v\", n)");
        assert_eq!(
            TypeNode::Primitive(BasicKind::UntypedRune).stringer("r"),
            "fmt.Sprintf(\"%c\", r)"
        );
        assert_eq!(domain_foo().stringer("foo"), "fmt.Sprintf(\"%v\", foo)");
    }

    #[test]
    fn test_unsafe_pointer_is_qualified() {
        let mut table = ImportTable::new("example");
        table.require(&PackageRef::new("unsafe", "unsafe"));
        assert_eq!(
            TypeNode::Primitive(BasicKind::UnsafePointer).type_expr(&table),
            "unsafe.Pointer"
        );
    }
}
