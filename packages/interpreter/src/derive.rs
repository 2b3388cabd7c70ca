//! Recursive derivation of [`TypeNode`] trees from the resolved type graph.
//!
//! Derivation is total over the supported kinds and bounded in depth: a
//! graph nested deeper than [`RECURSION_LIMIT`] is an error, never a
//! truncated tree.

use crate::error::{DeriveError, DeriveResult};
use crate::graph::{GoType, Method, Var};
use crate::types::{sanitize_identifier, DeclaredFunction, FunctionType, NamedField, NamedRef, TypeNode};
use std::collections::HashSet;
use tracing::debug;

/// Deepest level a node may sit at, with the root at depth 0.
pub const RECURSION_LIMIT: usize = 10;

/// Derives the explicit methods of an interface type.
///
/// Named types are looked through once, so both the declared type and its
/// interface literal are accepted.
pub fn derive_interface(ty: &GoType) -> DeriveResult<Vec<DeclaredFunction>> {
    match ty.underlying() {
        GoType::Interface { methods, .. } => {
            let functions = derive_methods(methods, 0)?;
            debug!(methods = functions.len(), "Derived interface");
            Ok(functions)
        }
        other => Err(DeriveError::NotAnInterface {
            found: other.kind_name().to_string(),
        }),
    }
}

/// Derives a single node at the given depth.
pub fn derive(ty: &GoType, depth: usize) -> DeriveResult<TypeNode> {
    if depth > RECURSION_LIMIT {
        return Err(DeriveError::RecursionLimitExceeded {
            limit: RECURSION_LIMIT,
            depth,
        });
    }

    let node = match ty {
        GoType::Basic { name } => TypeNode::Primitive(*name),
        GoType::Named { name, package, .. } => {
            if name.is_empty() {
                return Err(unsupported("anonymous named type"));
            }
            TypeNode::Named(NamedRef::new(name.clone(), package.clone()))
        }
        GoType::Pointer { elem } => TypeNode::Pointer(Box::new(derive(elem, depth + 1)?)),
        GoType::Slice { elem } => TypeNode::Slice(Box::new(derive(elem, depth + 1)?)),
        GoType::Map { key, elem } => TypeNode::Map {
            key: Box::new(derive(key, depth + 1)?),
            value: Box::new(derive(elem, depth + 1)?),
        },
        GoType::Struct { fields } => TypeNode::Struct(derive_fields(fields, depth)?),
        GoType::Signature {
            params,
            results,
            variadic,
        } => TypeNode::Function(FunctionType {
            params: derive_fields(params, depth)?,
            results: derive_fields(results, depth)?,
            variadic: *variadic,
        }),
        GoType::Interface { methods, .. } => TypeNode::Interface(derive_methods(methods, depth)?),
        GoType::Array { .. } | GoType::Chan { .. } | GoType::TypeParam { .. } => {
            return Err(unsupported(ty.kind_name()));
        }
    };

    debug!(depth, node = %node.debug_string(), "Derived type");
    Ok(node)
}

fn unsupported(kind: &str) -> DeriveError {
    DeriveError::UnsupportedType {
        kind: kind.to_string(),
    }
}

fn derive_methods(methods: &[Method], depth: usize) -> DeriveResult<Vec<DeclaredFunction>> {
    methods
        .iter()
        .map(|method| match &method.ty {
            GoType::Signature {
                params,
                results,
                variadic,
            } => {
                let function = DeclaredFunction {
                    name: method.name.clone(),
                    params: derive_fields(params, depth)?,
                    results: derive_fields(results, depth)?,
                    variadic: *variadic,
                };
                debug!(depth, method = %function.debug_string(), "Derived method");
                Ok(function)
            }
            other => Err(DeriveError::BadMethodSignature {
                method: method.name.clone(),
                found: other.kind_name().to_string(),
            }),
        })
        .collect()
}

/// Derives a field list one level below `depth`, naming every entry.
///
/// Unnamed and blank entries get `<type name><index>`, with no index at
/// position 0.
fn derive_fields(vars: &[Var], depth: usize) -> DeriveResult<Vec<NamedField>> {
    let mut taken = HashSet::new();
    let mut fields = Vec::with_capacity(vars.len());

    for (position, var) in vars.iter().enumerate() {
        let ty = derive(&var.ty, depth + 1)?;
        // A blank `_` cannot be forwarded as a value, so it is renamed too.
        let field = if var.name.is_empty() || var.name == "_" {
            let name = synthesize_name(&ty, position, &taken);
            NamedField::new(name, ty, false)
        } else {
            NamedField::new(var.name.clone(), ty, true)
        };
        taken.insert(field.name.clone());
        fields.push(field);
    }

    Ok(fields)
}

fn synthesize_name(ty: &TypeNode, position: usize, taken: &HashSet<String>) -> String {
    let seed = ty.type_name();
    let mut index = position;
    loop {
        let candidate = if index == 0 {
            sanitize_identifier(&seed)
        } else {
            sanitize_identifier(&format!("{}{}", seed, index))
        };
        if !taken.contains(&candidate) {
            return candidate;
        }
        index += 1;
    }
}
