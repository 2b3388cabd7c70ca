//! # Middlegen Interpreter
//!
//! Turns a resolved Go type graph into a bounded, serializable model of an
//! interface's methods, and renders that model back into Go source.
//!
//! ## Features
//!
//! - **Closed type model**: [`TypeNode`] covers primitives, named types,
//!   pointers, slices, maps, struct/function/interface literals
//! - **Bounded derivation**: nesting deeper than [`RECURSION_LIMIT`] fails
//!   with [`DeriveError::RecursionLimitExceeded`]
//! - **Deterministic naming**: unnamed parameters and results get
//!   `<type name><index>` identifiers
//! - **Import discovery**: every node reports the packages needed to spell it
//!
//! ## Example
//!
//! ```rust
//! use middlegen_interpreter::graph::{BasicKind, GoType, Method, Var};
//! use middlegen_interpreter::{derive_interface, ImportTable};
//!
//! let iface = GoType::interface(vec![Method {
//!     name: "Foo".to_string(),
//!     ty: GoType::signature(
//!         vec![Var::new("ctx", GoType::context()), Var::unnamed(GoType::basic(BasicKind::String))],
//!         vec![Var::unnamed(GoType::named("error", None))],
//!     ),
//! }]);
//!
//! let methods = derive_interface(&iface).unwrap();
//! let mut imports = ImportTable::new("example");
//! imports.register("context", "context");
//!
//! assert_eq!(methods[0].params_decl(&imports), "(ctx context.Context, string1 string)");
//! assert_eq!(methods[0].results_decl(&imports), "error");
//! ```

pub mod derive;
pub mod error;
pub mod graph;
pub mod imports;
pub mod render;
pub mod types;

pub use derive::{derive, derive_interface, RECURSION_LIMIT};
pub use error::{DeriveError, DeriveResult};
pub use graph::{BasicKind, GoType, Package, PackageRef};
pub use imports::{ImportSpec, ImportTable};
pub use types::{DeclaredFunction, FunctionType, NamedField, NamedRef, TypeNode};
